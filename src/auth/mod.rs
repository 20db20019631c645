//! Session-based authentication: email/password sign-up with mandatory
//! email verification, opaque DB-backed session tokens, owner-profile
//! creation hook.

pub mod password;
pub mod token;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config;
use crate::database::models::user::UserRole;
use crate::database::models::{Session, SignInInput, SignUpInput, User};
use crate::database::repositories::{AuthRepository, OwnersRepository};
use crate::error::ApiError;
use crate::mail::{Mail, Mailer};
use crate::services::ensure_persisted;

const SESSION_TTL_DAYS: i64 = 7;
const VERIFICATION_TTL_HOURS: i64 = 24;

pub struct AuthService {
    repo: AuthRepository,
    owners: OwnersRepository,
    mailer: Mailer,
}

impl AuthService {
    pub fn new(pool: &PgPool, mailer: Mailer) -> Self {
        Self {
            repo: AuthRepository::new(pool.clone()),
            owners: OwnersRepository::new(pool.clone()),
            mailer,
        }
    }

    pub async fn sign_up(&self, input: &SignUpInput) -> Result<User, ApiError> {
        if self.repo.find_user_by_email(&input.email).await?.is_some() {
            return Err(ApiError::conflict(
                "A record with this information already exists.",
            ));
        }

        let hash = password::hash_password(&input.password)?;
        let user = self
            .repo
            .create_user(
                &Uuid::new_v4().to_string(),
                &input.email,
                &input.name,
                input.role,
            )
            .await?;
        let user = ensure_persisted(user, "create user")?;

        self.repo
            .create_credential_account(&Uuid::new_v4().to_string(), &user.id, &hash)
            .await?;

        self.after_user_created(&user).await?;
        Ok(user)
    }

    /// Post-creation hook: owners get their profile row, everyone gets a
    /// verification email.
    async fn after_user_created(&self, user: &User) -> Result<(), ApiError> {
        if user.role == UserRole::Owner {
            self.owners.create(&user.id).await?;
        }
        self.send_verification_email(user).await
    }

    async fn send_verification_email(&self, user: &User) -> Result<(), ApiError> {
        let value = token::generate_token();
        let expires_at = (Utc::now() + Duration::hours(VERIFICATION_TTL_HOURS)).naive_utc();
        self.repo
            .create_verification(&Uuid::new_v4().to_string(), &user.email, &value, expires_at)
            .await?;

        let url = format!(
            "{}/api/auth/verify-email?token={value}",
            config::env().auth_url
        );
        self.mailer.enqueue(Mail {
            to: user.email.clone(),
            subject: "Verify your email address".to_string(),
            text: format!("Click the link to verify your email: {url}"),
        });
        Ok(())
    }

    pub async fn sign_in(
        &self,
        input: &SignInInput,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<(Session, User), ApiError> {
        let user = self.repo.find_user_by_email(&input.email).await?;
        let user = user.ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

        let account = self.repo.find_credential_account(&user.id).await?;
        let stored_hash = account.and_then(|a| a.password);
        let stored_hash =
            stored_hash.ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

        if !password::verify_password(&input.password, &stored_hash)? {
            return Err(ApiError::unauthorized("Invalid email or password"));
        }

        if !user.email_verified {
            // Re-send so the user always has a fresh link in their inbox.
            self.send_verification_email(&user).await?;
            return Err(ApiError::forbidden("Email not verified"));
        }

        let session = self.create_session(&user, ip_address, user_agent).await?;
        Ok((session, user))
    }

    pub async fn sign_out(&self, session: &Session) -> Result<(), ApiError> {
        self.repo.delete_session(&session.id).await?;
        Ok(())
    }

    /// Consume a verification token; on success the user is verified and
    /// signed in.
    pub async fn verify_email(&self, token: &str) -> Result<(Session, User), ApiError> {
        let verification = self.repo.find_verification_by_value(token).await?;
        let verification = verification
            .ok_or_else(|| ApiError::bad_request("Invalid or expired verification token"))?;

        if verification.expires_at < Utc::now().naive_utc() {
            self.repo.delete_verification(&verification.id).await?;
            return Err(ApiError::bad_request("Invalid or expired verification token"));
        }

        let user = self
            .repo
            .find_user_by_email(&verification.identifier)
            .await?;
        let user = user.ok_or_else(|| ApiError::not_found("User not found"))?;

        let user = self.repo.mark_email_verified(&user.id).await?;
        let user = ensure_persisted(user, "verify email")?;
        self.repo.delete_verification(&verification.id).await?;

        let session = self.create_session(&user, None, None).await?;
        Ok((session, user))
    }

    async fn create_session(
        &self,
        user: &User,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<Session, ApiError> {
        let expires_at = (Utc::now() + Duration::days(SESSION_TTL_DAYS)).naive_utc();
        let session = self
            .repo
            .create_session(
                &Uuid::new_v4().to_string(),
                &token::generate_token(),
                &user.id,
                expires_at,
                ip_address,
                user_agent,
            )
            .await?;
        ensure_persisted(session, "create session")
    }
}

pub const SESSION_MAX_AGE_SECS: i64 = SESSION_TTL_DAYS * 24 * 60 * 60;
