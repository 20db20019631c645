use chrono::NaiveDateTime;
use sqlx::{PgPool, Row};

use crate::database::models::user::UserRole;
use crate::database::models::{Account, Session, User, Verification};

pub struct AuthRepository {
    pool: PgPool,
}

impl AuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // users

    pub async fn create_user(
        &self,
        id: &str,
        email: &str,
        name: &str,
        role: UserRole,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(name)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn mark_email_verified(&self, user_id: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET email_verified = TRUE, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    // accounts

    pub async fn create_credential_account(
        &self,
        id: &str,
        user_id: &str,
        password_hash: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, account_id, provider_id, user_id, password)
            VALUES ($1, $2, 'credential', $2, $3)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_credential_account(
        &self,
        user_id: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE user_id = $1 AND provider_id = 'credential'",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    // sessions

    pub async fn create_session(
        &self,
        id: &str,
        token: &str,
        user_id: &str,
        expires_at: NaiveDateTime,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<Option<Session>, sqlx::Error> {
        sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (id, token, user_id, expires_at, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .bind(ip_address)
        .bind(user_agent)
        .fetch_optional(&self.pool)
        .await
    }

    /// One joined lookup per request: the session and its user together.
    pub async fn find_session_with_user(
        &self,
        token: &str,
    ) -> Result<Option<(Session, User)>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT
                s.id AS s_id, s.token AS s_token, s.user_id AS s_user_id,
                s.expires_at AS s_expires_at, s.ip_address AS s_ip_address,
                s.user_agent AS s_user_agent, s.created_at AS s_created_at,
                s.updated_at AS s_updated_at,
                u.id AS u_id, u.email AS u_email, u.email_verified AS u_email_verified,
                u.name AS u_name, u.image AS u_image, u.role AS u_role,
                u.created_at AS u_created_at, u.updated_at AS u_updated_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| {
            let session = Session {
                id: r.get("s_id"),
                token: r.get("s_token"),
                user_id: r.get("s_user_id"),
                expires_at: r.get("s_expires_at"),
                ip_address: r.get("s_ip_address"),
                user_agent: r.get("s_user_agent"),
                created_at: r.get("s_created_at"),
                updated_at: r.get("s_updated_at"),
            };
            let user = User {
                id: r.get("u_id"),
                email: r.get("u_email"),
                email_verified: r.get("u_email_verified"),
                name: r.get("u_name"),
                image: r.get("u_image"),
                role: r.get("u_role"),
                created_at: r.get("u_created_at"),
                updated_at: r.get("u_updated_at"),
            };
            (session, user)
        }))
    }

    pub async fn delete_session(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // verifications

    pub async fn create_verification(
        &self,
        id: &str,
        identifier: &str,
        value: &str,
        expires_at: NaiveDateTime,
    ) -> Result<Option<Verification>, sqlx::Error> {
        sqlx::query_as::<_, Verification>(
            r#"
            INSERT INTO verifications (id, identifier, value, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(identifier)
        .bind(value)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_verification_by_value(
        &self,
        value: &str,
    ) -> Result<Option<Verification>, sqlx::Error> {
        sqlx::query_as::<_, Verification>("SELECT * FROM verifications WHERE value = $1")
            .bind(value)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn delete_verification(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM verifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
