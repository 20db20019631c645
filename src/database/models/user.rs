use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::validation::{check_email, check_enum, check_len, check_min, BodyReader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserRole {
    Owner,
    Tenant,
}

impl UserRole {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "owner" => Some(UserRole::Owner),
            "tenant" => Some(UserRole::Tenant),
            _ => None,
        }
    }
}

/// Account identity. Credentials live in `accounts`, never here.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub email_verified: bool,
    pub name: String,
    pub image: Option<String>,
    pub role: UserRole,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

const MIN_NAME_LENGTH: usize = 2;
const MAX_STRING_LENGTH: usize = 255;
const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone)]
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl SignUpInput {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut reader = BodyReader::new(body);
        let name = reader.required_str("name");
        let email = reader.required_str("email");
        let password = reader.required_str("password");
        let role = reader.required_str("role");

        let issues = reader.issues();
        if let Some(name) = &name {
            check_len(issues, "name", name, MIN_NAME_LENGTH, MAX_STRING_LENGTH);
        }
        if let Some(email) = &email {
            check_email(issues, "email", email);
            check_len(issues, "email", email, 1, MAX_STRING_LENGTH);
        }
        if let Some(password) = &password {
            check_min(issues, "password", password.chars().count() as i64, MIN_PASSWORD_LENGTH as i64);
        }
        if let Some(role) = &role {
            check_enum(issues, "role", role, &["owner", "tenant"]);
        }

        let parsed_role = role.as_deref().and_then(UserRole::parse);
        reader.finish()?;

        Ok(Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
            role: parsed_role.unwrap_or(UserRole::Tenant),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

impl SignInInput {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut reader = BodyReader::new(body);
        let email = reader.required_str("email");
        let password = reader.required_str("password");

        if let Some(email) = &email {
            check_email(reader.issues(), "email", email);
        }

        reader.finish()?;
        Ok(Self {
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sign_up_accepts_valid_owner() {
        let input = SignUpInput::from_json(&json!({
            "name": "Test Owner",
            "email": "a@example.com",
            "password": "Password123!",
            "role": "owner",
        }))
        .unwrap();
        assert_eq!(input.role, UserRole::Owner);
        assert_eq!(input.email, "a@example.com");
    }

    #[test]
    fn sign_up_rejects_bad_role_and_short_password() {
        let err = SignUpInput::from_json(&json!({
            "name": "Test Owner",
            "email": "a@example.com",
            "password": "short",
            "role": "admin",
        }))
        .unwrap_err();
        match err {
            ApiError::Validation(issues) => {
                assert!(issues.iter().any(|i| i.path == vec!["password"]));
                assert!(issues.iter().any(|i| i.path == vec!["role"]));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn sign_in_requires_both_fields() {
        let err = SignInInput::from_json(&json!({ "email": "a@example.com" })).unwrap_err();
        match err {
            ApiError::Validation(issues) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].path, vec!["password"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
