use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::validation::{check_email, check_len, BodyReader};

const MIN_STRING_LENGTH: usize = 2;
const MAX_STRING_LENGTH: usize = 255;

/// A renter profile created by an owner. Not a login account.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct CreateTenantInput {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CreateTenantInput {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut reader = BodyReader::new(body);
        let name = reader.required_str("name");
        let email = reader.required_str("email");
        let phone = reader.required_str("phone");

        let issues = reader.issues();
        if let Some(v) = &name {
            check_len(issues, "name", v, MIN_STRING_LENGTH, MAX_STRING_LENGTH);
        }
        if let Some(v) = &email {
            check_email(issues, "email", v);
            check_len(issues, "email", v, 1, MAX_STRING_LENGTH);
        }
        if let Some(v) = &phone {
            check_len(issues, "phone", v, MIN_STRING_LENGTH, MAX_STRING_LENGTH);
        }

        reader.finish()?;
        Ok(Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            phone: phone.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTenantInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateTenantInput {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut reader = BodyReader::new(body);
        let name = reader.optional_str("name");
        let email = reader.optional_str("email");
        let phone = reader.optional_str("phone");

        if reader.fields_seen() == 0 {
            reader
                .issues()
                .push("custom", "", "At least one field must be provided");
        }

        let issues = reader.issues();
        if let Some(v) = &name {
            check_len(issues, "name", v, MIN_STRING_LENGTH, MAX_STRING_LENGTH);
        }
        if let Some(v) = &email {
            check_email(issues, "email", v);
            check_len(issues, "email", v, 1, MAX_STRING_LENGTH);
        }
        if let Some(v) = &phone {
            check_len(issues, "phone", v, MIN_STRING_LENGTH, MAX_STRING_LENGTH);
        }

        reader.finish()?;
        Ok(Self { name, email, phone })
    }
}
