use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::validation::{check_len, BodyReader, Issues};

const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 255;
const MAX_URL_LENGTH: usize = 1000;
const MIN_BATCH_IMAGES: usize = 1;
const MAX_BATCH_IMAGES: usize = 5;

const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImage {
    pub id: i32,
    pub property_id: i32,
    pub name: String,
    pub url: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct CreatePropertyImageInput {
    pub name: String,
    pub url: String,
}

impl CreatePropertyImageInput {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut reader = BodyReader::new(body);
        let name = reader.required_str("name");
        let url = reader.required_str("url");

        let issues = reader.issues();
        if let Some(v) = &name {
            check_len(issues, "name", v, MIN_NAME_LENGTH, MAX_NAME_LENGTH);
        }
        if let Some(v) = &url {
            check_len(issues, "url", v, 1, MAX_URL_LENGTH);
        }

        reader.finish()?;
        Ok(Self {
            name: name.unwrap_or_default(),
            url: url.unwrap_or_default(),
        })
    }

    /// Accepts either a single image object or a batch of up to five.
    pub fn batch_from_json(body: &Value) -> Result<Vec<Self>, ApiError> {
        match body.as_array() {
            None => Ok(vec![Self::from_json(body)?]),
            Some(entries) => {
                if entries.len() < MIN_BATCH_IMAGES {
                    let mut issues = Issues::new();
                    issues.push(
                        "too_small",
                        "",
                        format!("Array must contain at least {MIN_BATCH_IMAGES} element(s)"),
                    );
                    return issues.into_result().map(|_| Vec::new());
                }
                if entries.len() > MAX_BATCH_IMAGES {
                    let mut issues = Issues::new();
                    issues.push(
                        "too_big",
                        "",
                        format!("Array must contain at most {MAX_BATCH_IMAGES} element(s)"),
                    );
                    return issues.into_result().map(|_| Vec::new());
                }
                entries.iter().map(Self::from_json).collect()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadUrlInput {
    pub file_name: String,
    pub content_type: String,
}

impl UploadUrlInput {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut reader = BodyReader::new(body);
        let file_name = reader.required_str("fileName");
        let content_type = reader.required_str("contentType");

        let issues = reader.issues();
        if let Some(v) = &file_name {
            if v.is_empty() {
                issues.push("too_small", "fileName", "String must contain at least 1 character(s)");
            }
        }
        if let Some(v) = &content_type {
            if !ALLOWED_CONTENT_TYPES.contains(&v.as_str()) {
                issues.push("invalid_format", "contentType", "Only images allowed");
            }
        }

        reader.finish()?;
        Ok(Self {
            file_name: file_name.unwrap_or_default(),
            content_type: content_type.unwrap_or_default(),
        })
    }
}
