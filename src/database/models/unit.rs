use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::validation::{check_min, BodyReader};

const MIN_UNIT_NUMBER: i64 = 1;
const MIN_MONTHLY_RENT: i64 = 0;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: i32,
    pub property_id: i32,
    pub unit_number: i32,
    pub monthly_rent: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct CreateUnitInput {
    pub unit_number: i32,
    pub monthly_rent: i32,
}

impl CreateUnitInput {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut reader = BodyReader::new(body);
        let unit_number = reader.required_int("unitNumber");
        let monthly_rent = reader.required_int("monthlyRent");

        let issues = reader.issues();
        if let Some(v) = unit_number {
            check_min(issues, "unitNumber", v, MIN_UNIT_NUMBER);
        }
        if let Some(v) = monthly_rent {
            check_min(issues, "monthlyRent", v, MIN_MONTHLY_RENT);
        }

        reader.finish()?;
        Ok(Self {
            unit_number: unit_number.unwrap_or_default() as i32,
            monthly_rent: monthly_rent.unwrap_or_default() as i32,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUnitInput {
    pub unit_number: Option<i32>,
    pub monthly_rent: Option<i32>,
}

impl UpdateUnitInput {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut reader = BodyReader::new(body);
        let unit_number = reader.optional_int("unitNumber");
        let monthly_rent = reader.optional_int("monthlyRent");

        if reader.fields_seen() == 0 {
            reader
                .issues()
                .push("custom", "", "At least one field must be provided");
        }

        let issues = reader.issues();
        if let Some(v) = unit_number {
            check_min(issues, "unitNumber", v, MIN_UNIT_NUMBER);
        }
        if let Some(v) = monthly_rent {
            check_min(issues, "monthlyRent", v, MIN_MONTHLY_RENT);
        }

        reader.finish()?;
        Ok(Self {
            unit_number: unit_number.map(|v| v as i32),
            monthly_rent: monthly_rent.map(|v| v as i32),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_accepts_zero_rent() {
        let input =
            CreateUnitInput::from_json(&json!({ "unitNumber": 101, "monthlyRent": 0 })).unwrap();
        assert_eq!(input.unit_number, 101);
        assert_eq!(input.monthly_rent, 0);
    }

    #[test]
    fn create_rejects_unit_number_below_one() {
        let err =
            CreateUnitInput::from_json(&json!({ "unitNumber": 0, "monthlyRent": 1000 }))
                .unwrap_err();
        match err {
            ApiError::Validation(issues) => {
                assert_eq!(issues[0].path, vec!["unitNumber"]);
                assert_eq!(issues[0].code, "too_small");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn update_rejects_empty_body() {
        assert!(UpdateUnitInput::from_json(&json!({})).is_err());
        let input = UpdateUnitInput::from_json(&json!({ "monthlyRent": 1200 })).unwrap();
        assert_eq!(input.monthly_rent, Some(1200));
        assert!(input.unit_number.is_none());
    }
}
