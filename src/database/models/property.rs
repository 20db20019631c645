use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

use super::owner::Owner;
use super::property_image::PropertyImage;
use super::unit::Unit;
use crate::error::ApiError;
use crate::validation::{check_enum, check_len, BodyReader};

const MIN_STRING_LENGTH: usize = 2;
const MAX_STRING_LENGTH: usize = 255;
const MAX_TEXT_LENGTH: usize = 1000;
const MIN_ZIP_LENGTH: usize = 4;
const MAX_ZIP_LENGTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum PropertyType {
    SingleUnit,
    MultiUnit,
}

impl PropertyType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "single-unit" => Some(PropertyType::SingleUnit),
            "multi-unit" => Some(PropertyType::MultiUnit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub address: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub property_type: PropertyType,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Property with its loaded relations, the shape of the list endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyWithRelations {
    #[serde(flatten)]
    pub property: Property,
    pub owner: Option<Owner>,
    pub images: Vec<PropertyImage>,
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone)]
pub struct CreatePropertyInput {
    pub name: String,
    pub address: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub property_type: PropertyType,
}

impl CreatePropertyInput {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut reader = BodyReader::new(body);
        let name = reader.required_str("name");
        let address = reader.required_str("address");
        let address2 = reader.optional_str("address2");
        let city = reader.required_str("city");
        let state = reader.required_str("state");
        let zip_code = reader.required_str("zipCode");
        let country = reader.required_str("country");
        let property_type = reader.required_str("propertyType");

        let issues = reader.issues();
        if let Some(v) = &name {
            check_len(issues, "name", v, MIN_STRING_LENGTH, MAX_STRING_LENGTH);
        }
        if let Some(v) = &address {
            check_len(issues, "address", v, MIN_STRING_LENGTH, MAX_TEXT_LENGTH);
        }
        if let Some(v) = &address2 {
            check_len(issues, "address2", v, 0, MAX_TEXT_LENGTH);
        }
        if let Some(v) = &city {
            check_len(issues, "city", v, MIN_STRING_LENGTH, MAX_STRING_LENGTH);
        }
        if let Some(v) = &state {
            check_len(issues, "state", v, MIN_STRING_LENGTH, MAX_STRING_LENGTH);
        }
        if let Some(v) = &zip_code {
            check_len(issues, "zipCode", v, MIN_ZIP_LENGTH, MAX_ZIP_LENGTH);
        }
        if let Some(v) = &country {
            check_len(issues, "country", v, MIN_STRING_LENGTH, MAX_STRING_LENGTH);
        }
        if let Some(v) = &property_type {
            check_enum(issues, "propertyType", v, &["single-unit", "multi-unit"]);
        }

        let parsed_type = property_type.as_deref().and_then(PropertyType::parse);
        reader.finish()?;

        Ok(Self {
            name: name.unwrap_or_default(),
            address: address.unwrap_or_default(),
            address2,
            city: city.unwrap_or_default(),
            state: state.unwrap_or_default(),
            zip_code: zip_code.unwrap_or_default(),
            country: country.unwrap_or_default(),
            property_type: parsed_type.unwrap_or(PropertyType::SingleUnit),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePropertyInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub property_type: Option<PropertyType>,
}

impl UpdatePropertyInput {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut reader = BodyReader::new(body);
        let name = reader.optional_str("name");
        let address = reader.optional_str("address");
        let address2 = reader.optional_str("address2");
        let city = reader.optional_str("city");
        let state = reader.optional_str("state");
        let zip_code = reader.optional_str("zipCode");
        let country = reader.optional_str("country");
        let property_type = reader.optional_str("propertyType");

        if reader.fields_seen() == 0 {
            reader
                .issues()
                .push("custom", "", "At least one field must be provided");
        }

        let issues = reader.issues();
        if let Some(v) = &name {
            check_len(issues, "name", v, MIN_STRING_LENGTH, MAX_STRING_LENGTH);
        }
        if let Some(v) = &address {
            check_len(issues, "address", v, MIN_STRING_LENGTH, MAX_TEXT_LENGTH);
        }
        if let Some(v) = &address2 {
            check_len(issues, "address2", v, 0, MAX_TEXT_LENGTH);
        }
        if let Some(v) = &city {
            check_len(issues, "city", v, MIN_STRING_LENGTH, MAX_STRING_LENGTH);
        }
        if let Some(v) = &state {
            check_len(issues, "state", v, MIN_STRING_LENGTH, MAX_STRING_LENGTH);
        }
        if let Some(v) = &zip_code {
            check_len(issues, "zipCode", v, MIN_ZIP_LENGTH, MAX_ZIP_LENGTH);
        }
        if let Some(v) = &country {
            check_len(issues, "country", v, MIN_STRING_LENGTH, MAX_STRING_LENGTH);
        }
        if let Some(v) = &property_type {
            check_enum(issues, "propertyType", v, &["single-unit", "multi-unit"]);
        }

        let parsed_type = property_type.as_deref().and_then(PropertyType::parse);
        reader.finish()?;

        Ok(Self {
            name,
            address,
            address2,
            city,
            state,
            zip_code,
            country,
            property_type: parsed_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "name": "Sunset Villas",
            "address": "123 Test St",
            "city": "Davao City",
            "state": "Davao del Sur",
            "zipCode": "8000",
            "country": "Philippines",
            "propertyType": "single-unit",
        })
    }

    #[test]
    fn create_accepts_valid_property() {
        let input = CreatePropertyInput::from_json(&valid_body()).unwrap();
        assert_eq!(input.name, "Sunset Villas");
        assert_eq!(input.property_type, PropertyType::SingleUnit);
        assert!(input.address2.is_none());
    }

    #[test]
    fn create_rejects_out_of_bounds_fields() {
        let mut body = valid_body();
        body["name"] = json!("X");
        body["zipCode"] = json!("123");
        body["propertyType"] = json!("duplex");
        let err = CreatePropertyInput::from_json(&body).unwrap_err();
        match err {
            ApiError::Validation(issues) => {
                assert!(issues.iter().any(|i| i.path == vec!["name"]));
                assert!(issues.iter().any(|i| i.path == vec!["zipCode"]));
                assert!(issues.iter().any(|i| i.path == vec!["propertyType"]));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn update_requires_at_least_one_field() {
        let err = UpdatePropertyInput::from_json(&json!({})).unwrap_err();
        match err {
            ApiError::Validation(issues) => {
                assert_eq!(issues[0].code, "custom");
                assert_eq!(issues[0].message, "At least one field must be provided");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn update_accepts_partial_fields() {
        let input = UpdatePropertyInput::from_json(&json!({ "name": "Renamed" })).unwrap();
        assert_eq!(input.name.as_deref(), Some("Renamed"));
        assert!(input.city.is_none());
    }
}
