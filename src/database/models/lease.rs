use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::validation::{check_positive, BodyReader};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    pub id: i32,
    pub unit_id: i32,
    pub tenant_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rent: i32,
    pub security_deposit: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct CreateLeaseInput {
    pub tenant_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rent: i32,
    pub security_deposit: i32,
}

impl CreateLeaseInput {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut reader = BodyReader::new(body);
        let tenant_id = reader.required_int("tenantId");
        let start_date = reader.required_date("startDate");
        let end_date = reader.required_date("endDate");
        let monthly_rent = reader.required_int("monthlyRent");
        let security_deposit = reader.required_int("securityDeposit");

        let issues = reader.issues();
        if let Some(v) = tenant_id {
            check_positive(issues, "tenantId", v, "Tenant ID must be a positive number");
        }
        if let Some(v) = monthly_rent {
            check_positive(issues, "monthlyRent", v, "Rent must be a positive number");
        }
        if let Some(v) = security_deposit {
            check_positive(
                issues,
                "securityDeposit",
                v,
                "Security deposit must be a positive number",
            );
        }
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end <= start {
                issues.push("custom", "endDate", "End date must be after start date");
            }
        }

        reader.finish()?;
        Ok(Self {
            tenant_id: tenant_id.unwrap_or_default() as i32,
            start_date: start_date.unwrap_or_default(),
            end_date: end_date.unwrap_or_default(),
            monthly_rent: monthly_rent.unwrap_or_default() as i32,
            security_deposit: security_deposit.unwrap_or_default() as i32,
        })
    }
}

/// Partial lease update. Dates travel as a pair: providing only one of
/// `startDate`/`endDate` is rejected, and when both appear the range must
/// still be forward.
#[derive(Debug, Clone, Default)]
pub struct UpdateLeaseInput {
    pub tenant_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub monthly_rent: Option<i32>,
    pub security_deposit: Option<i32>,
}

impl UpdateLeaseInput {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut reader = BodyReader::new(body);
        let tenant_id = reader.optional_int("tenantId");
        let start_date = reader.optional_date("startDate");
        let end_date = reader.optional_date("endDate");
        let monthly_rent = reader.optional_int("monthlyRent");
        let security_deposit = reader.optional_int("securityDeposit");

        if reader.fields_seen() == 0 {
            reader
                .issues()
                .push("custom", "", "At least one field must be provided");
        }

        let issues = reader.issues();
        if let Some(v) = tenant_id {
            check_positive(issues, "tenantId", v, "Tenant ID must be a positive number");
        }
        if let Some(v) = monthly_rent {
            check_positive(issues, "monthlyRent", v, "Rent must be a positive number");
        }
        if let Some(v) = security_deposit {
            check_positive(
                issues,
                "securityDeposit",
                v,
                "Security deposit must be a positive number",
            );
        }
        match (start_date, end_date) {
            (Some(start), Some(end)) => {
                if end <= start {
                    issues.push("custom", "endDate", "End date must be after start date");
                }
            }
            (Some(_), None) | (None, Some(_)) => {
                issues.push(
                    "custom",
                    "startDate",
                    "startDate and endDate must be provided together",
                );
            }
            (None, None) => {}
        }

        reader.finish()?;
        Ok(Self {
            tenant_id: tenant_id.map(|v| v as i32),
            start_date,
            end_date,
            monthly_rent: monthly_rent.map(|v| v as i32),
            security_deposit: security_deposit.map(|v| v as i32),
        })
    }
}
