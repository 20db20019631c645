use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::validation::{check_enum, check_len, check_positive, check_url, BodyReader};

const MAX_NOTES_LENGTH: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentType {
    Rent,
    Deposit,
    Damages,
}

impl PaymentType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "rent" => Some(PaymentType::Rent),
            "deposit" => Some(PaymentType::Deposit),
            "damages" => Some(PaymentType::Damages),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i32,
    pub lease_id: i32,
    pub amount: i32,
    pub date_paid: NaiveDate,
    pub payment_type: PaymentType,
    pub notes: Option<String>,
    pub receipt_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct CreatePaymentInput {
    pub amount: i32,
    pub date_paid: NaiveDate,
    pub payment_type: PaymentType,
    pub notes: Option<String>,
    pub receipt_url: Option<String>,
}

impl CreatePaymentInput {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut reader = BodyReader::new(body);
        let amount = reader.required_int("amount");
        let date_paid = reader.required_date("datePaid");
        let payment_type = reader.required_str("paymentType");
        let notes = reader.optional_str("notes");
        let receipt_url = reader.optional_str("receiptUrl");

        let issues = reader.issues();
        if let Some(v) = amount {
            check_positive(issues, "amount", v, "Amount must be a positive number");
        }
        if let Some(v) = &payment_type {
            check_enum(issues, "paymentType", v, &["rent", "deposit", "damages"]);
        }
        if let Some(v) = &notes {
            check_len(issues, "notes", v, 0, MAX_NOTES_LENGTH);
        }
        if let Some(v) = &receipt_url {
            check_url(issues, "receiptUrl", v);
        }

        let parsed_type = payment_type.as_deref().and_then(PaymentType::parse);
        reader.finish()?;

        Ok(Self {
            amount: amount.unwrap_or_default() as i32,
            date_paid: date_paid.unwrap_or_default(),
            payment_type: parsed_type.unwrap_or(PaymentType::Rent),
            notes,
            receipt_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_accepts_valid_payment() {
        let input = CreatePaymentInput::from_json(&json!({
            "amount": 1000,
            "paymentType": "rent",
            "datePaid": "2026-02-18",
        }))
        .unwrap();
        assert_eq!(input.amount, 1000);
        assert_eq!(input.payment_type, PaymentType::Rent);
        assert_eq!(input.date_paid, NaiveDate::from_ymd_opt(2026, 2, 18).unwrap());
    }

    #[test]
    fn create_rejects_non_positive_amount_and_bad_type() {
        let err = CreatePaymentInput::from_json(&json!({
            "amount": 0,
            "paymentType": "refund",
            "datePaid": "2026-02-18",
        }))
        .unwrap_err();
        match err {
            ApiError::Validation(issues) => {
                assert!(issues.iter().any(|i| i.path == vec!["amount"]));
                assert!(issues.iter().any(|i| i.path == vec!["paymentType"]));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_rejects_invalid_receipt_url() {
        let err = CreatePaymentInput::from_json(&json!({
            "amount": 500,
            "paymentType": "deposit",
            "datePaid": "2026-02-18",
            "receiptUrl": "not a url",
        }))
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
