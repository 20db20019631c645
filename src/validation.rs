//! Hand-written request validation.
//!
//! Every mutating endpoint validates its JSON body against an explicit
//! per-entity input contract before any ownership check or database call.
//! Failures collect into a list of issues and surface as a 422 response
//! shaped `{ success: false, error: { name, issues } }`.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Issue {
    pub code: &'static str,
    pub path: Vec<String>,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Issues(Vec<Issue>);

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, code: &'static str, path: &str, message: impl Into<String>) {
        let path = if path.is_empty() {
            Vec::new()
        } else {
            vec![path.to_string()]
        };
        self.0.push(Issue {
            code,
            path,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), ApiError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(self.0))
        }
    }
}

/// Field-by-field reader over a JSON body.
///
/// Accessors record an issue and return `None` on a missing required field
/// or a type mismatch; rule checks are then applied by the caller to the
/// values that did parse. `finish` yields the collected issues.
pub struct BodyReader<'a> {
    obj: &'a Map<String, Value>,
    issues: Issues,
    seen: usize,
}

static EMPTY_OBJECT: once_cell::sync::Lazy<Map<String, Value>> =
    once_cell::sync::Lazy::new(Map::new);

impl<'a> BodyReader<'a> {
    pub fn new(body: &'a Value) -> Self {
        match body.as_object() {
            Some(obj) => Self {
                obj,
                issues: Issues::new(),
                seen: 0,
            },
            None => {
                let mut issues = Issues::new();
                issues.push("invalid_type", "", "Expected object");
                Self {
                    obj: &EMPTY_OBJECT,
                    issues,
                    seen: 0,
                }
            }
        }
    }

    pub fn issues(&mut self) -> &mut Issues {
        &mut self.issues
    }

    /// Number of known fields present in the body, regardless of validity.
    pub fn fields_seen(&self) -> usize {
        self.seen
    }

    fn get(&mut self, field: &str) -> Option<&'a Value> {
        let value = self.obj.get(field).filter(|v| !v.is_null());
        if value.is_some() {
            self.seen += 1;
        }
        value
    }

    pub fn required_str(&mut self, field: &str) -> Option<String> {
        match self.get(field) {
            None => {
                self.issues.push("invalid_type", field, "Required");
                None
            }
            Some(v) => self.coerce_str(field, v),
        }
    }

    pub fn optional_str(&mut self, field: &str) -> Option<String> {
        let v = self.get(field)?;
        self.coerce_str(field, v)
    }

    fn coerce_str(&mut self, field: &str, v: &Value) -> Option<String> {
        match v.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.issues
                    .push("invalid_type", field, "Expected string");
                None
            }
        }
    }

    pub fn required_int(&mut self, field: &str) -> Option<i64> {
        match self.get(field) {
            None => {
                self.issues.push("invalid_type", field, "Required");
                None
            }
            Some(v) => self.coerce_int(field, v),
        }
    }

    pub fn optional_int(&mut self, field: &str) -> Option<i64> {
        let v = self.get(field)?;
        self.coerce_int(field, v)
    }

    fn coerce_int(&mut self, field: &str, v: &Value) -> Option<i64> {
        match v.as_i64() {
            Some(n) => Some(n),
            None => {
                self.issues
                    .push("invalid_type", field, "Expected integer");
                None
            }
        }
    }

    pub fn required_date(&mut self, field: &str) -> Option<NaiveDate> {
        match self.get(field) {
            None => {
                self.issues.push("invalid_type", field, "Required");
                None
            }
            Some(v) => self.coerce_date(field, v),
        }
    }

    pub fn optional_date(&mut self, field: &str) -> Option<NaiveDate> {
        let v = self.get(field)?;
        self.coerce_date(field, v)
    }

    fn coerce_date(&mut self, field: &str, v: &Value) -> Option<NaiveDate> {
        let parsed = v.as_str().and_then(parse_date);
        if parsed.is_none() {
            self.issues.push("invalid_date", field, "Expected date");
        }
        parsed
    }

    pub fn finish(self) -> Result<(), ApiError> {
        self.issues.into_result()
    }
}

/// Accepts plain dates and RFC 3339 timestamps.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

pub fn check_len(issues: &mut Issues, field: &str, value: &str, min: usize, max: usize) {
    let len = value.chars().count();
    if len < min {
        issues.push(
            "too_small",
            field,
            format!("String must contain at least {min} character(s)"),
        );
    } else if len > max {
        issues.push(
            "too_big",
            field,
            format!("String must contain at most {max} character(s)"),
        );
    }
}

pub fn check_positive(issues: &mut Issues, field: &str, value: i64, message: &str) {
    if value <= 0 {
        issues.push("too_small", field, message);
    }
}

pub fn check_min(issues: &mut Issues, field: &str, value: i64, min: i64) {
    if value < min {
        issues.push(
            "too_small",
            field,
            format!("Number must be greater than or equal to {min}"),
        );
    }
}

pub fn check_enum(issues: &mut Issues, field: &str, value: &str, allowed: &[&str]) {
    if !allowed.contains(&value) {
        issues.push(
            "invalid_value",
            field,
            format!("Invalid option: expected one of {}", allowed.join(" | ")),
        );
    }
}

pub fn check_email(issues: &mut Issues, field: &str, value: &str) {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        issues.push("invalid_format", field, "Invalid email");
    }
}

pub fn check_url(issues: &mut Issues, field: &str, value: &str) {
    if url::Url::parse(value).is_err() {
        issues.push("invalid_format", field, "Invalid url");
    }
}

/// Path ids are positive integers; anything else is a validation failure,
/// not a routing miss.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let mut issues = Issues::new();
            issues.push("invalid_type", "id", "ID must be a positive integer");
            Err(ApiError::validation(issues.0))
        }
    }
}

impl Issues {
    pub fn into_inner(self) -> Vec<Issue> {
        self.0
    }
}
