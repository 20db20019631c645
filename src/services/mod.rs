//! Per-resource business rules.
//!
//! Every service resolves the target resource (or its nearest owned
//! ancestor) through an owner-scoped lookup before mutating anything. The
//! guards below are the only two ways a lookup result becomes a failure.

pub mod leases;
pub mod payments;
pub mod properties;
pub mod property_images;
pub mod tenants;
pub mod units;

use crate::error::ApiError;

/// Ownership guard: an absent lookup result means "not found", whether the
/// row is missing or belongs to another owner. Always 404, never 403 -
/// a 403 would reveal that the resource exists.
pub fn ensure_found<T>(value: Option<T>, resource: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::not_found(format!("{resource} not found")))
}

/// A write that returned no row is an unexpected failure: the target was
/// already confirmed to exist and be owned.
pub fn ensure_persisted<T>(value: Option<T>, action: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::internal(format!("Failed to {action}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn absent_lookup_is_not_found() {
        let err = ensure_found(None::<i32>, "Lease").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Lease not found");
        assert_eq!(ensure_found(Some(7), "Lease").unwrap(), 7);
    }

    #[test]
    fn absent_write_result_is_internal() {
        let err = ensure_persisted(None::<i32>, "update lease").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Failed to update lease");
    }
}
