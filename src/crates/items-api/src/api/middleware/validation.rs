//! Request validation utilities

use crate::api::error::{ApiError, ApiResult};

/// Require a field to be present and non-empty
///
/// Only emptiness is checked; length limits are left to the store.
pub fn validate_required<'a>(value: Option<&'a str>, field_name: &str) -> ApiResult<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!("{} is required", field_name))),
    }
}
