//! Field-level validation primitives.
//!
//! Pure functions over a single value; the per-entity [`Validate`] impls in
//! [`crate::models`] compose them. Every check returns the first violation.
//!
//! [`Validate`]: crate::entity::Validate

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Fail with `FieldRequired` when `value` is empty.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::FieldRequired { field });
    }
    Ok(())
}

/// Like [`require_non_empty`], but only for a value that is present.
pub fn require_non_empty_if_present(
    field: &'static str,
    value: Option<&str>,
) -> Result<(), CoreError> {
    match value {
        Some(v) => require_non_empty(field, v),
        None => Ok(()),
    }
}

/// Fail with `InvalidIdentifier` when `id` is not strictly positive.
pub fn require_positive_id(field: &'static str, id: DbId) -> Result<(), CoreError> {
    if id <= 0 {
        return Err(CoreError::InvalidIdentifier { field, id });
    }
    Ok(())
}

pub fn require_positive_id_if_present(
    field: &'static str,
    id: Option<DbId>,
) -> Result<(), CoreError> {
    match id {
        Some(id) => require_positive_id(field, id),
        None => Ok(()),
    }
}

/// Fail with `InvalidField` unless `value` is finite and greater than zero.
pub fn require_positive(field: &'static str, value: f64) -> Result<(), CoreError> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(CoreError::invalid_field(
            field,
            format!("must be greater than 0, got {value}"),
        ));
    }
    Ok(())
}

/// Fail with `InvalidField` when `value` is NaN or infinite.
pub fn require_finite(field: &'static str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::invalid_field(field, "must be a finite number"));
    }
    Ok(())
}

pub fn require_finite_if_present(field: &'static str, value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(v) => require_finite(field, v),
        None => Ok(()),
    }
}

/// Fail with `InvalidField` when `time` is later than `now`.
pub fn require_not_future(
    field: &'static str,
    time: Timestamp,
    now: Timestamp,
) -> Result<(), CoreError> {
    if time > now {
        return Err(CoreError::invalid_field(field, "must not be in the future"));
    }
    Ok(())
}

pub fn require_not_future_if_present(
    field: &'static str,
    time: Option<Timestamp>,
    now: Timestamp,
) -> Result<(), CoreError> {
    match time {
        Some(t) => require_not_future(field, t, now),
        None => Ok(()),
    }
}
