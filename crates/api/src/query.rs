//! Shared query parameter types for API handlers.

use serde::Deserialize;
use tracker_core::store::Page;

use crate::error::AppError;

/// Upper bound on `limit` for every list endpoint.
pub const MAX_LIMIT: i64 = 200;

/// Offset pagination parameters (`?skip=&limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Apply defaults and reject out-of-range values.
    ///
    /// `skip` defaults to 0 and must be non-negative; `limit` defaults to
    /// `default_limit` and must lie in `1..=MAX_LIMIT`.
    pub fn resolve(&self, default_limit: i64) -> Result<Page, AppError> {
        let skip = self.skip.unwrap_or(0);
        if skip < 0 {
            return Err(AppError::BadRequest(format!(
                "skip must be >= 0, got {skip}"
            )));
        }

        let limit = self.limit.unwrap_or(default_limit);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(AppError::BadRequest(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {limit}"
            )));
        }

        Ok(Page::new(skip, limit))
    }
}
