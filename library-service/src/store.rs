//! Store gateway primitives shared by all repositories.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::error::{AppError, AppResult};

/// Failures surfaced by repository implementations.
///
/// These model the document store's own constraints; mutation commands map
/// them to validation errors carrying the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A unique index rejected a duplicate value.
    #[error("duplicate value for unique field {field}: {value}")]
    Duplicate {
        /// Name of the unique field.
        field: &'static str,
        /// The duplicated value.
        value: String,
    },
    /// A document schema constraint rejected a value.
    #[error("constraint violation on {field}: {message}")]
    Constraint {
        /// Name of the constrained field.
        field: &'static str,
        /// Description of the violated constraint.
        message: String,
    },
}

/// Runs a store gateway call under the configured operation deadline.
///
/// Every repository call made by commands and resolvers goes through here;
/// an elapsed deadline surfaces as [`AppError::StoreTimeout`].
pub async fn with_deadline<T, F>(timeout: Duration, call: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_elapsed) => Err(AppError::StoreTimeout),
    }
}
