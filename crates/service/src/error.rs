//! Service-level error type.

use padron_core::error::CoreError;

use crate::store::StoreError;

/// Error type for service operations.
///
/// Wraps [`CoreError`] for domain outcomes (validation failures,
/// duplicates) and [`StoreError`] for infrastructure failures. A missing
/// record is neither: lookups return `Option` and writes report `bool`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A domain-level error from `padron_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A record store failure, fatal for the current operation only.
    ///
    /// No `#[from]` conversion; write paths route store errors through
    /// the constraint translation before they surface here.
    #[error("Store error: {0}")]
    Store(#[source] StoreError),
}

/// Convenience type alias for service return values.
pub type ServiceResult<T> = Result<T, ServiceError>;
