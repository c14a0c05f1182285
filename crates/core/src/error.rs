//! Domain error taxonomy.
//!
//! Only rule violations live here. "Not found" is not an error in this
//! system: callers receive it as an `Option`/`bool` result and branch on
//! it explicitly.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A field or format rule failed. Raised before any store access, and
    /// always recoverable by re-prompting the operator.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A unique value (email, or the national-identifier pair) is already
    /// taken, whether caught by a pre-check or translated from the store's
    /// own constraint violation.
    #[error("Duplicate: {0}")]
    Duplicate(String),
}
