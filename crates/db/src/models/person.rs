//! Person entity model and input DTO.

use padron_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full person row from the `persons` table.
///
/// `id`, `is_active`'s default, `created_at` and `updated_at` are
/// store-assigned; `created_at` never changes after insertion.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    /// Numeric body of the national identifier.
    pub id_number: i64,
    /// Single uppercase check character paired with `id_number`.
    pub check_digit: String,
    pub full_name: String,
    /// Stored lowercased; unique across all persons.
    pub email: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Operator-supplied fields for creating or updating a person.
///
/// Update replaces the whole field set, so one DTO serves both paths. The
/// service validates and normalizes these values before they reach a
/// query; the repository binds them as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonInput {
    pub id_number: i64,
    pub check_digit: String,
    pub full_name: String,
    pub email: String,
}
