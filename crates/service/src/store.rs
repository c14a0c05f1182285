//! Record store abstraction over the `persons` table.
//!
//! [`PersonStore`] is the seam between the service and persistence.
//! [`PgStore`] is the production PostgreSQL implementation; tests drive the
//! service with an in-memory substitute instead.

use std::future::Future;

use padron_core::types::DbId;
use padron_db::models::person::{Person, PersonInput};
use padron_db::repositories::PersonRepo;
use padron_db::DbPool;

/// Error type for record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write violated a named unique constraint (PostgreSQL 23505).
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation {
        /// Name of the violated constraint, `"unknown"` if the driver
        /// did not report one.
        constraint: String,
    },

    /// Any other database failure (connectivity, timeout, bad statement).
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

/// Storage operations required by the person service.
///
/// Every method is a single bounded request against the backing store; no
/// caching happens behind this trait, so each read reflects the store at
/// call time.
pub trait PersonStore: Send + Sync {
    /// All persons ordered by id ascending.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Person>, StoreError>> + Send;

    /// The person with the given id, if any.
    fn find_by_id(
        &self,
        id: DbId,
    ) -> impl Future<Output = Result<Option<Person>, StoreError>> + Send;

    /// Whether `email` (normalized form) is already registered.
    fn exists_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Whether `email` is registered to a person other than `excluded_id`.
    fn exists_by_email_excluding_id(
        &self,
        email: &str,
        excluded_id: DbId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Whether the identifier pair is already registered.
    fn exists_by_national_id(
        &self,
        id_number: i64,
        check_digit: &str,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Whether the identifier pair is registered to a person other than
    /// `excluded_id`.
    fn exists_by_national_id_excluding_id(
        &self,
        id_number: i64,
        check_digit: &str,
        excluded_id: DbId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Insert a new person and return the stored row.
    fn insert(
        &self,
        input: &PersonInput,
    ) -> impl Future<Output = Result<Person, StoreError>> + Send;

    /// Replace the identifier, name and email fields of the person at
    /// `id`. `false` means no row matched.
    fn update_fields(
        &self,
        id: DbId,
        input: &PersonInput,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Set the active flag of the person at `id`. `false` means no row
    /// matched.
    fn update_active_flag(
        &self,
        id: DbId,
        active: bool,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// PostgreSQL-backed [`PersonStore`] delegating to [`PersonRepo`].
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PersonStore for PgStore {
    async fn list_all(&self) -> Result<Vec<Person>, StoreError> {
        PersonRepo::list_all(&self.pool).await.map_err(classify)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Person>, StoreError> {
        PersonRepo::find_by_id(&self.pool, id).await.map_err(classify)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        PersonRepo::exists_by_email(&self.pool, email)
            .await
            .map_err(classify)
    }

    async fn exists_by_email_excluding_id(
        &self,
        email: &str,
        excluded_id: DbId,
    ) -> Result<bool, StoreError> {
        PersonRepo::exists_by_email_excluding_id(&self.pool, email, excluded_id)
            .await
            .map_err(classify)
    }

    async fn exists_by_national_id(
        &self,
        id_number: i64,
        check_digit: &str,
    ) -> Result<bool, StoreError> {
        PersonRepo::exists_by_national_id(&self.pool, id_number, check_digit)
            .await
            .map_err(classify)
    }

    async fn exists_by_national_id_excluding_id(
        &self,
        id_number: i64,
        check_digit: &str,
        excluded_id: DbId,
    ) -> Result<bool, StoreError> {
        PersonRepo::exists_by_national_id_excluding_id(
            &self.pool,
            id_number,
            check_digit,
            excluded_id,
        )
        .await
        .map_err(classify)
    }

    async fn insert(&self, input: &PersonInput) -> Result<Person, StoreError> {
        PersonRepo::insert(&self.pool, input).await.map_err(classify)
    }

    async fn update_fields(&self, id: DbId, input: &PersonInput) -> Result<bool, StoreError> {
        PersonRepo::update_fields(&self.pool, id, input)
            .await
            .map_err(classify)
    }

    async fn update_active_flag(&self, id: DbId, active: bool) -> Result<bool, StoreError> {
        PersonRepo::update_active_flag(&self.pool, id, active)
            .await
            .map_err(classify)
    }
}

/// Classify a sqlx error into a [`StoreError`].
///
/// PostgreSQL reports unique constraint violations as error code 23505;
/// those carry the constraint name forward so callers can map them to a
/// specific duplicate error. Everything else stays a database error.
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            return StoreError::UniqueViolation { constraint };
        }
    }
    StoreError::Database(err)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_display_names_the_constraint() {
        let err = StoreError::UniqueViolation {
            constraint: "uq_persons_email".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unique constraint violated: uq_persons_email"
        );
    }

    #[test]
    fn non_database_errors_pass_through_classification() {
        let err = classify(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(_)));
    }
}
