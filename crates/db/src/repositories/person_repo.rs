//! Repository for the `persons` table.

use padron_core::types::DbId;
use sqlx::PgPool;

use crate::models::person::{Person, PersonInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, id_number, check_digit, full_name, email, is_active, created_at, updated_at";

/// Name of the unique constraint on `persons.email`.
pub const UQ_PERSONS_EMAIL: &str = "uq_persons_email";

/// Name of the unique constraint on the `(id_number, check_digit)` pair.
pub const UQ_PERSONS_NATIONAL_ID: &str = "uq_persons_national_id";

/// Provides CRUD operations for persons.
pub struct PersonRepo;

impl PersonRepo {
    /// List all persons ordered by id ascending.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM persons ORDER BY id");
        sqlx::query_as::<_, Person>(&query).fetch_all(pool).await
    }

    /// Find a person by internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM persons WHERE id = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether any person already uses `email` (exact match; callers pass
    /// the normalized lowercase form).
    pub async fn exists_by_email(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM persons WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Whether a person other than `excluded_id` already uses `email`.
    pub async fn exists_by_email_excluding_id(
        pool: &PgPool,
        email: &str,
        excluded_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM persons WHERE email = $1 AND id <> $2)",
        )
        .bind(email)
        .bind(excluded_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Whether the `(id_number, check_digit)` pair is already registered.
    pub async fn exists_by_national_id(
        pool: &PgPool,
        id_number: i64,
        check_digit: &str,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM persons WHERE id_number = $1 AND check_digit = $2)",
        )
        .bind(id_number)
        .bind(check_digit)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Whether a person other than `excluded_id` already holds the
    /// `(id_number, check_digit)` pair.
    pub async fn exists_by_national_id_excluding_id(
        pool: &PgPool,
        id_number: i64,
        check_digit: &str,
        excluded_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM persons \
             WHERE id_number = $1 AND check_digit = $2 AND id <> $3)",
        )
        .bind(id_number)
        .bind(check_digit)
        .bind(excluded_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Insert a new person, returning the created row with the
    /// store-assigned id, active default and timestamps.
    pub async fn insert(pool: &PgPool, input: &PersonInput) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO persons (id_number, check_digit, full_name, email)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(input.id_number)
            .bind(&input.check_digit)
            .bind(&input.full_name)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Replace the identifier, name and email of the person at `id`.
    ///
    /// Returns `true` when exactly one row changed.
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        input: &PersonInput,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE persons SET id_number = $2, check_digit = $3, full_name = $4, email = $5
             WHERE id = $1",
        )
        .bind(id)
        .bind(input.id_number)
        .bind(&input.check_digit)
        .bind(&input.full_name)
        .bind(&input.email)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Set the active flag of the person at `id`.
    ///
    /// Returns `true` when exactly one row changed.
    pub async fn update_active_flag(
        pool: &PgPool,
        id: DbId,
        active: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE persons SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
