//! Person registration workflows.

use padron_core::error::CoreError;
use padron_core::person::{
    normalize_check_digit, normalize_email, normalize_name, validate_fields, validate_record_id,
};
use padron_core::types::DbId;
use padron_db::models::person::{Person, PersonInput};
use padron_db::repositories::person_repo::{UQ_PERSONS_EMAIL, UQ_PERSONS_NATIONAL_ID};

use crate::error::{ServiceError, ServiceResult};
use crate::store::{PersonStore, StoreError};

// Duplicate messages shared by the pre-checks and the constraint
// translation, so both sides of a write race report identically.
const DUPLICATE_EMAIL: &str = "a person with that email already exists";
const DUPLICATE_NATIONAL_ID: &str = "a person with that national identifier already exists";
const DUPLICATE_EITHER: &str = "a person with that email or national identifier already exists";

/// Validation and orchestration service for person records.
///
/// Generic over the backing [`PersonStore`]; production wires it to
/// [`PgStore`](crate::store::PgStore). Lookups report a missing record as
/// `Ok(None)` and writes as `Ok(false)`, never as an error.
pub struct PersonService<S> {
    store: S,
}

impl<S: PersonStore> PersonService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// List all persons, id ascending.
    pub async fn list(&self) -> ServiceResult<Vec<Person>> {
        self.store.list_all().await.map_err(ServiceError::Store)
    }

    /// Find a person by id.
    pub async fn find_by_id(&self, id: DbId) -> ServiceResult<Option<Person>> {
        validate_record_id(id)?;
        self.store.find_by_id(id).await.map_err(ServiceError::Store)
    }

    /// Register a new person.
    ///
    /// Fields are validated and normalized before any store access, then
    /// checked against both uniqueness rules for a precise error message.
    /// The store constraints remain the authority: a violation raised by
    /// the insert itself is translated into the same duplicate error the
    /// pre-checks produce.
    pub async fn create(&self, input: PersonInput) -> ServiceResult<Person> {
        // 1. Validate the raw fields.
        validate_fields(
            input.id_number,
            &input.check_digit,
            &input.full_name,
            &input.email,
        )?;

        // 2. Normalize into the canonical stored form.
        let input = normalize_input(input);

        // 3. Duplicate pre-checks, email first.
        if self
            .store
            .exists_by_email(&input.email)
            .await
            .map_err(ServiceError::Store)?
        {
            return Err(CoreError::Duplicate(DUPLICATE_EMAIL.to_string()).into());
        }
        if self
            .store
            .exists_by_national_id(input.id_number, &input.check_digit)
            .await
            .map_err(ServiceError::Store)?
        {
            return Err(CoreError::Duplicate(DUPLICATE_NATIONAL_ID.to_string()).into());
        }

        // 4. Insert. A concurrent writer may still win the race between
        //    the pre-checks and this statement.
        self.store.insert(&input).await.map_err(translate_write_error)
    }

    /// Replace the identifier, name and email of an existing person.
    ///
    /// `Ok(false)` means no record with this id exists; that is checked
    /// before the duplicate pre-checks, so a stale id never reports a
    /// duplicate. Uniqueness is checked among all records other than the
    /// one being updated, which lets a person keep their current email.
    pub async fn update(&self, id: DbId, input: PersonInput) -> ServiceResult<bool> {
        validate_record_id(id)?;
        validate_fields(
            input.id_number,
            &input.check_digit,
            &input.full_name,
            &input.email,
        )?;
        let input = normalize_input(input);

        if self
            .store
            .find_by_id(id)
            .await
            .map_err(ServiceError::Store)?
            .is_none()
        {
            return Ok(false);
        }

        if self
            .store
            .exists_by_email_excluding_id(&input.email, id)
            .await
            .map_err(ServiceError::Store)?
        {
            return Err(CoreError::Duplicate(DUPLICATE_EMAIL.to_string()).into());
        }
        if self
            .store
            .exists_by_national_id_excluding_id(input.id_number, &input.check_digit, id)
            .await
            .map_err(ServiceError::Store)?
        {
            return Err(CoreError::Duplicate(DUPLICATE_NATIONAL_ID.to_string()).into());
        }

        self.store
            .update_fields(id, &input)
            .await
            .map_err(translate_write_error)
    }

    /// Flip a person's active flag, whatever its current value.
    ///
    /// Always writes; `Ok(false)` means no record with this id exists.
    pub async fn toggle_active(&self, id: DbId) -> ServiceResult<bool> {
        validate_record_id(id)?;
        let Some(person) = self
            .store
            .find_by_id(id)
            .await
            .map_err(ServiceError::Store)?
        else {
            return Ok(false);
        };

        self.store
            .update_active_flag(id, !person.is_active)
            .await
            .map_err(ServiceError::Store)
    }

    /// Set a person active. Reports success without writing when the
    /// record is already active.
    pub async fn activate(&self, id: DbId) -> ServiceResult<bool> {
        self.set_active(id, true).await
    }

    /// Set a person inactive. Reports success without writing when the
    /// record is already inactive.
    pub async fn deactivate(&self, id: DbId) -> ServiceResult<bool> {
        self.set_active(id, false).await
    }

    async fn set_active(&self, id: DbId, target: bool) -> ServiceResult<bool> {
        validate_record_id(id)?;
        let Some(person) = self
            .store
            .find_by_id(id)
            .await
            .map_err(ServiceError::Store)?
        else {
            return Ok(false);
        };

        if person.is_active == target {
            return Ok(true);
        }
        self.store
            .update_active_flag(id, target)
            .await
            .map_err(ServiceError::Store)
    }
}

/// Normalize operator input into the canonical stored form.
fn normalize_input(input: PersonInput) -> PersonInput {
    PersonInput {
        id_number: input.id_number,
        check_digit: normalize_check_digit(&input.check_digit),
        full_name: normalize_name(&input.full_name),
        email: normalize_email(&input.email),
    }
}

/// Map a write-path store error onto the duplicate error the pre-checks
/// would have produced for the same conflict.
fn translate_write_error(err: StoreError) -> ServiceError {
    match err {
        StoreError::UniqueViolation { constraint } => {
            tracing::warn!(constraint = %constraint, "Write lost a uniqueness race");
            let message = match constraint.as_str() {
                UQ_PERSONS_EMAIL => DUPLICATE_EMAIL,
                UQ_PERSONS_NATIONAL_ID => DUPLICATE_NATIONAL_ID,
                _ => DUPLICATE_EITHER,
            };
            ServiceError::Core(CoreError::Duplicate(message.to_string()))
        }
        other => ServiceError::Store(other),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
