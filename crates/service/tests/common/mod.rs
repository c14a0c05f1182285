use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use padron_core::types::DbId;
use padron_db::models::person::{Person, PersonInput};
use padron_service::store::{PersonStore, StoreError};

/// In-memory [`PersonStore`] for driving the service without a database.
///
/// Cloning shares the underlying state, mirroring how the production store
/// clones around a connection pool, so a test can keep one handle for
/// inspection while the service owns the other. The store counts the reads
/// and writes the service issues and can be armed to fail an upcoming
/// call, which is how the constraint-race and infrastructure paths are
/// exercised.
#[derive(Clone, Default)]
pub struct MemStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: Mutex<Vec<Person>>,
    next_id: AtomicI64,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_next: Mutex<Option<StoreError>>,
    fail_next_write: Mutex<Option<StoreError>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row directly, bypassing the service and the counters.
    pub fn seed(&self, id_number: i64, check_digit: &str, full_name: &str, email: &str) -> Person {
        let now = Utc::now();
        let person = Person {
            id: self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            id_number,
            check_digit: check_digit.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.inner.rows.lock().unwrap().push(person.clone());
        person
    }

    /// The stored row with the given id, if any.
    pub fn row(&self, id: DbId) -> Option<Person> {
        self.inner
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Number of read calls the service has issued.
    pub fn read_count(&self) -> usize {
        self.inner.reads.load(Ordering::SeqCst)
    }

    /// Number of write calls the service has issued.
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Arm the store to fail the next call, read or write.
    pub fn arm_failure(&self, err: StoreError) {
        *self.inner.fail_next.lock().unwrap() = Some(err);
    }

    /// Arm the store to fail the next write while reads keep working.
    pub fn arm_write_failure(&self, err: StoreError) {
        *self.inner.fail_next_write.lock().unwrap() = Some(err);
    }

    fn take_failure(&self) -> Option<StoreError> {
        self.inner.fail_next.lock().unwrap().take()
    }

    fn take_write_failure(&self) -> Option<StoreError> {
        self.take_failure()
            .or_else(|| self.inner.fail_next_write.lock().unwrap().take())
    }

    fn count_read(&self) -> Result<(), StoreError> {
        self.inner.reads.fetch_add(1, Ordering::SeqCst);
        match self.take_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn count_write(&self) -> Result<(), StoreError> {
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        match self.take_write_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl PersonStore for MemStore {
    async fn list_all(&self) -> Result<Vec<Person>, StoreError> {
        self.count_read()?;
        let mut rows = self.inner.rows.lock().unwrap().clone();
        rows.sort_by_key(|p| p.id);
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Person>, StoreError> {
        self.count_read()?;
        Ok(self.row(id))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        self.count_read()?;
        Ok(self.inner.rows.lock().unwrap().iter().any(|p| p.email == email))
    }

    async fn exists_by_email_excluding_id(
        &self,
        email: &str,
        excluded_id: DbId,
    ) -> Result<bool, StoreError> {
        self.count_read()?;
        Ok(self
            .inner
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.email == email && p.id != excluded_id))
    }

    async fn exists_by_national_id(
        &self,
        id_number: i64,
        check_digit: &str,
    ) -> Result<bool, StoreError> {
        self.count_read()?;
        Ok(self
            .inner
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.id_number == id_number && p.check_digit == check_digit))
    }

    async fn exists_by_national_id_excluding_id(
        &self,
        id_number: i64,
        check_digit: &str,
        excluded_id: DbId,
    ) -> Result<bool, StoreError> {
        self.count_read()?;
        Ok(self.inner.rows.lock().unwrap().iter().any(|p| {
            p.id_number == id_number && p.check_digit == check_digit && p.id != excluded_id
        }))
    }

    async fn insert(&self, input: &PersonInput) -> Result<Person, StoreError> {
        self.count_write()?;
        let now = Utc::now();
        let person = Person {
            id: self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            id_number: input.id_number,
            check_digit: input.check_digit.clone(),
            full_name: input.full_name.clone(),
            email: input.email.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.inner.rows.lock().unwrap().push(person.clone());
        Ok(person)
    }

    async fn update_fields(&self, id: DbId, input: &PersonInput) -> Result<bool, StoreError> {
        self.count_write()?;
        let mut rows = self.inner.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.id == id) {
            Some(row) => {
                row.id_number = input.id_number;
                row.check_digit = input.check_digit.clone();
                row.full_name = input.full_name.clone();
                row.email = input.email.clone();
                row.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_active_flag(&self, id: DbId, active: bool) -> Result<bool, StoreError> {
        self.count_write()?;
        let mut rows = self.inner.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.id == id) {
            Some(row) => {
                row.is_active = active;
                row.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
