//! Validation and orchestration layer for person records.
//!
//! Sits between front-ends and the record store. [`PersonService`] validates
//! and normalizes operator input, runs duplicate pre-checks for precise
//! error messages, and maps store-level constraint violations onto the same
//! duplicate errors, so the outcome reads identically whichever side of a
//! write race a caller lands on.

pub mod error;
pub mod service;
pub mod store;

pub use error::{ServiceError, ServiceResult};
pub use service::PersonService;
pub use store::{PersonStore, PgStore, StoreError};
