//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every query binds its
//! values as parameters; no value is ever spliced into SQL text.

pub mod person_repo;

pub use person_repo::PersonRepo;
