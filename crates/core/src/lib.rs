//! Padron domain core.
//!
//! Pure business rules for the person registry: the national-identifier
//! parser, field validation and normalization, and the domain error
//! taxonomy. This crate has no database or async dependencies.

pub mod error;
pub mod identifier;
pub mod person;
pub mod types;
