//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for globals.
//! - Isolate SQLite query details from the service layer.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`,
//!   `ConstraintViolation`) in addition to DB transport errors.

pub mod global_repo;
