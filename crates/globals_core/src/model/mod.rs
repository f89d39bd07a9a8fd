//! Domain model for key/value globals.
//!
//! # Invariants
//! - At most one global exists per key.
//! - Deletion is permanent; there are no tombstones or versions.

pub mod global;
