//! Global key/value record.
//!
//! # Responsibility
//! - Define the record shape shared by storage, services and callers.
//! - Provide the blank-input check applied to page form submissions.
//!
//! # Invariants
//! - `key` identifies the record and is never rewritten once stored.
//! - `value` is replaced in full on update.
//! - Storage accepts any key/value text; only page submissions are checked.
//! - Key and value text is kept verbatim; the check never trims it.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-held copy of one persisted global.
///
/// Values returned from reads are snapshots and are not kept in sync with
/// later store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Global {
    pub key: String,
    pub value: String,
}

/// Form input rejected before any storage access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalValidationError {
    EmptyKey,
    EmptyValue,
}

impl Display for GlobalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "Key cannot be empty"),
            Self::EmptyValue => write!(f, "Value cannot be empty"),
        }
    }
}

impl Error for GlobalValidationError {}

impl Global {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Checks that both key and value carry non-whitespace text.
    pub fn validate(&self) -> Result<(), GlobalValidationError> {
        if self.key.trim().is_empty() {
            return Err(GlobalValidationError::EmptyKey);
        }
        if self.value.trim().is_empty() {
            return Err(GlobalValidationError::EmptyValue);
        }
        Ok(())
    }
}
