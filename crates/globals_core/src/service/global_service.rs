//! Global use-case service.
//!
//! # Responsibility
//! - Provide the add/update/delete/list entry points used by callers.
//! - Enforce application preconditions the store does not check.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Precondition failures are raised before any storage mutation.
//! - Keys and values are passed to storage verbatim; any text is accepted.
//! - `add_global` checks for an existing key first, but the storage primary
//!   key stays the authoritative guard: a racing insert surfaces as
//!   `RepoError::ConstraintViolation`.
//! - Display text never carries storage internals; those stay in `source()`
//!   and the `warn!` line.

use crate::model::global::{Global, GlobalValidationError};
use crate::repo::global_repo::{GlobalRepository, RepoError};
use log::{log, Level};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Shown in place of transport, schema and other storage failures.
pub const STORAGE_UNAVAILABLE_MESSAGE: &str = "Storage is unavailable, please try again";

pub type GlobalServiceResult<T> = Result<T, GlobalServiceError>;

/// Service error for global use-cases.
///
/// Display text is shown to end users as-is.
#[derive(Debug)]
pub enum GlobalServiceError {
    /// Key or value failed input validation.
    InvalidInput(GlobalValidationError),
    /// `add_global` found an existing global with the same key.
    DuplicateKey(String),
    /// `update_global` targeted a key with no stored global.
    GlobalNotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl GlobalServiceError {
    /// Returns whether retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Repo(err) => err.is_retryable(),
            _ => false,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::DuplicateKey(_) => "duplicate_key",
            Self::GlobalNotFound(_) => "not_found",
            Self::Repo(RepoError::ConstraintViolation { .. }) => "constraint_violation",
            Self::Repo(_) => "storage_failure",
        }
    }

    /// Storage-side detail kept out of `Display`.
    fn storage_detail(&self) -> Option<&RepoError> {
        match self {
            Self::Repo(RepoError::ConstraintViolation { .. }) => None,
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for GlobalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::DuplicateKey(key) => write!(f, "A global with key \"{key}\" already exists"),
            Self::GlobalNotFound(key) => write!(f, "No global with key \"{key}\" exists"),
            Self::Repo(err @ RepoError::ConstraintViolation { .. }) => write!(f, "{err}"),
            Self::Repo(_) => write!(f, "{STORAGE_UNAVAILABLE_MESSAGE}"),
        }
    }
}

impl Error for GlobalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for GlobalServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(key) => Self::GlobalNotFound(key),
            other => Self::Repo(other),
        }
    }
}

impl From<GlobalValidationError> for GlobalServiceError {
    fn from(value: GlobalValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

/// Use-case service wrapper for global CRUD operations.
pub struct GlobalService<R: GlobalRepository> {
    repo: R,
}

impl<R: GlobalRepository> GlobalService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every stored global, ordered by key.
    pub fn list_globals(&self) -> GlobalServiceResult<Vec<Global>> {
        Ok(self.repo.list_globals()?)
    }

    /// Gets one global by key, or `None` when absent.
    pub fn get_global(&self, key: &str) -> GlobalServiceResult<Option<Global>> {
        Ok(self.repo.get_global(key)?)
    }

    /// Adds a new global.
    ///
    /// Fails with `DuplicateKey` without writing when `key` already exists.
    pub fn add_global(&self, key: &str, value: &str) -> GlobalServiceResult<Global> {
        let global = Global::new(key, value);
        let result = self.add_checked(&global);
        log_outcome("global_add", &global.key, &result);
        result
    }

    /// Replaces the value of an existing global.
    ///
    /// Fails with `GlobalNotFound` when nothing is stored under `key`.
    pub fn update_global(&self, key: &str, value: &str) -> GlobalServiceResult<Global> {
        let global = Global::new(key, value);
        let result = self
            .repo
            .update_global(&global)
            .map_err(GlobalServiceError::from);
        log_outcome("global_update", &global.key, &result);
        result
    }

    /// Deletes a global. Deleting an absent key succeeds.
    pub fn delete_global(&self, key: &str) -> GlobalServiceResult<()> {
        let result = self.repo.delete_global(key).map_err(GlobalServiceError::from);
        log_outcome("global_delete", key, &result);
        result
    }

    fn add_checked(&self, global: &Global) -> GlobalServiceResult<Global> {
        if self.repo.get_global(&global.key)?.is_some() {
            return Err(GlobalServiceError::DuplicateKey(global.key.clone()));
        }

        Ok(self.repo.create_global(global)?)
    }
}

fn log_outcome<T>(event: &str, key: &str, result: &GlobalServiceResult<T>) {
    let (level, line) = outcome_line(event, key, result);
    log!(level, "{line}");
}

/// Formats the outcome line; only the key length is recorded, never text.
fn outcome_line<T>(event: &str, key: &str, result: &GlobalServiceResult<T>) -> (Level, String) {
    let key_chars = key.chars().count();
    match result {
        Ok(_) => (
            Level::Info,
            format!("event={event} module=service status=ok key_chars={key_chars}"),
        ),
        Err(err) => {
            let mut line = format!(
                "event={event} module=service status=error key_chars={key_chars} error_code={} retryable={}",
                err.code(),
                err.is_retryable()
            );
            if let Some(detail) = err.storage_detail() {
                line.push_str(&format!(" error={detail}"));
            }
            (Level::Warn, line)
        }
    }
}
