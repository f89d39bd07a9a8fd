//! Page-level actions that turn service outcomes into notifications.
//!
//! # Responsibility
//! - Load the rows shown by the globals listing.
//! - Run add/update/delete and report success or failure as an
//!   `ActionOutcome` instead of an error value.
//!
//! # Invariants
//! - Add/update submissions with a blank key or value are refused before the
//!   service is called, mirroring the form's own guard.
//! - Failure messages are the service error's user-facing display text.
//! - A successful outcome means the next `load()` reflects the mutation.

use crate::model::global::Global;
use crate::repo::global_repo::GlobalRepository;
use crate::service::global_service::{GlobalService, GlobalServiceError, GlobalServiceResult};
use serde::{Deserialize, Serialize};

/// Text shown when no globals are stored.
pub const EMPTY_STATE_MESSAGE: &str = "No globals found. Add one to get started.";

/// Mutation kinds exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalAction {
    Add,
    Update,
    Delete,
}

impl GlobalAction {
    fn success_message(self) -> &'static str {
        match self {
            Self::Add => "Global added successfully",
            Self::Update => "Global updated successfully",
            Self::Delete => "Global deleted successfully",
        }
    }
}

/// Success/failure notification for one mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub ok: bool,
    pub action: GlobalAction,
    pub message: String,
}

impl ActionOutcome {
    fn from_result<T>(action: GlobalAction, result: GlobalServiceResult<T>) -> Self {
        match result {
            Ok(_) => Self {
                ok: true,
                action,
                message: action.success_message().to_string(),
            },
            Err(err) => Self {
                ok: false,
                action,
                message: err.to_string(),
            },
        }
    }
}

/// Snapshot of the globals listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalsView {
    pub rows: Vec<Global>,
}

impl GlobalsView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Globals page backed by a `GlobalService`.
pub struct GlobalsPage<R: GlobalRepository> {
    service: GlobalService<R>,
}

impl<R: GlobalRepository> GlobalsPage<R> {
    pub fn new(service: GlobalService<R>) -> Self {
        Self { service }
    }

    /// Reads the current rows.
    pub fn load(&self) -> GlobalServiceResult<GlobalsView> {
        Ok(GlobalsView {
            rows: self.service.list_globals()?,
        })
    }

    /// Submits the add form. Blank key or value is refused.
    pub fn add(&self, key: &str, value: &str) -> ActionOutcome {
        let result =
            check_submission(key, value).and_then(|()| self.service.add_global(key, value));
        ActionOutcome::from_result(GlobalAction::Add, result)
    }

    /// Submits the edit form. Blank key or value is refused.
    pub fn update(&self, key: &str, value: &str) -> ActionOutcome {
        let result =
            check_submission(key, value).and_then(|()| self.service.update_global(key, value));
        ActionOutcome::from_result(GlobalAction::Update, result)
    }

    pub fn delete(&self, key: &str) -> ActionOutcome {
        ActionOutcome::from_result(GlobalAction::Delete, self.service.delete_global(key))
    }

    /// Borrows the underlying service for direct lookups.
    pub fn service(&self) -> &GlobalService<R> {
        &self.service
    }
}

fn check_submission(key: &str, value: &str) -> GlobalServiceResult<()> {
    Global::new(key, value)
        .validate()
        .map_err(GlobalServiceError::from)
}
