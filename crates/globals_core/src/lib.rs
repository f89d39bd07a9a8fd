//! Core key/value globals management.
//! This crate owns the persisted globals and every rule applied to them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::GlobalsConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::global::{Global, GlobalValidationError};
pub use repo::global_repo::{GlobalRepository, RepoError, RepoResult, SqliteGlobalRepository};
pub use service::global_actions::{
    ActionOutcome, GlobalAction, GlobalsPage, GlobalsView, EMPTY_STATE_MESSAGE,
};
pub use service::global_service::{
    GlobalService, GlobalServiceError, GlobalServiceResult, STORAGE_UNAVAILABLE_MESSAGE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
