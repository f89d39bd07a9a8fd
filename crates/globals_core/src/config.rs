//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path and logging settings for entry points.
//! - Keep defaults in one place so CLI and embedders agree.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; level/dir validation happens in `init_logging`.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "GLOBALS_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "GLOBALS_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "GLOBALS_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "globals.sqlite3";

/// Resolved settings for opening the store and starting logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalsConfig {
    /// SQLite file holding the `globals` table.
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging is off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl GlobalsConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}

impl Default for GlobalsConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{GlobalsConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = GlobalsConfig::default();
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("globals.sqlite3")
        );
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn explicit_values_are_trimmed_and_used() {
        let config = GlobalsConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, " /var/lib/globals.db "),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/var/log/globals"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/var/lib/globals.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/globals")));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = GlobalsConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, "   "),
            (LOG_DIR_ENV, ""),
        ]));
        assert_eq!(config, GlobalsConfig::default());
    }
}
