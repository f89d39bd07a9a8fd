//! `globals` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from environment and flags.
//! - Dispatch subcommands to the core globals page actions.
//! - Exit non-zero when a mutation reports failure.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use globals_core::db::open_db;
use globals_core::{
    init_logging, GlobalService, GlobalServiceError, GlobalsConfig, GlobalsPage,
    SqliteGlobalRepository, EMPTY_STATE_MESSAGE,
};
use std::io::Write;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli, GlobalsConfig::from_env());
    let stdout = std::io::stdout();
    run(cli.command, &config, &mut stdout.lock())
}

fn resolve_config(cli: &Cli, mut config: GlobalsConfig) -> GlobalsConfig {
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    config
}

fn run(command: Command, config: &GlobalsConfig, out: &mut impl Write) -> Result<()> {
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let repo = SqliteGlobalRepository::try_new(&conn)?;
    let page = GlobalsPage::new(GlobalService::new(repo));

    let outcome = match command {
        Command::List { json } => {
            let view = page.load()?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&view.rows)?)?;
            } else if view.is_empty() {
                writeln!(out, "{EMPTY_STATE_MESSAGE}")?;
            } else {
                for global in &view.rows {
                    writeln!(out, "{}\t{}", global.key, global.value)?;
                }
            }
            return Ok(());
        }
        Command::Get { key, json } => {
            let Some(global) = page.service().get_global(&key)? else {
                return Err(GlobalServiceError::GlobalNotFound(key).into());
            };
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&global)?)?;
            } else {
                writeln!(out, "{}", global.value)?;
            }
            return Ok(());
        }
        Command::Add { key, value } => page.add(&key, &value),
        Command::Update { key, value } => page.update(&key, &value),
        Command::Delete { key } => page.delete(&key),
    };

    if !outcome.ok {
        bail!(outcome.message);
    }
    writeln!(out, "{}", outcome.message)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{resolve_config, run};
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use globals_core::{GlobalServiceError, GlobalsConfig};
    use std::path::PathBuf;

    fn config_in(dir: &tempfile::TempDir) -> GlobalsConfig {
        GlobalsConfig {
            db_path: dir.path().join("globals.db"),
            ..GlobalsConfig::default()
        }
    }

    fn run_to_string(command: Command, config: &GlobalsConfig) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(command, config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_subcommands_and_global_flags() {
        let cli = Cli::try_parse_from(["globals", "add", "A", "1", "--db", "/tmp/x.db"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Add {
                key: "A".to_string(),
                value: "1".to_string(),
            }
        );
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));

        assert!(Cli::try_parse_from(["globals", "update", "A"]).is_err());
    }

    #[test]
    fn flags_override_environment_config() {
        let cli = Cli::try_parse_from([
            "globals",
            "--db",
            "/data/g.db",
            "--log-level",
            "warn",
            "list",
        ])
        .unwrap();
        let config = resolve_config(&cli, GlobalsConfig::default());
        assert_eq!(config.db_path, PathBuf::from("/data/g.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn add_list_update_delete_through_commands() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let listed = run_to_string(Command::List { json: false }, &config).unwrap();
        assert_eq!(listed.trim(), "No globals found. Add one to get started.");

        let added = run_to_string(
            Command::Add {
                key: "A".to_string(),
                value: "1".to_string(),
            },
            &config,
        )
        .unwrap();
        assert_eq!(added.trim(), "Global added successfully");

        run_to_string(
            Command::Update {
                key: "A".to_string(),
                value: "2".to_string(),
            },
            &config,
        )
        .unwrap();
        let value = run_to_string(
            Command::Get {
                key: "A".to_string(),
                json: false,
            },
            &config,
        )
        .unwrap();
        assert_eq!(value.trim(), "2");

        let json = run_to_string(Command::List { json: true }, &config).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(rows, serde_json::json!([{ "key": "A", "value": "2" }]));

        run_to_string(
            Command::Delete {
                key: "A".to_string(),
            },
            &config,
        )
        .unwrap();
        let err = run_to_string(
            Command::Get {
                key: "A".to_string(),
                json: false,
            },
            &config,
        )
        .unwrap_err();
        assert!(err.to_string().contains("No global with key \"A\""));
        assert!(matches!(
            err.downcast_ref::<GlobalServiceError>(),
            Some(GlobalServiceError::GlobalNotFound(key)) if key == "A"
        ));
    }

    #[test]
    fn duplicate_add_returns_error_with_message() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let add = || Command::Add {
            key: "A".to_string(),
            value: "1".to_string(),
        };

        run_to_string(add(), &config).unwrap();
        let err = run_to_string(add(), &config).unwrap_err();
        assert_eq!(err.to_string(), "A global with key \"A\" already exists");
    }
}
