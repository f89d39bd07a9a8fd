//! Global repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide durable CRUD APIs over the `globals` table.
//! - Keep SQL details inside the persistence boundary.
//! - Classify storage failures so callers can tell duplicates from outages.
//!
//! # Invariants
//! - Keys and values are stored verbatim; any text is accepted.
//! - `create_global` never overwrites; the primary key constraint rejects
//!   duplicates even when an application-level check raced.
//! - `update_global` only changes `value`; the key is never rewritten.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::global::Global;
use log::debug;
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const GLOBAL_SELECT_SQL: &str = "SELECT key, value FROM globals";
const GLOBALS_TABLE: &str = "globals";
const GLOBALS_COLUMNS: [&str; 2] = ["key", "value"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for global persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Storage rejected the write through a uniqueness/not-null constraint.
    ConstraintViolation { key: String },
    /// Update targeted a key with no stored global.
    NotFound(String),
    /// Connection was not bootstrapped through `open_db*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Transport or storage failure.
    Db(DbError),
}

impl RepoError {
    /// Returns whether the caller may retry the same operation unchanged.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Db(err) => err.is_transient(),
            _ => false,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConstraintViolation { key } => write!(
                f,
                "A global with key \"{key}\" conflicts with an existing entry"
            ),
            Self::NotFound(key) => write!(f, "No global with key \"{key}\" exists"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for global CRUD operations.
pub trait GlobalRepository {
    fn get_global(&self, key: &str) -> RepoResult<Option<Global>>;
    fn list_globals(&self) -> RepoResult<Vec<Global>>;
    fn create_global(&self, global: &Global) -> RepoResult<Global>;
    fn update_global(&self, global: &Global) -> RepoResult<Global>;
    fn delete_global(&self, key: &str) -> RepoResult<()>;
}

/// SQLite-backed global repository.
pub struct SqliteGlobalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGlobalRepository<'conn> {
    /// Wraps a connection after checking its schema is fully migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_globals_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl GlobalRepository for SqliteGlobalRepository<'_> {
    fn get_global(&self, key: &str) -> RepoResult<Option<Global>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GLOBAL_SELECT_SQL} WHERE key = ?1;"))?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_global_row(row)?));
        }

        Ok(None)
    }

    fn list_globals(&self) -> RepoResult<Vec<Global>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GLOBAL_SELECT_SQL} ORDER BY key ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut globals = Vec::new();

        while let Some(row) = rows.next()? {
            globals.push(parse_global_row(row)?);
        }

        debug!(
            "event=globals_list module=repo status=ok count={}",
            globals.len()
        );
        Ok(globals)
    }

    fn create_global(&self, global: &Global) -> RepoResult<Global> {
        let inserted = self.conn.execute(
            "INSERT INTO globals (key, value) VALUES (?1, ?2);",
            params![global.key.as_str(), global.value.as_str()],
        );

        match inserted {
            Ok(_) => Ok(global.clone()),
            Err(err) if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
                debug!(
                    "event=global_create module=repo status=error error_code=constraint_violation key_chars={}",
                    global.key.chars().count()
                );
                Err(RepoError::ConstraintViolation {
                    key: global.key.clone(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_global(&self, global: &Global) -> RepoResult<Global> {
        let changed = self.conn.execute(
            "UPDATE globals SET value = ?2 WHERE key = ?1;",
            params![global.key.as_str(), global.value.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(global.key.clone()));
        }

        Ok(global.clone())
    }

    fn delete_global(&self, key: &str) -> RepoResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM globals WHERE key = ?1;", [key])?;
        debug!("event=global_delete module=repo status=ok removed={removed}");
        Ok(())
    }
}

fn parse_global_row(row: &Row<'_>) -> RepoResult<Global> {
    Ok(Global {
        key: row.get("key")?,
        value: row.get("value")?,
    })
}

fn ensure_globals_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, GLOBALS_TABLE)? {
        return Err(RepoError::MissingRequiredTable(GLOBALS_TABLE));
    }

    for column in GLOBALS_COLUMNS {
        if !table_has_column(conn, GLOBALS_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: GLOBALS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
