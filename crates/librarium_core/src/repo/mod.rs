//! Store adapter layer: repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts for the service layer.
//! - Keep SQL details inside the persistence boundary.
//! - Map SQLite constraint failures to semantic error kinds.
//!
//! # Invariants
//! - Absence is reported as `Ok(None)` or an affected-count of `0`, never as
//!   an error; services decide which operations treat absence as a failure.
//! - Duplicate-key and foreign-key violations surface as distinct
//!   `RepoError` variants, not as opaque database errors.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::db::migrations::latest_version;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author_repo;
pub mod book_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence-layer error shared by all repositories.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Unique-constraint violation (duplicate login, duplicate title, ...).
    Duplicate(String),
    /// Foreign-key violation (deleting an author that still has books, ...).
    ForeignKey(String),
    /// The connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// The schema version matches but a required table is absent.
    MissingRequiredTable(&'static str),
    /// A persisted row failed to parse back into a domain record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Duplicate(detail) => write!(f, "duplicate key: {detail}"),
            Self::ForeignKey(detail) => write!(f, "foreign key constraint violated: {detail}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match required {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::InvalidData(message) => write!(f, "invalid persisted row: {message}"),
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
        if let rusqlite::Error::SqliteFailure(code, ref message) = value {
            let detail = || {
                message
                    .clone()
                    .unwrap_or_else(|| "constraint violation".to_string())
            };
            match code.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return Self::Duplicate(detail());
                }
                rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return Self::ForeignKey(detail());
                }
                _ => {}
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Verifies that a connection has been migrated and carries the tables a
/// repository depends on. Called by every repository constructor.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    required_tables: &[&'static str],
) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in required_tables.iter().copied() {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

/// Parses an ISO-8601 date column, rejecting malformed persisted values.
pub(crate) fn parse_date_column(text: &str, column: &str) -> RepoResult<NaiveDate> {
    text.parse().map_err(|_| {
        RepoError::InvalidData(format!("invalid date value `{text}` in {column}"))
    })
}

/// Serializes a date for TEXT storage. ISO-8601 keeps lexicographic and
/// chronological order in agreement, which period queries rely on.
pub(crate) fn date_to_db(date: NaiveDate) -> String {
    date.to_string()
}
