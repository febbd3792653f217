//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD access to the `users` table.
//! - Report absence as empty results; the user service decides which
//!   operations treat absence as an error.
//!
//! # Invariants
//! - `login` uniqueness is backed by a UNIQUE constraint; violation surfaces
//!   as `RepoError::Duplicate` regardless of any service-level pre-check.
//! - Row order of `all_users` follows insertion order (`user_id`).

use crate::model::user::User;
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT user_id, login, password, description FROM users";

/// Repository interface for user persistence.
pub trait UserRepository {
    fn all_users(&self) -> RepoResult<Vec<User>>;
    fn user_by_id(&self, id: i64) -> RepoResult<Option<User>>;
    fn user_by_login(&self, login: &str) -> RepoResult<Option<User>>;
    /// Inserts a user and returns the store-assigned id.
    fn add_user(&self, user: &User) -> RepoResult<i64>;
    /// Full-row replace; returns the affected-row count (0 or 1).
    fn update_user(&self, user: &User) -> RepoResult<usize>;
    /// Returns the affected-row count (0 or 1).
    fn delete_user(&self, id: i64) -> RepoResult<usize>;
    fn count_users_with_login(&self, login: &str) -> RepoResult<i64>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["users"])?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn all_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY user_id;"))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }
        Ok(users)
    }

    fn user_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE user_id = ?1;"))?;
        let user = stmt
            .query_row(params![id], |row| Ok(parse_user_row(row)))
            .optional()?
            .transpose()?;
        Ok(user)
    }

    fn user_by_login(&self, login: &str) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE login = ?1;"))?;
        let user = stmt
            .query_row(params![login], |row| Ok(parse_user_row(row)))
            .optional()?
            .transpose()?;
        Ok(user)
    }

    fn add_user(&self, user: &User) -> RepoResult<i64> {
        self.conn.execute(
            "INSERT INTO users (login, password, description) VALUES (?1, ?2, ?3);",
            params![
                user.login.as_str(),
                user.password.as_str(),
                user.description.as_deref(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_user(&self, user: &User) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE users
             SET login = ?1, password = ?2, description = ?3
             WHERE user_id = ?4;",
            params![
                user.login.as_str(),
                user.password.as_str(),
                user.description.as_deref(),
                user.id,
            ],
        )?;
        Ok(changed)
    }

    fn delete_user(&self, id: i64) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE user_id = ?1;", params![id])?;
        Ok(changed)
    }

    fn count_users_with_login(&self, login: &str) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM users WHERE login = ?1;",
            params![login],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        id: Some(row.get("user_id")?),
        login: row.get("login")?,
        password: row.get("password")?,
        description: row.get("description")?,
    })
}
