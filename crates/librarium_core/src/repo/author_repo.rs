//! Author repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD access to the `authors` table.
//! - Answer the catalog aggregates the author service exposes (book count,
//!   average rating).
//!
//! # Invariants
//! - `delete_author` never cascades: join rows in `book_authors` make the
//!   delete fail with `RepoError::ForeignKey`.
//! - `average_rating_of_author` reports an empty aggregate as `None`, not as
//!   `0.0`.
//! - `count_authors_named` assumes `(name, surname)` uniqueness; with
//!   duplicate pairs it counts all of them.

use crate::model::author::Author;
use crate::repo::{date_to_db, ensure_connection_ready, parse_date_column, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT id, name, surname, birth_date FROM authors";

/// Repository interface for author persistence.
pub trait AuthorRepository {
    fn all_authors(&self) -> RepoResult<Vec<Author>>;
    fn author_by_id(&self, id: i64) -> RepoResult<Option<Author>>;
    /// Returns the author that wrote the given book, if any. One book has at
    /// most one author in this model.
    fn author_of_book(&self, book_id: i64) -> RepoResult<Option<Author>>;
    /// Inserts an author and returns the store-assigned id. The caller must
    /// have resolved the birth date; a missing one is invalid here.
    fn add_author(&self, author: &Author) -> RepoResult<i64>;
    /// Full-row replace; returns the affected-row count (0 or 1).
    fn update_author(&self, author: &Author) -> RepoResult<usize>;
    /// Returns the affected-row count; fails with a foreign-key signal when
    /// books still reference the author.
    fn delete_author(&self, id: i64) -> RepoResult<usize>;
    fn count_authors(&self) -> RepoResult<i64>;
    fn count_authors_named(&self, name: &str, surname: &str) -> RepoResult<i64>;
    fn count_books_of_author(&self, author_id: i64) -> RepoResult<i64>;
    fn average_rating_of_author(&self, author_id: i64) -> RepoResult<Option<f64>>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["authors", "book_authors"])?;
        Ok(Self { conn })
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn all_authors(&self) -> RepoResult<Vec<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} ORDER BY id;"))?;
        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }
        Ok(authors)
    }

    fn author_by_id(&self, id: i64) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }
        Ok(None)
    }

    fn author_of_book(&self, book_id: i64) -> RepoResult<Option<Author>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.name, a.surname, a.birth_date
             FROM authors a
             JOIN book_authors ba ON ba.author_id = a.id
             WHERE ba.book_id = ?1;",
        )?;
        let mut rows = stmt.query(params![book_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }
        Ok(None)
    }

    fn add_author(&self, author: &Author) -> RepoResult<i64> {
        let birth_date = author.birth_date.ok_or_else(|| {
            RepoError::InvalidData("author birth_date must be resolved before insert".to_string())
        })?;
        self.conn.execute(
            "INSERT INTO authors (name, surname, birth_date) VALUES (?1, ?2, ?3);",
            params![
                author.name.as_str(),
                author.surname.as_str(),
                date_to_db(birth_date),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_author(&self, author: &Author) -> RepoResult<usize> {
        let birth_date = author.birth_date.ok_or_else(|| {
            RepoError::InvalidData("author birth_date must be resolved before update".to_string())
        })?;
        let changed = self.conn.execute(
            "UPDATE authors
             SET name = ?1, surname = ?2, birth_date = ?3
             WHERE id = ?4;",
            params![
                author.name.as_str(),
                author.surname.as_str(),
                date_to_db(birth_date),
                author.id,
            ],
        )?;
        Ok(changed)
    }

    fn delete_author(&self, id: i64) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", params![id])?;
        Ok(changed)
    }

    fn count_authors(&self) -> RepoResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))?;
        Ok(count)
    }

    fn count_authors_named(&self, name: &str, surname: &str) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM authors WHERE name = ?1 AND surname = ?2;",
            params![name, surname],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn count_books_of_author(&self, author_id: i64) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM book_authors WHERE author_id = ?1;",
            params![author_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn average_rating_of_author(&self, author_id: i64) -> RepoResult<Option<f64>> {
        // SQLite AVG yields a REAL (or NULL for an empty aggregate), so the
        // average keeps floating-point semantics even though ratings are
        // stored as integers.
        let average = self.conn.query_row(
            "SELECT AVG(b.rating)
             FROM books b
             JOIN book_authors ba ON ba.book_id = b.id
             WHERE ba.author_id = ?1;",
            params![author_id],
            |row| row.get(0),
        )?;
        Ok(average)
    }
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let birth_date_text: String = row.get("birth_date")?;
    Ok(Author {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        surname: row.get("surname")?,
        birth_date: Some(parse_date_column(&birth_date_text, "authors.birth_date")?),
    })
}
