//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD access to the `books` table and its author join rows.
//! - Own the compound write paths (delete-with-join-cleanup, add-and-link)
//!   with single-transaction semantics.
//!
//! # Invariants
//! - `delete_book` removes join rows and the book row inside one
//!   transaction; the returned count reflects the book row only.
//! - `books_in_period` bounds are inclusive on both ends.
//! - `title` uniqueness is enforced by the store, not by callers.

use crate::model::book::Book;
use crate::repo::{date_to_db, ensure_connection_ready, parse_date_column, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, Transaction};

const BOOK_SELECT_SQL: &str = "SELECT id, title, rating, release_date, lang FROM books";

/// Repository interface for book persistence.
pub trait BookRepository {
    fn all_books(&self) -> RepoResult<Vec<Book>>;
    fn book_by_id(&self, id: i64) -> RepoResult<Option<Book>>;
    fn book_by_title(&self, title: &str) -> RepoResult<Option<Book>>;
    fn books_of_author(&self, author_id: i64) -> RepoResult<Vec<Book>>;
    /// Books with `from <= release_date <= to`.
    fn books_in_period(&self, from: NaiveDate, to: NaiveDate) -> RepoResult<Vec<Book>>;
    /// Inserts a book and returns the store-assigned id.
    fn add_book(&self, book: &Book) -> RepoResult<i64>;
    /// Inserts a book and its author join row in one transaction; returns
    /// the store-assigned book id.
    fn add_book_of_author(&mut self, book: &Book, author_id: i64) -> RepoResult<i64>;
    /// Full-row replace; returns the affected-row count (0 or 1).
    fn update_book(&self, book: &Book) -> RepoResult<usize>;
    /// Removes join rows, then the book row, in one transaction. Join
    /// cleanup runs even for ids with no book row; the returned count
    /// reflects the book-row delete alone.
    fn delete_book(&mut self, id: i64) -> RepoResult<usize>;
    fn count_books(&self) -> RepoResult<i64>;
    fn count_books_with_title(&self, title: &str) -> RepoResult<i64>;
}

/// SQLite-backed book repository.
///
/// Holds the connection mutably because the compound write paths run inside
/// explicit transactions.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["books", "book_authors"])?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn all_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id;"))?;
        let mut rows = stmt.query([])?;
        collect_books(&mut rows)
    }

    fn book_by_id(&self, id: i64) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }
        Ok(None)
    }

    fn book_by_title(&self, title: &str) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE title = ?1;"))?;
        let mut rows = stmt.query(params![title])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }
        Ok(None)
    }

    fn books_of_author(&self, author_id: i64) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(
            "SELECT b.id, b.title, b.rating, b.release_date, b.lang
             FROM books b
             JOIN book_authors ba ON ba.book_id = b.id
             WHERE ba.author_id = ?1
             ORDER BY b.id;",
        )?;
        let mut rows = stmt.query(params![author_id])?;
        collect_books(&mut rows)
    }

    fn books_in_period(&self, from: NaiveDate, to: NaiveDate) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL} WHERE release_date BETWEEN ?1 AND ?2 ORDER BY id;"
        ))?;
        let mut rows = stmt.query(params![date_to_db(from), date_to_db(to)])?;
        collect_books(&mut rows)
    }

    fn add_book(&self, book: &Book) -> RepoResult<i64> {
        insert_book(&*self.conn, book)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn add_book_of_author(&mut self, book: &Book, author_id: i64) -> RepoResult<i64> {
        let tx = self.conn.transaction()?;
        insert_book(&tx, book)?;
        let book_id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO book_authors (book_id, author_id) VALUES (?1, ?2);",
            params![book_id, author_id],
        )?;
        tx.commit()?;
        Ok(book_id)
    }

    fn update_book(&self, book: &Book) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE books
             SET title = ?1, rating = ?2, release_date = ?3, lang = ?4
             WHERE id = ?5;",
            params![
                book.title.as_str(),
                book.rating,
                date_to_db(book.release_date),
                book.language.as_str(),
                book.id,
            ],
        )?;
        Ok(changed)
    }

    fn delete_book(&mut self, id: i64) -> RepoResult<usize> {
        let tx: Transaction<'_> = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM book_authors WHERE book_id = ?1;",
            params![id],
        )?;
        let changed = tx.execute("DELETE FROM books WHERE id = ?1;", params![id])?;
        tx.commit()?;
        Ok(changed)
    }

    fn count_books(&self) -> RepoResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))?;
        Ok(count)
    }

    fn count_books_with_title(&self, title: &str) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM books WHERE title = ?1;",
            params![title],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn insert_book(conn: &Connection, book: &Book) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO books (title, rating, release_date, lang) VALUES (?1, ?2, ?3, ?4);",
        params![
            book.title.as_str(),
            book.rating,
            date_to_db(book.release_date),
            book.language.as_str(),
        ],
    )?;
    Ok(())
}

fn collect_books(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Book>> {
    let mut books = Vec::new();
    while let Some(row) = rows.next()? {
        books.push(parse_book_row(row)?);
    }
    Ok(books)
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let release_date_text: String = row.get("release_date")?;
    Ok(Book {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        rating: row.get("rating")?,
        release_date: parse_date_column(&release_date_text, "books.release_date")?,
        language: row.get("lang")?,
    })
}
