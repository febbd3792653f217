//! Book use-case service.
//!
//! # Responsibility
//! - Enforce book argument preconditions and period normalization.
//! - Delegate persistence to a [`BookRepository`] implementation.
//!
//! # Invariants
//! - Duplicate titles are NOT pre-checked; the store's unique constraint
//!   signals them and the error propagates as [`ServiceError::Duplicate`].
//! - `update_book` reports a missing row as an affected-count of 0;
//!   `delete_book_by_id` treats the same situation as
//!   [`ServiceError::BookNotFound`].
//! - List-by-relation queries return an empty collection for an author with
//!   no books, never an error.

use crate::model::author::Author;
use crate::model::book::Book;
use crate::repo::book_repo::BookRepository;
use crate::service::{ServiceError, ServiceResult};
use crate::validate::{
    normalize_period, require_absent_id, require_id_within_count, require_non_negative_id,
    require_positive_id, require_present, require_text,
};
use chrono::{Local, NaiveDate};
use log::debug;

/// Use-case service for book records.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns all books. No validation.
    pub fn get_all_books(&self) -> ServiceResult<Vec<Book>> {
        debug!("event=get_all_books module=book_service");
        Ok(self.repo.all_books()?)
    }

    /// Returns one book by title; absence is an error.
    pub fn get_book_by_title(&self, title: &str) -> ServiceResult<Book> {
        debug!("event=get_book_by_title module=book_service");
        require_text(title, "book.title")?;
        self.repo
            .book_by_title(title)?
            .ok_or(ServiceError::BookNotFound)
    }

    /// Returns one book by id.
    ///
    /// # Contract
    /// - `id` must be positive and must not exceed the current book count
    ///   (a range check, not an existence check).
    /// - An in-range id with no row fails with
    ///   [`ServiceError::BookNotFound`].
    pub fn get_book_by_id(&self, id: i64) -> ServiceResult<Book> {
        debug!("event=get_book_by_id module=book_service id={id}");
        require_positive_id(id)?;
        require_id_within_count(id, self.repo.count_books()?)?;

        self.repo.book_by_id(id)?.ok_or(ServiceError::BookNotFound)
    }

    /// Returns the books written by the given author id. An author who
    /// wrote nothing yields an empty collection.
    pub fn get_books_by_author_id(&self, author_id: i64) -> ServiceResult<Vec<Book>> {
        debug!("event=get_books_by_author_id module=book_service author_id={author_id}");
        require_positive_id(author_id)?;
        Ok(self.repo.books_of_author(author_id)?)
    }

    /// Author-object variant of [`Self::get_books_by_author_id`]; also
    /// requires non-empty name and surname.
    pub fn get_books_by_author(&self, author: &Author) -> ServiceResult<Vec<Book>> {
        debug!(
            "event=get_books_by_author module=book_service author_id={:?}",
            author.id
        );
        let author_id = *require_present(&author.id, "author.id")?;
        require_text(&author.name, "author.name")?;
        require_text(&author.surname, "author.surname")?;
        require_positive_id(author_id)?;

        Ok(self.repo.books_of_author(author_id)?)
    }

    /// Returns books released inside the period, bounds inclusive.
    ///
    /// Absent bounds are normalized: `from` defaults to the minimum
    /// sentinel date, `to` defaults to today.
    pub fn get_books_from_period(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> ServiceResult<Vec<Book>> {
        debug!("event=get_books_from_period module=book_service from={from:?} to={to:?}");
        let today = Local::now().date_naive();
        let (from, to) = normalize_period(from, to, today)?;
        Ok(self.repo.books_in_period(from, to)?)
    }

    /// Creates a book and returns the store-assigned id.
    ///
    /// A duplicate title is rejected by the store, not pre-checked here.
    pub fn add_book(&self, book: &Book) -> ServiceResult<i64> {
        debug!("event=add_book module=book_service title={}", book.title);
        require_absent_id(&book.id, "book.id")?;
        require_text(&book.title, "book.title")?;
        require_text(&book.language, "book.language")?;

        Ok(self.repo.add_book(book)?)
    }

    /// Creates a book and links it to its author in one transaction.
    pub fn add_book_of_author(&mut self, book: &Book, author: &Author) -> ServiceResult<i64> {
        debug!(
            "event=add_book_of_author module=book_service title={} author_id={:?}",
            book.title, author.id
        );
        require_absent_id(&book.id, "book.id")?;
        require_text(&book.title, "book.title")?;
        require_text(&book.language, "book.language")?;
        let author_id = *require_present(&author.id, "author.id")?;
        require_positive_id(author_id)?;

        Ok(self.repo.add_book_of_author(book, author_id)?)
    }

    /// Replaces a book row in full and returns the affected-row count.
    ///
    /// An id with no row yields 0, not an error.
    pub fn update_book(&self, book: &Book) -> ServiceResult<usize> {
        debug!("event=update_book module=book_service id={:?}", book.id);
        require_present(&book.id, "book.id")?;
        require_text(&book.title, "book.title")?;
        require_text(&book.language, "book.language")?;

        Ok(self.repo.update_book(book)?)
    }

    /// Deletes a book by id, removing its author join rows first.
    ///
    /// # Contract
    /// - `id` must be non-negative (the historical contract is looser here
    ///   than for reads).
    /// - Join cleanup and the row delete run in one transaction; a zero
    ///   affected-count on the book row fails with
    ///   [`ServiceError::BookNotFound`].
    pub fn delete_book_by_id(&mut self, id: i64) -> ServiceResult<()> {
        debug!("event=delete_book module=book_service id={id}");
        require_non_negative_id(id)?;

        if self.repo.delete_book(id)? == 0 {
            return Err(ServiceError::BookNotFound);
        }
        Ok(())
    }
}
