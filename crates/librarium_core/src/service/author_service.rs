//! Author use-case service.
//!
//! # Responsibility
//! - Enforce author argument preconditions and the id range rule.
//! - Delegate persistence to an [`AuthorRepository`] implementation.
//!
//! # Invariants
//! - `get_author_by_id` rejects ids above the current author count with a
//!   range validation error before fetching; ids inside the range that hit
//!   no row (deleted ids) map to [`ServiceError::AuthorNotFound`].
//! - `update_author` reports a missing row as an affected-count of 0, not
//!   as an error; the user service behaves differently by design.
//! - Deletion never cascades: the store's foreign-key rejection surfaces as
//!   [`ServiceError::Integrity`].

use crate::model::author::Author;
use crate::model::book::Book;
use crate::repo::author_repo::AuthorRepository;
use crate::service::{ServiceError, ServiceResult};
use crate::validate::{
    require_absent_id, require_id_within_count, require_positive_id, require_present,
    require_text, MIN_DATE,
};
use log::debug;

/// Use-case service for author records.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns all authors. No validation.
    pub fn get_all_authors(&self) -> ServiceResult<Vec<Author>> {
        debug!("event=get_all_authors module=author_service");
        Ok(self.repo.all_authors()?)
    }

    /// Returns one author by id.
    ///
    /// # Contract
    /// - `id` must be positive and must not exceed the current author count
    ///   (a range check, not an existence check).
    /// - An in-range id with no row fails with
    ///   [`ServiceError::AuthorNotFound`].
    pub fn get_author_by_id(&self, id: i64) -> ServiceResult<Author> {
        debug!("event=get_author_by_id module=author_service id={id}");
        require_positive_id(id)?;
        require_id_within_count(id, self.repo.count_authors()?)?;

        self.repo
            .author_by_id(id)?
            .ok_or(ServiceError::AuthorNotFound)
    }

    /// Returns the author that wrote the given book.
    pub fn get_author_by_book(&self, book: &Book) -> ServiceResult<Author> {
        debug!(
            "event=get_author_by_book module=author_service book_id={:?}",
            book.id
        );
        let book_id = *require_present(&book.id, "book.id")?;
        require_text(&book.title, "book.title")?;
        require_positive_id(book_id)?;

        self.repo
            .author_of_book(book_id)?
            .ok_or(ServiceError::AuthorNotFound)
    }

    /// Creates an author and returns the store-assigned id.
    ///
    /// A missing birth date defaults to the `0000-01-01` sentinel.
    pub fn add_author(&self, author: &Author) -> ServiceResult<i64> {
        debug!(
            "event=add_author module=author_service name={} surname={}",
            author.name, author.surname
        );
        require_absent_id(&author.id, "author.id")?;
        require_text(&author.name, "author.name")?;
        require_text(&author.surname, "author.surname")?;

        let record = Author {
            birth_date: Some(author.birth_date.unwrap_or(*MIN_DATE)),
            ..author.clone()
        };
        Ok(self.repo.add_author(&record)?)
    }

    /// Deletes an author by id.
    ///
    /// Fails with [`ServiceError::Integrity`] while books still reference
    /// the author. Deleting an id with no row is silently accepted; only
    /// the user family treats delete-of-absent as an error.
    pub fn delete_author_by_id(&self, id: i64) -> ServiceResult<()> {
        debug!("event=delete_author module=author_service id={id}");
        require_positive_id(id)?;
        self.repo.delete_author(id)?;
        Ok(())
    }

    /// Replaces an author row in full and returns the affected-row count.
    ///
    /// An id with no row yields 0, not an error.
    pub fn update_author(&self, author: &Author) -> ServiceResult<usize> {
        debug!("event=update_author module=author_service id={:?}", author.id);
        require_present(&author.id, "author.id")?;
        require_text(&author.name, "author.name")?;
        require_text(&author.surname, "author.surname")?;
        require_present(&author.birth_date, "author.birth_date")?;

        Ok(self.repo.update_author(author)?)
    }

    /// Returns how many books the author wrote.
    pub fn get_count_of_authors_books(&self, author: &Author) -> ServiceResult<i64> {
        debug!(
            "event=count_authors_books module=author_service id={:?}",
            author.id
        );
        let author_id = *require_present(&author.id, "author.id")?;
        require_positive_id(author_id)?;

        Ok(self.repo.count_books_of_author(author_id)?)
    }

    /// Returns the floating-point average rating over the author's books.
    ///
    /// An author with no rated books fails with
    /// [`ServiceError::NoRatedBooks`]; an empty aggregate is not `0.0`.
    pub fn get_average_rating_of_authors_books(&self, author: &Author) -> ServiceResult<f64> {
        debug!(
            "event=average_rating_of_authors_books module=author_service id={:?}",
            author.id
        );
        let author_id = *require_present(&author.id, "author.id")?;
        require_positive_id(author_id)?;

        self.repo
            .average_rating_of_author(author_id)?
            .ok_or(ServiceError::NoRatedBooks { author_id })
    }
}
