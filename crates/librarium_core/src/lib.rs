//! Core domain logic for the librarium record-management service.
//!
//! This crate is the single source of truth for business invariants: every
//! validation rule and store-outcome mapping lives in the service layer
//! here, behind repository contracts a façade never sees past.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validate;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::Author;
pub use model::book::Book;
pub use model::user::User;
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::book_repo::{BookRepository, SqliteBookRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::author_service::AuthorService;
pub use service::book_service::BookService;
pub use service::user_service::UserService;
pub use service::{ServiceError, ServiceResult};
pub use validate::{ValidationError, MIN_DATE};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
