//! Use-case services for the two entity families.
//!
//! # Responsibility
//! - Enforce every business invariant before a store call; this layer is the
//!   only place that does.
//! - Map store-level outcomes (absence, duplicates, integrity violations)
//!   into the shared [`ServiceError`] taxonomy.
//!
//! # Invariants
//! - Services are stateless; every call stands alone.
//! - Not-found contracts differ per entity and per operation and are kept
//!   distinct on purpose: see the individual service docs.

use crate::repo::RepoError;
use crate::validate::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author_service;
pub mod book_service;
pub mod user_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level failure taxonomy, shared by all three services.
///
/// Validation errors are caller mistakes, surfaced synchronously and never
/// retried. Everything else reflects a store outcome and propagates to the
/// caller unmodified.
#[derive(Debug)]
pub enum ServiceError {
    /// A precondition on caller-supplied arguments failed.
    Validation(ValidationError),
    /// The addressed user row does not exist.
    UserNotFound,
    /// The addressed author row does not exist.
    AuthorNotFound,
    /// The addressed book row does not exist.
    BookNotFound,
    /// A user with this login already exists (service-level pre-check).
    DuplicateLogin(String),
    /// The store rejected a write with a unique-constraint violation.
    Duplicate(String),
    /// The store rejected a write with a referential-integrity violation.
    Integrity(String),
    /// An average was requested for an author with no rated books.
    NoRatedBooks { author_id: i64 },
    /// Any other persistence failure, passed through untouched.
    Store(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::UserNotFound => write!(f, "user does not exist"),
            Self::AuthorNotFound => write!(f, "author does not exist"),
            Self::BookNotFound => write!(f, "book does not exist"),
            Self::DuplicateLogin(login) => {
                write!(f, "user with login `{login}` already exists")
            }
            Self::Duplicate(detail) => write!(f, "duplicate key: {detail}"),
            Self::Integrity(detail) => {
                write!(f, "referential integrity violation: {detail}")
            }
            Self::NoRatedBooks { author_id } => {
                write!(f, "author {author_id} has no rated books")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Duplicate(detail) => Self::Duplicate(detail),
            RepoError::ForeignKey(detail) => Self::Integrity(detail),
            other => Self::Store(other),
        }
    }
}
