//! User use-case service.
//!
//! # Responsibility
//! - Enforce user argument preconditions and the duplicate-login rule.
//! - Delegate persistence to a [`UserRepository`] implementation.
//!
//! # Invariants
//! - `get_user_by_id` does NOT translate absence; callers receive
//!   `Ok(None)` and decide for themselves. Every other addressed operation
//!   maps absence to [`ServiceError::UserNotFound`].
//! - The duplicate-login pre-check is advisory under concurrency; the
//!   store's UNIQUE constraint is the backstop.

use crate::model::user::User;
use crate::repo::user_repo::UserRepository;
use crate::service::{ServiceError, ServiceResult};
use crate::validate::{require_absent_id, require_positive_id, require_present, require_text};
use log::debug;

/// Use-case service for user records.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns all users in insertion order. No validation.
    pub fn get_all_users(&self) -> ServiceResult<Vec<User>> {
        debug!("event=get_all_users module=user_service");
        Ok(self.repo.all_users()?)
    }

    /// Returns one user by id, or `Ok(None)` when absent.
    pub fn get_user_by_id(&self, id: i64) -> ServiceResult<Option<User>> {
        debug!("event=get_user_by_id module=user_service id={id}");
        require_positive_id(id)?;
        Ok(self.repo.user_by_id(id)?)
    }

    /// Returns one user by login; absence is an error here.
    pub fn get_user_by_login(&self, login: &str) -> ServiceResult<User> {
        debug!("event=get_user_by_login module=user_service");
        require_text(login, "user.login")?;
        self.repo
            .user_by_login(login)?
            .ok_or(ServiceError::UserNotFound)
    }

    /// Creates a user and returns the store-assigned id.
    ///
    /// # Contract
    /// - `user.id` must be unset; the store assigns it.
    /// - `login` and `password` must be non-empty.
    /// - An existing user with the same login fails with
    ///   [`ServiceError::DuplicateLogin`].
    pub fn add_user(&self, user: &User) -> ServiceResult<i64> {
        debug!("event=add_user module=user_service login={}", user.login);
        require_absent_id(&user.id, "user.id")?;
        require_text(&user.login, "user.login")?;
        require_text(&user.password, "user.password")?;

        if self.repo.count_users_with_login(&user.login)? > 0 {
            return Err(ServiceError::DuplicateLogin(user.login.clone()));
        }

        Ok(self.repo.add_user(user)?)
    }

    /// Replaces a user row in full and returns the affected-row count.
    ///
    /// Fails with [`ServiceError::UserNotFound`] when no row matches the id.
    pub fn update_user(&self, user: &User) -> ServiceResult<usize> {
        debug!("event=update_user module=user_service id={:?}", user.id);
        let id = *require_present(&user.id, "user.id")?;
        require_text(&user.login, "user.login")?;
        require_text(&user.password, "user.password")?;
        require_positive_id(id)?;

        let changed = self.repo.update_user(user)?;
        if changed == 0 {
            return Err(ServiceError::UserNotFound);
        }
        Ok(changed)
    }

    /// Deletes a user by id; absence is an error.
    pub fn delete_user(&self, id: i64) -> ServiceResult<()> {
        debug!("event=delete_user module=user_service id={id}");
        require_positive_id(id)?;

        if self.repo.delete_user(id)? == 0 {
            return Err(ServiceError::UserNotFound);
        }
        Ok(())
    }
}
