//! User account record.

use serde::{Deserialize, Serialize};

/// Account record with a unique login.
///
/// `id` is assigned by the store; a user built for insertion must keep it
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned row id.
    pub id: Option<i64>,
    /// Unique, non-empty login name.
    pub login: String,
    /// Non-empty password value (hashing is the caller's concern).
    pub password: String,
    /// Optional free-form description.
    pub description: Option<String>,
}

impl User {
    /// Builds a user ready for insertion (`id = None`).
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: None,
            login: login.into(),
            password: password.into(),
            description,
        }
    }

    /// Builds a user with a known row id, as read back from the store.
    pub fn with_id(
        id: i64,
        login: impl Into<String>,
        password: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(login, password, description)
        }
    }
}
