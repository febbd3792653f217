//! Author record of the library catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Author of zero or more books.
///
/// `(name, surname)` pairs are not required to be unique; count queries that
/// look authors up by name assume uniqueness and are documented as such on
/// the repository contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Server-assigned row id.
    pub id: Option<i64>,
    pub name: String,
    pub surname: String,
    /// Defaults to the `0000-01-01` sentinel when absent at creation.
    pub birth_date: Option<NaiveDate>,
}

impl Author {
    /// Builds an author ready for insertion (`id = None`).
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        birth_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            surname: surname.into(),
            birth_date,
        }
    }

    /// Builds an author with a known row id, as read back from the store.
    pub fn with_id(
        id: i64,
        name: impl Into<String>,
        surname: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name, surname, Some(birth_date))
        }
    }
}
