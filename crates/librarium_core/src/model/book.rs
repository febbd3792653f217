//! Book record of the library catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Catalog entry linked to authors through the `book_authors` join table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Server-assigned row id.
    pub id: Option<i64>,
    /// Non-empty title, unique across the catalog.
    pub title: String,
    pub rating: i32,
    pub release_date: NaiveDate,
    /// Non-empty language tag, stored as provided.
    pub language: String,
}

impl Book {
    /// Builds a book ready for insertion (`id = None`).
    pub fn new(
        title: impl Into<String>,
        rating: i32,
        release_date: NaiveDate,
        language: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            rating,
            release_date,
            language: language.into(),
        }
    }

    /// Builds a book with a known row id, as read back from the store.
    pub fn with_id(
        id: i64,
        title: impl Into<String>,
        rating: i32,
        release_date: NaiveDate,
        language: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(title, rating, release_date, language)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Book;

    #[test]
    fn serializes_with_iso_dates_and_stable_field_names() {
        let book = Book::with_id(1, "1984", 89, "2014-01-01".parse().unwrap(), "Eng");

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["release_date"], "2014-01-01");
        assert_eq!(json["language"], "Eng");

        let back: Book = serde_json::from_value(json).unwrap();
        assert_eq!(back, book);
    }
}
