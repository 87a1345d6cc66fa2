//! Persisted record models.
//!
//! These types describe the stored JSON layout and are kept apart from the
//! domain `Book` so the on-disk format can evolve without touching business
//! logic. Field names follow the historical camelCase layout
//! (`isComplete`), so data written by earlier versions still loads.

use crate::domain::{Book, BookId};
use serde::{Deserialize, Deserializer, Serialize};

/// Current version of the persisted envelope.
pub const FORMAT_VERSION: u32 = 1;

/// One book as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Older data stored an unparseable year as `null`; it loads as 0.
    #[serde(default, deserialize_with = "year_or_zero")]
    pub year: i32,
    pub is_complete: bool,
}

fn year_or_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<&Book> for BookRecord {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.0,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
            is_complete: book.is_complete,
        }
    }
}

impl From<BookRecord> for Book {
    fn from(record: BookRecord) -> Self {
        Self {
            id: BookId(record.id),
            title: record.title,
            author: record.author,
            year: record.year,
            is_complete: record.is_complete,
        }
    }
}

/// Versioned container written under the storage key.
///
/// ```json
/// {
///   "version": 1,
///   "books": [
///     { "id": 1700000000000, "title": "Dune", "author": "Frank Herbert",
///       "year": 1965, "isComplete": false }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredShelf {
    /// Version of the storage format for future migrations.
    pub version: u32,

    #[serde(default)]
    pub books: Vec<BookRecord>,
}

impl StoredShelf {
    #[must_use]
    pub fn from_books(books: &[Book]) -> Self {
        Self {
            version: FORMAT_VERSION,
            books: books.iter().map(BookRecord::from).collect(),
        }
    }
}

/// Any layout the loader understands.
///
/// The legacy layout is a bare array of books with no version field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PersistedShelf {
    Versioned(StoredShelf),
    Legacy(Vec<BookRecord>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_camel_case_completion_flag() {
        let record = BookRecord {
            id: 1,
            title: "Dune".into(),
            author: "Herbert".into(),
            year: 1965,
            is_complete: true,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["isComplete"], serde_json::json!(true));
        assert!(json.get("is_complete").is_none());
    }

    #[test]
    fn both_layouts_deserialize() {
        let legacy: PersistedShelf = serde_json::from_str(
            r#"[{"id":1,"title":"Dune","author":"Herbert","year":1965,"isComplete":false}]"#,
        )
        .unwrap();
        assert!(matches!(legacy, PersistedShelf::Legacy(ref books) if books.len() == 1));

        let versioned: PersistedShelf =
            serde_json::from_str(r#"{"version":1,"books":[]}"#).unwrap();
        assert!(matches!(versioned, PersistedShelf::Versioned(ref s) if s.books.is_empty()));
    }

    #[test]
    fn null_or_missing_year_loads_as_zero() {
        let legacy: PersistedShelf = serde_json::from_str(
            r#"[{"id":1,"title":"Dune","author":"Herbert","year":1965,"isComplete":false},
                {"id":2,"title":"Emma","author":"Austen","year":null,"isComplete":true},
                {"id":3,"title":"Ubik","author":"Dick","isComplete":false}]"#,
        )
        .unwrap();

        let PersistedShelf::Legacy(records) = legacy else {
            panic!("expected the legacy layout");
        };
        let years: Vec<i32> = records.iter().map(|r| r.year).collect();
        assert_eq!(years, [1965, 0, 0]);
    }
}
