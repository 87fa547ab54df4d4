//! Book (catalog entry) model and related types.
//!
//! A `Book` is the bibliographic record; physical copies are tracked
//! separately as [`BookInstance`](super::book_instance::BookInstance).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::author::Author;
use super::book_instance::BookInstance;
use super::genre::Genre;
use super::language::Language;

/// Book row as persisted
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    /// 13-character ISBN, globally unique (exact match)
    pub isbn: String,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
}

/// Short book representation for paginated lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    /// "Lastname Firstname" of the author, when one is set
    pub author: Option<String>,
}

/// Full book representation for the detail view, with relations loaded
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: Option<Author>,
    pub language: Option<Language>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    pub summary: String,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: String,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

/// Update book request; absent fields are left unchanged. An explicit
/// `null` clears `author_id` or `language_id`. When `genre_ids` is present
/// the genre set is replaced wholesale.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    pub summary: Option<String>,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "super::clearable")]
    #[schema(value_type = Option<i32>)]
    pub author_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::clearable")]
    #[schema(value_type = Option<i32>)]
    pub language_id: Option<Option<i32>>,
    pub genre_ids: Option<Vec<i32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_null_from_absent_references() {
        let cleared: UpdateBook =
            serde_json::from_str(r#"{"author_id": null, "language_id": null}"#).unwrap();
        assert_eq!(cleared.author_id, Some(None));
        assert_eq!(cleared.language_id, Some(None));

        let untouched: UpdateBook = serde_json::from_str("{}").unwrap();
        assert_eq!(untouched.author_id, None);
        assert_eq!(untouched.language_id, None);

        let reassigned: UpdateBook = serde_json::from_str(r#"{"author_id": 7}"#).unwrap();
        assert_eq!(reassigned.author_id, Some(Some(7)));
    }
}
