//! Data models for the LocalLibrary catalog

use serde::{Deserialize, Deserializer};

/// Deserializes a clearable update field: an absent key stays `None`
/// (leave the column unchanged) while an explicit JSON `null` becomes
/// `Some(None)` (clear the column).
pub(crate) fn clearable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod language;
pub mod user;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookDetails, BookShort};
pub use book_instance::{BookInstance, LoanEntry, LoanStatus};
pub use genre::Genre;
pub use language::Language;
pub use user::{Permission, User, UserClaims};
