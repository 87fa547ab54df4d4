//! Language model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Natural language a book is written in (e.g. English, French).
/// Names are unique case-insensitively, enforced by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Language {
    pub id: i32,
    pub name: String,
}

/// Create/update language request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveLanguage {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
}
