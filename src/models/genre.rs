//! Genre model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book genre (e.g. Science Fiction, French Poetry).
/// Names are unique case-insensitively, enforced by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Create/update genre request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveGenre {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
}
