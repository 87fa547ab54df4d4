//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Author model. Listed ordered by last name, then first name.
/// Cannot be deleted while referenced by a book (restrict-on-delete).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name, "Lastname Firstname"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 200, message = "First name must be 1-200 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 200, message = "Last name must be 1-200 characters"))]
    pub last_name: String,
    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: Option<NaiveDate>,
    /// Date of death (YYYY-MM-DD)
    pub date_of_death: Option<NaiveDate>,
}

/// Update author request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 200, message = "First name must be 1-200 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Last name must be 1-200 characters"))]
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}
