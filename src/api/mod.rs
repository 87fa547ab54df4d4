//! API handlers for the LocalLibrary endpoints

pub mod auth;
pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod index;
pub mod languages;
pub mod openapi;
pub mod rest;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Page-number query for the paginated list views (page sizes are fixed
/// per entity: books 5, everything else 10)
#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number, 1-based (default: 1)
    pub page: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        // Validate JWT token using the secret from configuration
        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}
