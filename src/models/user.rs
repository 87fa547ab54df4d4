//! User model, named permissions and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::AppError;

/// Named permissions gating every mutating catalog operation, carried as
/// strings in the JWT claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    AddAuthor,
    ChangeAuthor,
    DeleteAuthor,
    AddBook,
    ChangeBook,
    DeleteBook,
    AddGenre,
    ChangeGenre,
    DeleteGenre,
    AddLanguage,
    ChangeLanguage,
    DeleteLanguage,
    AddBookInstance,
    ChangeBookInstance,
    DeleteBookInstance,
    /// Librarian-level: renew loans and see all outstanding loans
    MarkReturned,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::AddAuthor => "can_add_author",
            Permission::ChangeAuthor => "can_change_author",
            Permission::DeleteAuthor => "can_delete_author",
            Permission::AddBook => "can_add_book",
            Permission::ChangeBook => "can_change_book",
            Permission::DeleteBook => "can_delete_book",
            Permission::AddGenre => "can_add_genre",
            Permission::ChangeGenre => "can_change_genre",
            Permission::DeleteGenre => "can_delete_genre",
            Permission::AddLanguage => "can_add_language",
            Permission::ChangeLanguage => "can_change_language",
            Permission::DeleteLanguage => "can_delete_language",
            Permission::AddBookInstance => "can_add_bookinstance",
            Permission::ChangeBookInstance => "can_change_bookinstance",
            Permission::DeleteBookInstance => "can_delete_bookinstance",
            Permission::MarkReturned => "can_mark_returned",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Named permissions held by this user
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub permissions: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Check whether this user holds the given named permission
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.iter().any(|p| p == permission.as_str())
    }

    /// Require a named permission, failing with 403 otherwise
    pub fn require(&self, permission: Permission) -> Result<(), AppError> {
        if self.has(permission) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Missing permission: {}",
                permission
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(permissions: &[Permission]) -> UserClaims {
        let now = Utc::now().timestamp();
        UserClaims {
            sub: "librarian".to_string(),
            user_id: 1,
            permissions: permissions.iter().map(|p| p.as_str().to_string()).collect(),
            exp: now + 3600,
            iat: now,
        }
    }

    #[test]
    fn require_passes_with_permission() {
        let claims = claims(&[Permission::MarkReturned]);
        assert!(claims.require(Permission::MarkReturned).is_ok());
    }

    #[test]
    fn require_fails_without_permission() {
        let claims = claims(&[Permission::AddBook]);
        assert!(matches!(
            claims.require(Permission::MarkReturned),
            Err(AppError::Authorization(_))
        ));
    }

    #[test]
    fn token_round_trip() {
        let original = claims(&[Permission::AddAuthor, Permission::MarkReturned]);
        let token = original.create_token("test-secret").unwrap();
        let parsed = UserClaims::from_token(&token, "test-secret").unwrap();
        assert_eq!(parsed.user_id, original.user_id);
        assert_eq!(parsed.permissions, original.permissions);
    }

    #[test]
    fn token_rejects_wrong_secret() {
        let token = claims(&[]).create_token("test-secret").unwrap();
        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }
}
