//! Languages repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::language::{Language, SaveLanguage},
};

#[derive(Clone)]
pub struct LanguagesRepository {
    pool: Pool<Postgres>,
}

impl LanguagesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List languages, paginated, ordered by name
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<Language>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM languages")
            .fetch_one(&self.pool)
            .await?;

        let languages = sqlx::query_as::<_, Language>(
            "SELECT * FROM languages ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        Ok((languages, total))
    }

    /// List all languages, unpaginated (REST collection endpoint)
    pub async fn list_all(&self) -> AppResult<Vec<Language>> {
        let languages = sqlx::query_as::<_, Language>("SELECT * FROM languages ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(languages)
    }

    /// Get language by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Language> {
        sqlx::query_as::<_, Language>("SELECT * FROM languages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Language with id {} not found", id)))
    }

    /// Create a new language
    pub async fn create(&self, language: &SaveLanguage) -> AppResult<Language> {
        sqlx::query_as::<_, Language>("INSERT INTO languages (name) VALUES ($1) RETURNING *")
            .bind(&language.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if AppError::is_unique_violation(&e) {
                    AppError::Conflict(
                        "Language already exists (case-insensitive match)".to_string(),
                    )
                } else {
                    e.into()
                }
            })
    }

    /// Update a language's name
    pub async fn update(&self, id: i32, language: &SaveLanguage) -> AppResult<Language> {
        sqlx::query_as::<_, Language>("UPDATE languages SET name = $1 WHERE id = $2 RETURNING *")
            .bind(&language.name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if AppError::is_unique_violation(&e) {
                    AppError::Conflict(
                        "Language already exists (case-insensitive match)".to_string(),
                    )
                } else {
                    AppError::from(e)
                }
            })?
            .ok_or_else(|| AppError::NotFound(format!("Language with id {} not found", id)))
    }

    /// Delete a language. Books referencing it get their language unset
    /// (ON DELETE SET NULL), so this never conflicts.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM languages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Language with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
