//! Genres repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::genre::{Genre, SaveGenre},
};

#[derive(Clone)]
pub struct GenresRepository {
    pool: Pool<Postgres>,
}

impl GenresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List genres, paginated, ordered by name
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<Genre>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;

        let genres = sqlx::query_as::<_, Genre>(
            "SELECT * FROM genres ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        Ok((genres, total))
    }

    /// List all genres, unpaginated (REST collection endpoint)
    pub async fn list_all(&self) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>("SELECT * FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(genres)
    }

    /// Get genre by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre with id {} not found", id)))
    }

    /// Create a new genre
    pub async fn create(&self, genre: &SaveGenre) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>("INSERT INTO genres (name) VALUES ($1) RETURNING *")
            .bind(&genre.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if AppError::is_unique_violation(&e) {
                    AppError::Conflict("Genre already exists (case-insensitive match)".to_string())
                } else {
                    e.into()
                }
            })
    }

    /// Update a genre's name
    pub async fn update(&self, id: i32, genre: &SaveGenre) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>("UPDATE genres SET name = $1 WHERE id = $2 RETURNING *")
            .bind(&genre.name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if AppError::is_unique_violation(&e) {
                    AppError::Conflict("Genre already exists (case-insensitive match)".to_string())
                } else {
                    AppError::from(e)
                }
            })?
            .ok_or_else(|| AppError::NotFound(format!("Genre with id {} not found", id)))
    }

    /// Delete a genre. Fails with a conflict while any book references it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if AppError::is_foreign_key_violation(&e) {
                    AppError::Conflict("Genre is still referenced by a book".to_string())
                } else {
                    AppError::from(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Genre with id {} not found", id)));
        }
        Ok(())
    }
}
