//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor, UpdateAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List authors, paginated, ordered by last name then first name
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<Author>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;

        let authors = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors ORDER BY last_name, first_name LIMIT $1 OFFSET $2",
        )
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        Ok((authors, total))
    }

    /// List all authors, unpaginated (REST collection endpoint)
    pub async fn list_all(&self) -> AppResult<Vec<Author>> {
        let authors =
            sqlx::query_as::<_, Author>("SELECT * FROM authors ORDER BY last_name, first_name")
                .fetch_all(&self.pool)
                .await?;
        Ok(authors)
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Create a new author
    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let created = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, last_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an author; absent fields are left unchanged
    pub async fn update(&self, id: i32, author: &UpdateAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors SET
                first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                date_of_birth = COALESCE($3, date_of_birth),
                date_of_death = COALESCE($4, date_of_death)
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(author.first_name.as_deref())
        .bind(author.last_name.as_deref())
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Delete an author. Fails with a conflict while any book references them.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if AppError::is_foreign_key_violation(&e) {
                    AppError::Conflict("Author is still referenced by a book".to_string())
                } else {
                    AppError::from(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Author with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Count authors
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
