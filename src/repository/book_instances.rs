//! Book instances repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{
        BookInstance, CreateBookInstance, LoanEntry, LoanStatus, UpdateBookInstance,
    },
};

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Both `book_id` and `borrower_id` are enforced by foreign keys, so a
    /// '23503' on insert has to be disambiguated by the violated constraint.
    fn map_reference_violation(e: sqlx::Error, book_id: i32) -> AppError {
        if AppError::is_foreign_key_violation(&e) {
            match AppError::violated_constraint(&e) {
                Some("book_instances_borrower_id_fkey") => {
                    AppError::BadRequest("Borrower does not exist".to_string())
                }
                _ => AppError::BadRequest(format!("Book with id {} does not exist", book_id)),
            }
        } else {
            AppError::from(e)
        }
    }

    fn entry_from_row(row: &sqlx::postgres::PgRow, today: NaiveDate) -> AppResult<LoanEntry> {
        let due_back: Option<NaiveDate> = row.get("due_back");
        let status: String = row.get("status");
        Ok(LoanEntry {
            id: row.get("id"),
            book_id: row.get("book_id"),
            book_title: row.get("book_title"),
            imprint: row.get("imprint"),
            due_back,
            status: status
                .parse::<LoanStatus>()
                .map_err(AppError::Internal)?,
            borrower_id: row.get("borrower_id"),
            borrower_username: row.get("borrower_username"),
            is_overdue: due_back.map(|d| d < today).unwrap_or(false),
        })
    }

    /// List all copies, paginated, ordered by due date descending
    /// (copies without a due date last)
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<LoanEntry>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(
            r#"
            SELECT bi.id, bi.book_id, bi.imprint, bi.due_back, bi.status, bi.borrower_id,
                   b.title AS book_title, u.username AS borrower_username
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            LEFT JOIN users u ON bi.borrower_id = u.id
            ORDER BY bi.due_back DESC NULLS LAST
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let today = chrono::Utc::now().date_naive();
        let entries = rows
            .iter()
            .map(|row| Self::entry_from_row(row, today))
            .collect::<AppResult<Vec<_>>>()?;

        Ok((entries, total))
    }

    /// Get a copy by its UUID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        let mut instance =
            sqlx::query_as::<_, BookInstance>("SELECT * FROM book_instances WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Book instance with id {} not found", id))
                })?;

        instance.is_overdue = instance.is_overdue_on(chrono::Utc::now().date_naive());
        Ok(instance)
    }

    /// Create a new physical copy; status defaults to Maintenance
    pub async fn create(&self, instance: &CreateBookInstance) -> AppResult<BookInstance> {
        let mut created = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (book_id, imprint, due_back, status, borrower_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(instance.book_id)
        .bind(&instance.imprint)
        .bind(instance.due_back)
        .bind(instance.status.unwrap_or_default())
        .bind(instance.borrower_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_reference_violation(e, instance.book_id))?;

        created.is_overdue = created.is_overdue_on(chrono::Utc::now().date_naive());
        Ok(created)
    }

    /// Update a copy; absent fields are left unchanged, while an explicit
    /// `null` clears `due_back` or `borrower_id`. The book reference is
    /// immutable once the copy exists.
    pub async fn update(&self, id: Uuid, instance: &UpdateBookInstance) -> AppResult<BookInstance> {
        let mut updated = sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances SET
                imprint = COALESCE($1, imprint),
                due_back = CASE WHEN $2 THEN $3 ELSE due_back END,
                status = COALESCE($4, status),
                borrower_id = CASE WHEN $5 THEN $6 ELSE borrower_id END
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(instance.imprint.as_deref())
        .bind(instance.due_back.is_some())
        .bind(instance.due_back.flatten())
        .bind(instance.status)
        .bind(instance.borrower_id.is_some())
        .bind(instance.borrower_id.flatten())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if AppError::is_foreign_key_violation(&e) {
                AppError::BadRequest("Borrower does not exist".to_string())
            } else {
                AppError::from(e)
            }
        })?
        .ok_or_else(|| AppError::NotFound(format!("Book instance with id {} not found", id)))?;

        updated.is_overdue = updated.is_overdue_on(chrono::Utc::now().date_naive());
        Ok(updated)
    }

    /// Delete a copy
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Book instance with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Set a new due date on a copy (loan renewal)
    pub async fn set_due_back(&self, id: Uuid, due_back: NaiveDate) -> AppResult<BookInstance> {
        let mut updated = sqlx::query_as::<_, BookInstance>(
            "UPDATE book_instances SET due_back = $1 WHERE id = $2 RETURNING *",
        )
        .bind(due_back)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book instance with id {} not found", id)))?;

        updated.is_overdue = updated.is_overdue_on(chrono::Utc::now().date_naive());
        Ok(updated)
    }

    /// Outstanding loans of one borrower, ordered by due date ascending
    pub async fn loans_for_borrower(
        &self,
        borrower_id: i32,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<LoanEntry>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE borrower_id = $1 AND status = 'o'",
        )
        .bind(borrower_id)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query(
            r#"
            SELECT bi.id, bi.book_id, bi.imprint, bi.due_back, bi.status, bi.borrower_id,
                   b.title AS book_title, u.username AS borrower_username
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            LEFT JOIN users u ON bi.borrower_id = u.id
            WHERE bi.borrower_id = $1 AND bi.status = 'o'
            ORDER BY bi.due_back
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(borrower_id)
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let today = chrono::Utc::now().date_naive();
        let entries = rows
            .iter()
            .map(|row| Self::entry_from_row(row, today))
            .collect::<AppResult<Vec<_>>>()?;

        Ok((entries, total))
    }

    /// All outstanding loans across all borrowers, ordered by due date ascending
    pub async fn all_on_loan(&self, page: i64, per_page: i64) -> AppResult<(Vec<LoanEntry>, i64)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = 'o'")
                .fetch_one(&self.pool)
                .await?;

        let rows = sqlx::query(
            r#"
            SELECT bi.id, bi.book_id, bi.imprint, bi.due_back, bi.status, bi.borrower_id,
                   b.title AS book_title, u.username AS borrower_username
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            LEFT JOIN users u ON bi.borrower_id = u.id
            WHERE bi.status = 'o'
            ORDER BY bi.due_back
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let today = chrono::Utc::now().date_naive();
        let entries = rows
            .iter()
            .map(|row| Self::entry_from_row(row, today))
            .collect::<AppResult<Vec<_>>>()?;

        Ok((entries, total))
    }

    /// Count all copies
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count copies currently available for loan
    pub async fn count_available(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = 'a'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
