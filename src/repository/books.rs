//! Books repository for database operations

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookDetails, BookShort, CreateBook, UpdateBook},
        book_instance::BookInstance,
        genre::Genre,
        language::Language,
    },
};

const DUPLICATE_ISBN: &str = "A book with this ISBN already exists";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List books, paginated, ordered by title, with the author's display name
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<BookShort>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(
            r#"
            SELECT b.id, b.title, b.isbn,
                   a.last_name || ' ' || a.first_name AS author
            FROM books b
            LEFT JOIN authors a ON b.author_id = a.id
            ORDER BY b.title
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let books = rows
            .into_iter()
            .map(|row| BookShort {
                id: row.get("id"),
                title: row.get("title"),
                isbn: row.get("isbn"),
                author: row.get("author"),
            })
            .collect();

        Ok((books, total))
    }

    /// Get a bare book row by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Get a book with author, language, genres and instances loaded
    pub async fn get_details(&self, id: i32) -> AppResult<BookDetails> {
        let book = self.get_by_id(id).await?;

        let author = match book.author_id {
            Some(author_id) => {
                sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
                    .bind(author_id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => None,
        };

        let language = match book.language_id {
            Some(language_id) => {
                sqlx::query_as::<_, Language>("SELECT * FROM languages WHERE id = $1")
                    .bind(language_id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => None,
        };

        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.* FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let today = chrono::Utc::now().date_naive();
        let instances = sqlx::query_as::<_, BookInstance>(
            "SELECT * FROM book_instances WHERE book_id = $1 ORDER BY due_back DESC NULLS LAST",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|mut inst| {
            inst.is_overdue = inst.is_overdue_on(today);
            inst
        })
        .collect();

        Ok(BookDetails {
            id: book.id,
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
            author,
            language,
            genres,
            instances,
        })
    }

    /// Create a new book with its genre set
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, summary, isbn, author_id, language_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(book.language_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                AppError::Conflict(DUPLICATE_ISBN.to_string())
            } else {
                AppError::from(e)
            }
        })?;

        for genre_id in &book.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(created.id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    if AppError::is_foreign_key_violation(&e) {
                        AppError::BadRequest(format!("Genre with id {} does not exist", genre_id))
                    } else {
                        AppError::from(e)
                    }
                })?;
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Update a book; absent fields are left unchanged, an explicit `null`
    /// clears `author_id` or `language_id`, and a present genre list
    /// replaces the existing genre set
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = COALESCE($1, title),
                summary = COALESCE($2, summary),
                isbn = COALESCE($3, isbn),
                author_id = CASE WHEN $4 THEN $5 ELSE author_id END,
                language_id = CASE WHEN $6 THEN $7 ELSE language_id END
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(book.title.as_deref())
        .bind(book.summary.as_deref())
        .bind(book.isbn.as_deref())
        .bind(book.author_id.is_some())
        .bind(book.author_id.flatten())
        .bind(book.language_id.is_some())
        .bind(book.language_id.flatten())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                AppError::Conflict(DUPLICATE_ISBN.to_string())
            } else {
                AppError::from(e)
            }
        })?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        if let Some(ref genre_ids) = book.genre_ids {
            sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for genre_id in genre_ids {
                sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                    .bind(id)
                    .bind(genre_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        if AppError::is_foreign_key_violation(&e) {
                            AppError::BadRequest(format!(
                                "Genre with id {} does not exist",
                                genre_id
                            ))
                        } else {
                            AppError::from(e)
                        }
                    })?;
            }
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a book. Fails with a conflict while physical copies exist.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if AppError::is_foreign_key_violation(&e) {
                    AppError::Conflict("Book still has existing copies".to_string())
                } else {
                    AppError::from(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Count books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
