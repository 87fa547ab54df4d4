//! Catalog service: books, authors, genres, languages and physical copies

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        book::{Book, BookDetails, BookShort, CreateBook, UpdateBook},
        book_instance::{BookInstance, CreateBookInstance, LoanEntry, UpdateBookInstance},
        genre::{Genre, SaveGenre},
        language::{Language, SaveLanguage},
    },
    repository::Repository,
};

/// Landing-view aggregate counts
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogSummary {
    pub num_books: i64,
    pub num_instances: i64,
    pub num_instances_available: i64,
    pub num_authors: i64,
}

fn validated<T: Validate>(value: T) -> AppResult<T> {
    value
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(value)
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Round-trip to the database, used by the readiness endpoint
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }

    /// Aggregate counts for the landing view
    pub async fn summary(&self) -> AppResult<CatalogSummary> {
        Ok(CatalogSummary {
            num_books: self.repository.books.count().await?,
            num_instances: self.repository.book_instances.count().await?,
            num_instances_available: self.repository.book_instances.count_available().await?,
            num_authors: self.repository.authors.count().await?,
        })
    }

    // Books

    pub async fn list_books(&self, page: i64, per_page: i64) -> AppResult<(Vec<BookShort>, i64)> {
        self.repository.books.list(page, per_page).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        self.repository.books.get_details(id).await
    }

    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        let book = validated(book)?;
        self.repository.books.create(&book).await
    }

    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        let book = validated(book)?;
        self.repository.books.update(id, &book).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    // Authors

    pub async fn list_authors(&self, page: i64, per_page: i64) -> AppResult<(Vec<Author>, i64)> {
        self.repository.authors.list(page, per_page).await
    }

    pub async fn list_all_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list_all().await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        let author = validated(author)?;
        self.repository.authors.create(&author).await
    }

    pub async fn update_author(&self, id: i32, author: UpdateAuthor) -> AppResult<Author> {
        let author = validated(author)?;
        self.repository.authors.update(id, &author).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }

    // Genres

    pub async fn list_genres(&self, page: i64, per_page: i64) -> AppResult<(Vec<Genre>, i64)> {
        self.repository.genres.list(page, per_page).await
    }

    pub async fn list_all_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list_all().await
    }

    pub async fn get_genre(&self, id: i32) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    pub async fn create_genre(&self, genre: SaveGenre) -> AppResult<Genre> {
        let genre = validated(genre)?;
        self.repository.genres.create(&genre).await
    }

    pub async fn update_genre(&self, id: i32, genre: SaveGenre) -> AppResult<Genre> {
        let genre = validated(genre)?;
        self.repository.genres.update(id, &genre).await
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.repository.genres.delete(id).await
    }

    // Languages

    pub async fn list_languages(
        &self,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<Language>, i64)> {
        self.repository.languages.list(page, per_page).await
    }

    pub async fn list_all_languages(&self) -> AppResult<Vec<Language>> {
        self.repository.languages.list_all().await
    }

    pub async fn get_language(&self, id: i32) -> AppResult<Language> {
        self.repository.languages.get_by_id(id).await
    }

    pub async fn create_language(&self, language: SaveLanguage) -> AppResult<Language> {
        let language = validated(language)?;
        self.repository.languages.create(&language).await
    }

    pub async fn update_language(&self, id: i32, language: SaveLanguage) -> AppResult<Language> {
        let language = validated(language)?;
        self.repository.languages.update(id, &language).await
    }

    pub async fn delete_language(&self, id: i32) -> AppResult<()> {
        self.repository.languages.delete(id).await
    }

    // Book instances

    pub async fn list_instances(
        &self,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<LoanEntry>, i64)> {
        self.repository.book_instances.list(page, per_page).await
    }

    pub async fn get_instance(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository.book_instances.get_by_id(id).await
    }

    pub async fn create_instance(&self, instance: CreateBookInstance) -> AppResult<BookInstance> {
        let instance = validated(instance)?;
        self.repository.book_instances.create(&instance).await
    }

    pub async fn update_instance(
        &self,
        id: Uuid,
        instance: UpdateBookInstance,
    ) -> AppResult<BookInstance> {
        let instance = validated(instance)?;
        self.repository.book_instances.update(id, &instance).await
    }

    pub async fn delete_instance(&self, id: Uuid) -> AppResult<()> {
        self.repository.book_instances.delete(id).await
    }
}
