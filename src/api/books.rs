//! Book (catalog entry) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookDetails, BookShort, CreateBook, UpdateBook},
        user::Permission,
    },
};

use super::{AuthenticatedUser, PageQuery};

/// Books are listed five per page; every other entity uses ten
pub const BOOKS_PER_PAGE: i64 = 5;
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// List of records on this page
    pub items: Vec<T>,
    /// Total number of records
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Records per page
    pub per_page: i64,
}

/// List books, paginated
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "books",
    params(PageQuery),
    responses(
        (status = 200, description = "List of books", body = PaginatedResponse<BookShort>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<BookShort>>> {
    let page = query.page();
    let (items, total) = state.services.catalog.list_books(page, BOOKS_PER_PAGE).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page: BOOKS_PER_PAGE,
    }))
}

/// Get book details by ID, with author, language, genres and copies
#[utoipa::path(
    get,
    path = "/catalog/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetails>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/catalog/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Missing permission"),
        (status = 409, description = "Duplicate ISBN")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    claims.require(Permission::AddBook)?;

    let created = state.services.catalog.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/catalog/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Duplicate ISBN")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(book): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    claims.require(Permission::ChangeBook)?;

    let updated = state.services.catalog.update_book(id, book).await?;
    Ok(Json(updated))
}

/// Delete a book. Refused while physical copies of it exist.
#[utoipa::path(
    delete,
    path = "/catalog/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book still has copies")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require(Permission::DeleteBook)?;

    state.services.catalog.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
