//! Author endpoints (catalog views)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        user::Permission,
    },
};

use super::{
    books::{PaginatedResponse, DEFAULT_PER_PAGE},
    AuthenticatedUser, PageQuery,
};

/// List authors, paginated, ordered by last name then first name
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    params(PageQuery),
    responses(
        (status = 200, description = "List of authors", body = PaginatedResponse<Author>)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<Author>>> {
    let page = query.page();
    let (items, total) = state
        .services
        .catalog
        .list_authors(page, DEFAULT_PER_PAGE)
        .await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page: DEFAULT_PER_PAGE,
    }))
}

/// Get author details by ID
#[utoipa::path(
    get,
    path = "/catalog/authors/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    let author = state.services.catalog.get_author(id).await?;
    Ok(Json(author))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/catalog/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Missing permission")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(author): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    claims.require(Permission::AddAuthor)?;

    let created = state.services.catalog.create_author(author).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing author
#[utoipa::path(
    put,
    path = "/catalog/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(author): Json<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    claims.require(Permission::ChangeAuthor)?;

    let updated = state.services.catalog.update_author(id, author).await?;
    Ok(Json(updated))
}

/// Delete an author. Refused while a book references them; the conflict
/// response lets the caller return to its confirmation view.
#[utoipa::path(
    delete,
    path = "/catalog/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found"),
        (status = 409, description = "Author is still referenced by a book")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require(Permission::DeleteAuthor)?;

    state.services.catalog.delete_author(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
