//! Genre endpoints (catalog views)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        genre::{Genre, SaveGenre},
        user::Permission,
    },
};

use super::{
    books::{PaginatedResponse, DEFAULT_PER_PAGE},
    AuthenticatedUser, PageQuery,
};

/// List genres, paginated
#[utoipa::path(
    get,
    path = "/catalog/genres",
    tag = "genres",
    params(PageQuery),
    responses(
        (status = 200, description = "List of genres", body = PaginatedResponse<Genre>)
    )
)]
pub async fn list_genres(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<Genre>>> {
    let page = query.page();
    let (items, total) = state
        .services
        .catalog
        .list_genres(page, DEFAULT_PER_PAGE)
        .await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page: DEFAULT_PER_PAGE,
    }))
}

/// Get genre details by ID
#[utoipa::path(
    get,
    path = "/catalog/genres/{id}",
    tag = "genres",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre details", body = Genre),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn get_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.catalog.get_genre(id).await?;
    Ok(Json(genre))
}

/// Create a new genre. Names clash case-insensitively.
#[utoipa::path(
    post,
    path = "/catalog/genres",
    tag = "genres",
    security(("bearer_auth" = [])),
    request_body = SaveGenre,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 403, description = "Missing permission"),
        (status = 409, description = "Genre already exists")
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(genre): Json<SaveGenre>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    claims.require(Permission::AddGenre)?;

    let created = state.services.catalog.create_genre(genre).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Rename a genre
#[utoipa::path(
    put,
    path = "/catalog/genres/{id}",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    request_body = SaveGenre,
    responses(
        (status = 200, description = "Genre updated", body = Genre),
        (status = 404, description = "Genre not found"),
        (status = 409, description = "Genre already exists")
    )
)]
pub async fn update_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(genre): Json<SaveGenre>,
) -> AppResult<Json<Genre>> {
    claims.require(Permission::ChangeGenre)?;

    let updated = state.services.catalog.update_genre(id, genre).await?;
    Ok(Json(updated))
}

/// Delete a genre. Refused while any book carries it.
#[utoipa::path(
    delete,
    path = "/catalog/genres/{id}",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found"),
        (status = 409, description = "Genre is still referenced by a book")
    )
)]
pub async fn delete_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require(Permission::DeleteGenre)?;

    state.services.catalog.delete_genre(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
