//! Generic REST layer under `/api/v1`.
//!
//! Exposes Author, Genre and Language records as plain JSON collections.
//! Reads are open; writes require an authenticated identity but no specific
//! permission. Book and BookInstance are deliberately not exposed here;
//! they are managed through the catalog routes only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        genre::{Genre, SaveGenre},
        language::{Language, SaveLanguage},
    },
};

use super::AuthenticatedUser;

// Authors

/// List all authors
#[utoipa::path(
    get,
    path = "/api/v1/authors",
    tag = "rest",
    operation_id = "api_list_authors",
    responses(
        (status = 200, description = "All authors", body = Vec<Author>)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.catalog.list_all_authors().await?;
    Ok(Json(authors))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/api/v1/authors",
    tag = "rest",
    operation_id = "api_create_author",
    security(("bearer_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(author): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let created = state.services.catalog.create_author(author).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get an author by ID
#[utoipa::path(
    get,
    path = "/api/v1/authors/{id}",
    tag = "rest",
    operation_id = "api_get_author",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author", body = Author),
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

/// Update an author
#[utoipa::path(
    put,
    path = "/api/v1/authors/{id}",
    tag = "rest",
    operation_id = "api_update_author",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(author): Json<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    let updated = state.services.catalog.update_author(id, author).await?;
    Ok(Json(updated))
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/api/v1/authors/{id}",
    tag = "rest",
    operation_id = "api_delete_author",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found"),
        (status = 409, description = "Author is still referenced by a book")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_author(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Genres

/// List all genres
#[utoipa::path(
    get,
    path = "/api/v1/genres",
    tag = "rest",
    operation_id = "api_list_genres",
    responses(
        (status = 200, description = "All genres", body = Vec<Genre>)
    )
)]
pub async fn list_genres(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.services.catalog.list_all_genres().await?;
    Ok(Json(genres))
}

/// Create a genre
#[utoipa::path(
    post,
    path = "/api/v1/genres",
    tag = "rest",
    operation_id = "api_create_genre",
    security(("bearer_auth" = [])),
    request_body = SaveGenre,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Genre already exists")
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(genre): Json<SaveGenre>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    let created = state.services.catalog.create_genre(genre).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a genre by ID
#[utoipa::path(
    get,
    path = "/api/v1/genres/{id}",
    tag = "rest",
    operation_id = "api_get_genre",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre", body = Genre),
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

/// Update a genre
#[utoipa::path(
    put,
    path = "/api/v1/genres/{id}",
    tag = "rest",
    operation_id = "api_update_genre",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Genre ID")),
    request_body = SaveGenre,
    responses(
        (status = 200, description = "Genre updated", body = Genre),
        (status = 404, description = "Genre not found"),
        (status = 409, description = "Genre already exists")
    )
)]
pub async fn update_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(genre): Json<SaveGenre>,
) -> AppResult<Json<Genre>> {
    let updated = state.services.catalog.update_genre(id, genre).await?;
    Ok(Json(updated))
}

/// Delete a genre
#[utoipa::path(
    delete,
    path = "/api/v1/genres/{id}",
    tag = "rest",
    operation_id = "api_delete_genre",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found"),
        (status = 409, description = "Genre is still referenced by a book")
    )
)]
pub async fn delete_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_genre(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Languages

/// List all languages
#[utoipa::path(
    get,
    path = "/api/v1/languages",
    tag = "rest",
    operation_id = "api_list_languages",
    responses(
        (status = 200, description = "All languages", body = Vec<Language>)
    )
)]
pub async fn list_languages(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Language>>> {
    let languages = state.services.catalog.list_all_languages().await?;
    Ok(Json(languages))
}

/// Create a language
#[utoipa::path(
    post,
    path = "/api/v1/languages",
    tag = "rest",
    operation_id = "api_create_language",
    security(("bearer_auth" = [])),
    request_body = SaveLanguage,
    responses(
        (status = 201, description = "Language created", body = Language),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Language already exists")
    )
)]
pub async fn create_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(language): Json<SaveLanguage>,
) -> AppResult<(StatusCode, Json<Language>)> {
    let created = state.services.catalog.create_language(language).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a language by ID
#[utoipa::path(
    get,
    path = "/api/v1/languages/{id}",
    tag = "rest",
    operation_id = "api_get_language",
    params(("id" = i32, Path, description = "Language ID")),
    responses(
        (status = 200, description = "Language", body = Language),
        (status = 404, description = "Language not found")
    )
)]
pub async fn get_language(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Language>> {
    let language = state.services.catalog.get_language(id).await?;
    Ok(Json(language))
}

/// Update a language
#[utoipa::path(
    put,
    path = "/api/v1/languages/{id}",
    tag = "rest",
    operation_id = "api_update_language",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Language ID")),
    request_body = SaveLanguage,
    responses(
        (status = 200, description = "Language updated", body = Language),
        (status = 404, description = "Language not found"),
        (status = 409, description = "Language already exists")
    )
)]
pub async fn update_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(language): Json<SaveLanguage>,
) -> AppResult<Json<Language>> {
    let updated = state.services.catalog.update_language(id, language).await?;
    Ok(Json(updated))
}

/// Delete a language
#[utoipa::path(
    delete,
    path = "/api/v1/languages/{id}",
    tag = "rest",
    operation_id = "api_delete_language",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Language ID")),
    responses(
        (status = 204, description = "Language deleted"),
        (status = 404, description = "Language not found")
    )
)]
pub async fn delete_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_language(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
