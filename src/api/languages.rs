//! Language endpoints (catalog views)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        language::{Language, SaveLanguage},
        user::Permission,
    },
};

use super::{
    books::{PaginatedResponse, DEFAULT_PER_PAGE},
    AuthenticatedUser, PageQuery,
};

/// List languages, paginated
#[utoipa::path(
    get,
    path = "/catalog/languages",
    tag = "languages",
    params(PageQuery),
    responses(
        (status = 200, description = "List of languages", body = PaginatedResponse<Language>)
    )
)]
pub async fn list_languages(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<Language>>> {
    let page = query.page();
    let (items, total) = state
        .services
        .catalog
        .list_languages(page, DEFAULT_PER_PAGE)
        .await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page: DEFAULT_PER_PAGE,
    }))
}

/// Get language details by ID
#[utoipa::path(
    get,
    path = "/catalog/languages/{id}",
    tag = "languages",
    params(
        ("id" = i32, Path, description = "Language ID")
    ),
    responses(
        (status = 200, description = "Language details", body = Language),
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

/// Create a new language. Names clash case-insensitively.
#[utoipa::path(
    post,
    path = "/catalog/languages",
    tag = "languages",
    security(("bearer_auth" = [])),
    request_body = SaveLanguage,
    responses(
        (status = 201, description = "Language created", body = Language),
        (status = 403, description = "Missing permission"),
        (status = 409, description = "Language already exists")
    )
)]
pub async fn create_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(language): Json<SaveLanguage>,
) -> AppResult<(StatusCode, Json<Language>)> {
    claims.require(Permission::AddLanguage)?;

    let created = state.services.catalog.create_language(language).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Rename a language
#[utoipa::path(
    put,
    path = "/catalog/languages/{id}",
    tag = "languages",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Language ID")
    ),
    request_body = SaveLanguage,
    responses(
        (status = 200, description = "Language updated", body = Language),
        (status = 404, description = "Language not found"),
        (status = 409, description = "Language already exists")
    )
)]
pub async fn update_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(language): Json<SaveLanguage>,
) -> AppResult<Json<Language>> {
    claims.require(Permission::ChangeLanguage)?;

    let updated = state.services.catalog.update_language(id, language).await?;
    Ok(Json(updated))
}

/// Delete a language. Books referencing it keep existing with their
/// language unset.
#[utoipa::path(
    delete,
    path = "/catalog/languages/{id}",
    tag = "languages",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Language ID")
    ),
    responses(
        (status = 204, description = "Language deleted"),
        (status = 404, description = "Language not found")
    )
)]
pub async fn delete_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require(Permission::DeleteLanguage)?;

    state.services.catalog.delete_language(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
