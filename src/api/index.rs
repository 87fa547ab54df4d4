//! Landing view: catalog counts and the per-session visit counter

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, services::sessions::SessionService};

/// Landing view response
#[derive(Serialize, ToSchema)]
pub struct IndexResponse {
    pub num_books: i64,
    pub num_instances: i64,
    /// Copies currently available for loan
    pub num_instances_available: i64,
    pub num_authors: i64,
    /// Number of times this session has loaded the landing view
    pub num_visits: i64,
}

/// Catalog landing view. Issues a session cookie when none is present and
/// increments that session's visit counter on every load.
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Catalog summary", body = IndexResponse)
    )
)]
pub async fn index(
    State(state): State<crate::AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<IndexResponse>)> {
    let cookie_name = state.config.session.cookie_name.clone();

    let (session_id, jar) = match jar.get(&cookie_name) {
        Some(cookie) => (cookie.value().to_string(), jar),
        None => {
            let session_id = SessionService::new_session_id();
            let cookie = Cookie::build((cookie_name, session_id.clone()))
                .path("/")
                .http_only(true)
                .build();
            (session_id, jar.add(cookie))
        }
    };

    let num_visits = state.services.sessions.increment_visits(&session_id).await?;
    let summary = state.services.catalog.summary().await?;

    Ok((
        jar,
        Json(IndexResponse {
            num_books: summary.num_books,
            num_instances: summary.num_instances,
            num_instances_available: summary.num_instances_available,
            num_authors: summary.num_authors,
            num_visits,
        }),
    ))
}
