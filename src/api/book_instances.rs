//! Book instance (physical copy) and loan endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book_instance::{
            BookInstance, CreateBookInstance, LoanEntry, RenewLoan, UpdateBookInstance,
        },
        user::Permission,
    },
};

use super::{
    books::{PaginatedResponse, DEFAULT_PER_PAGE},
    AuthenticatedUser, PageQuery,
};

/// Renewal proposal, returned by the renewal form route before submission
#[derive(Serialize, ToSchema)]
pub struct RenewalProposal {
    pub instance: BookInstance,
    /// Proposed due date: three weeks from today
    pub proposed_due_back: NaiveDate,
}

/// List all copies, paginated, ordered by due date descending
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    params(PageQuery),
    responses(
        (status = 200, description = "List of copies", body = PaginatedResponse<LoanEntry>)
    )
)]
pub async fn list_instances(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<LoanEntry>>> {
    let page = query.page();
    let (items, total) = state
        .services
        .catalog
        .list_instances(page, DEFAULT_PER_PAGE)
        .await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page: DEFAULT_PER_PAGE,
    }))
}

/// Get a copy by its UUID
#[utoipa::path(
    get,
    path = "/catalog/bookinstances/{id}",
    tag = "bookinstances",
    params(
        ("id" = Uuid, Path, description = "Copy UUID")
    ),
    responses(
        (status = 200, description = "Copy details", body = BookInstance),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookInstance>> {
    let instance = state.services.catalog.get_instance(id).await?;
    Ok(Json(instance))
}

/// Register a new physical copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    security(("bearer_auth" = [])),
    request_body = CreateBookInstance,
    responses(
        (status = 201, description = "Copy created", body = BookInstance),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Missing permission")
    )
)]
pub async fn create_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(instance): Json<CreateBookInstance>,
) -> AppResult<(StatusCode, Json<BookInstance>)> {
    claims.require(Permission::AddBookInstance)?;

    let created = state.services.catalog.create_instance(instance).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a copy (imprint, due date, status, borrower)
#[utoipa::path(
    put,
    path = "/catalog/bookinstances/{id}",
    tag = "bookinstances",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy UUID")
    ),
    request_body = UpdateBookInstance,
    responses(
        (status = 200, description = "Copy updated", body = BookInstance),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn update_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(instance): Json<UpdateBookInstance>,
) -> AppResult<Json<BookInstance>> {
    claims.require(Permission::ChangeBookInstance)?;

    let updated = state.services.catalog.update_instance(id, instance).await?;
    Ok(Json(updated))
}

/// Remove a copy from the catalog
#[utoipa::path(
    delete,
    path = "/catalog/bookinstances/{id}",
    tag = "bookinstances",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy UUID")
    ),
    responses(
        (status = 204, description = "Copy deleted"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn delete_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require(Permission::DeleteBookInstance)?;

    state.services.catalog.delete_instance(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The authenticated user's outstanding loans, due date ascending
#[utoipa::path(
    get,
    path = "/catalog/mybooks",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Own outstanding loans", body = PaginatedResponse<LoanEntry>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<LoanEntry>>> {
    let page = query.page();
    let (items, total) = state
        .services
        .loans
        .borrower_loans(claims.user_id, page, DEFAULT_PER_PAGE)
        .await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page: DEFAULT_PER_PAGE,
    }))
}

/// All outstanding loans across all borrowers (librarian view)
#[utoipa::path(
    get,
    path = "/catalog/borrowed",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "All outstanding loans", body = PaginatedResponse<LoanEntry>),
        (status = 403, description = "Missing permission")
    )
)]
pub async fn all_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<LoanEntry>>> {
    claims.require(Permission::MarkReturned)?;

    let page = query.page();
    let (items, total) = state
        .services
        .loans
        .all_loans(page, DEFAULT_PER_PAGE)
        .await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page: DEFAULT_PER_PAGE,
    }))
}

/// Renewal form data: the copy and the proposed default due date
#[utoipa::path(
    get,
    path = "/catalog/bookinstances/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy UUID")
    ),
    responses(
        (status = 200, description = "Renewal proposal", body = RenewalProposal),
        (status = 404, description = "Copy not found"),
        (status = 403, description = "Missing permission")
    )
)]
pub async fn renewal_proposal(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RenewalProposal>> {
    claims.require(Permission::MarkReturned)?;

    let (instance, proposed_due_back) = state.services.loans.proposed_renewal(id).await?;
    Ok(Json(RenewalProposal {
        instance,
        proposed_due_back,
    }))
}

/// Renew a loan. Absent date means three weeks from today.
#[utoipa::path(
    post,
    path = "/catalog/bookinstances/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy UUID")
    ),
    request_body = RenewLoan,
    responses(
        (status = 200, description = "Loan renewed", body = BookInstance),
        (status = 404, description = "Copy not found"),
        (status = 403, description = "Missing permission")
    )
)]
pub async fn renew_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<RenewLoan>,
) -> AppResult<Json<BookInstance>> {
    claims.require(Permission::MarkReturned)?;

    let renewed = state.services.loans.renew(id, request.due_back).await?;
    Ok(Json(renewed))
}
