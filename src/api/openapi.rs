//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auth, authors, book_instances, books, genres, health, index, languages, rest,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LocalLibrary API",
        version = "1.0.0",
        description = "Library catalog and circulation REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Landing page
        index::index,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Languages
        languages::list_languages,
        languages::get_language,
        languages::create_language,
        languages::update_language,
        languages::delete_language,
        // Book instances
        book_instances::list_instances,
        book_instances::get_instance,
        book_instances::create_instance,
        book_instances::update_instance,
        book_instances::delete_instance,
        // Loans
        book_instances::my_loans,
        book_instances::all_loans,
        book_instances::renewal_proposal,
        book_instances::renew_loan,
        // Generic REST API
        rest::list_authors,
        rest::create_author,
        rest::get_author,
        rest::update_author,
        rest::delete_author,
        rest::list_genres,
        rest::create_genre,
        rest::get_genre,
        rest::update_genre,
        rest::delete_genre,
        rest::list_languages,
        rest::create_language,
        rest::get_language,
        rest::update_language,
        rest::delete_language,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::user::User,
            // Landing page
            index::IndexResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::BookDetails,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            // Genres
            crate::models::genre::Genre,
            crate::models::genre::SaveGenre,
            // Languages
            crate::models::language::Language,
            crate::models::language::SaveLanguage,
            // Book instances
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::LoanStatus,
            crate::models::book_instance::LoanEntry,
            crate::models::book_instance::CreateBookInstance,
            crate::models::book_instance::UpdateBookInstance,
            crate::models::book_instance::RenewLoan,
            book_instances::RenewalProposal,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "catalog", description = "Catalog landing page"),
        (name = "books", description = "Book management"),
        (name = "authors", description = "Author management"),
        (name = "genres", description = "Genre management"),
        (name = "languages", description = "Language management"),
        (name = "bookinstances", description = "Book copy management"),
        (name = "loans", description = "Circulation and renewals"),
        (name = "rest", description = "Generic JSON API")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
