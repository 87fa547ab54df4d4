//! LocalLibrary Server - library catalog and circulation
//!
//! A REST API server for a small library catalog.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use locallibrary_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::{sessions::SessionService, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "locallibrary_server={},tower_http=debug",
            config.logging.level
        )
        .into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LocalLibrary Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Initialize the Redis-backed session service
    let sessions = SessionService::new(&config.redis.url, config.session.ttl_seconds)
        .await
        .expect("Failed to connect to Redis");

    tracing::info!("Connected to Redis");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone(), sessions);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Catalog routes (landing page, entity management, circulation)
    let catalog = Router::new()
        // Landing page with per-session visit counter
        .route("/catalog", get(api::index::index))
        // Books
        .route("/catalog/books", get(api::books::list_books))
        .route("/catalog/books", post(api::books::create_book))
        .route("/catalog/books/:id", get(api::books::get_book))
        .route("/catalog/books/:id", put(api::books::update_book))
        .route("/catalog/books/:id", delete(api::books::delete_book))
        // Authors
        .route("/catalog/authors", get(api::authors::list_authors))
        .route("/catalog/authors", post(api::authors::create_author))
        .route("/catalog/authors/:id", get(api::authors::get_author))
        .route("/catalog/authors/:id", put(api::authors::update_author))
        .route("/catalog/authors/:id", delete(api::authors::delete_author))
        // Genres
        .route("/catalog/genres", get(api::genres::list_genres))
        .route("/catalog/genres", post(api::genres::create_genre))
        .route("/catalog/genres/:id", get(api::genres::get_genre))
        .route("/catalog/genres/:id", put(api::genres::update_genre))
        .route("/catalog/genres/:id", delete(api::genres::delete_genre))
        // Languages
        .route("/catalog/languages", get(api::languages::list_languages))
        .route("/catalog/languages", post(api::languages::create_language))
        .route("/catalog/languages/:id", get(api::languages::get_language))
        .route("/catalog/languages/:id", put(api::languages::update_language))
        .route(
            "/catalog/languages/:id",
            delete(api::languages::delete_language),
        )
        // Book copies
        .route(
            "/catalog/bookinstances",
            get(api::book_instances::list_instances),
        )
        .route(
            "/catalog/bookinstances",
            post(api::book_instances::create_instance),
        )
        .route(
            "/catalog/bookinstances/:id",
            get(api::book_instances::get_instance),
        )
        .route(
            "/catalog/bookinstances/:id",
            put(api::book_instances::update_instance),
        )
        .route(
            "/catalog/bookinstances/:id",
            delete(api::book_instances::delete_instance),
        )
        // Circulation
        .route("/catalog/mybooks", get(api::book_instances::my_loans))
        .route("/catalog/borrowed", get(api::book_instances::all_loans))
        .route(
            "/catalog/bookinstances/:id/renew",
            get(api::book_instances::renewal_proposal),
        )
        .route(
            "/catalog/bookinstances/:id/renew",
            post(api::book_instances::renew_loan),
        );

    // Generic JSON API
    let api_v1 = Router::new()
        .route("/authors", get(api::rest::list_authors))
        .route("/authors", post(api::rest::create_author))
        .route("/authors/:id", get(api::rest::get_author))
        .route("/authors/:id", put(api::rest::update_author))
        .route("/authors/:id", delete(api::rest::delete_author))
        .route("/genres", get(api::rest::list_genres))
        .route("/genres", post(api::rest::create_genre))
        .route("/genres/:id", get(api::rest::get_genre))
        .route("/genres/:id", put(api::rest::update_genre))
        .route("/genres/:id", delete(api::rest::delete_genre))
        .route("/languages", get(api::rest::list_languages))
        .route("/languages", post(api::rest::create_language))
        .route("/languages/:id", get(api::rest::get_language))
        .route("/languages/:id", put(api::rest::update_language))
        .route("/languages/:id", delete(api::rest::delete_language));

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        .merge(catalog)
        .nest("/api/v1", api_v1)
        .with_state(state)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
