//! Folium Server - Library Lending System
//!
//! A Rust REST API server for managing a small lending library.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{delete, get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folium_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::{cache::CacheService, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("folium_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Folium Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Initialize Redis-backed cache
    let cache_service = CacheService::new(&config.redis.url)
        .await
        .expect("Failed to connect to Redis");

    tracing::info!("Connected to Redis");

    // Shared HTTP client for the metadata providers
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.metadata.request_timeout_seconds))
        .build()
        .expect("Failed to build HTTP client");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(
        repository,
        config.loans.clone(),
        config.metadata.clone(),
        http_client,
        cache_service,
    )
    .await
    .expect("Failed to create services");

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

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Books (catalog)
        .route("/books", get(api::books::list_books))
        .route("/books", post(api::books::create_book))
        .route("/books/:isbn", get(api::books::get_book))
        .route("/books/:isbn", delete(api::books::delete_book))
        .route("/books/:isbn/metadata", get(api::books::lookup_metadata))
        .route("/books/:isbn/reviews", get(api::books::list_reviews))
        .route("/books/:isbn/reviews", post(api::books::create_review))
        // Customers
        .route("/customers", get(api::customers::list_customers))
        .route("/customers", post(api::customers::create_customer))
        .route("/customers/:id", get(api::customers::get_customer))
        .route("/customers/:id/loans", get(api::customers::get_customer_loans))
        .route(
            "/customers/:id/loans/overdue",
            get(api::customers::get_customer_overdue),
        )
        .route("/customers/:id/returns", post(api::customers::return_all_loans))
        .route("/customers/:id/read-books", get(api::customers::get_read_books))
        .route(
            "/customers/:id/reading-list",
            get(api::customers::get_reading_list),
        )
        .route(
            "/customers/:id/reading-list",
            post(api::customers::add_wanted_book),
        )
        // Loans
        .route("/loans", post(api::loans::create_loan))
        .route("/loans/overdue", get(api::loans::list_overdue))
        .route("/loans/:id/return", post(api::loans::return_loan))
        .route("/loans/:id/renew", post(api::loans::renew_loan))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
