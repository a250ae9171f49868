//! Room 19 Server - Library Reservation and Loan System

use axum::{
    routing::{get, post, put},
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

use room19_server::{
    api,
    config::AppConfig,
    domain::civil::SystemClock,
    repository::Repository,
    services::Services,
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
        .unwrap_or_else(|_| format!("room19_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Room 19 Server v{}", env!("CARGO_PKG_VERSION"));

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

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services; the clock is injected so everything
    // below it computes against WIB civil dates
    let repository = Repository::new(pool);
    let services = Services::new(
        repository,
        config.reservations.clone(),
        config.loans.clone(),
        Arc::new(SystemClock),
    );

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
        // Availability
        .route("/availability/check", post(api::availability::check_availability))
        .route("/events/:id/remaining", get(api::availability::event_remaining_slots))
        .route(
            "/sessions/:date/:shift/remaining",
            get(api::availability::session_remaining_slots),
        )
        // Bookings
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings", get(api::bookings::list_bookings))
        .route("/bookings/:id/cancel", post(api::bookings::cancel_booking))
        // Events
        .route("/events", get(api::events::list_events))
        .route("/events", post(api::events::create_event))
        .route("/events/:id", get(api::events::get_event))
        .route("/events/:id", put(api::events::update_event))
        // Loans
        .route("/loans", post(api::loans::create_loan))
        .route("/loans/stats", get(api::loans::loan_stats))
        .route("/loans/:id", get(api::loans::get_loan))
        .route("/loans/:id/return", post(api::loans::return_loan))
        .route("/loans/:id/extend", post(api::loans::request_extension))
        .route("/users/:id/loans", get(api::loans::get_user_loans))
        .route("/users/:id/loans/history", get(api::loans::get_user_history))
        // Payments
        .route("/payments/callback", post(api::payments::payment_callback))
        // Memberships
        .route("/memberships", get(api::memberships::list_memberships))
        .route("/memberships/:id", get(api::memberships::get_membership))
        .route(
            "/memberships/:id/status",
            put(api::memberships::update_membership_status),
        )
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
