use std::sync::Arc;

use axum::middleware::from_fn;
use axum::{routing::get, Extension, Router};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod config;
mod error;
mod gateway;
mod handlers;
mod middleware;
mod services;
mod store;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up MONGODB_URI, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = crate::config::config();
    tracing::info!("Starting Haven API in {:?} mode", config.environment);

    let store = store::Store::open(&config.store)
        .await
        .unwrap_or_else(|e| panic!("failed to configure store: {}", e));

    // The server keeps serving when the store is down; affected requests
    // surface 500s until it comes back.
    match store.ping().await {
        Ok(()) => tracing::info!("store reachable at startup"),
        Err(e) => tracing::warn!("store unreachable at startup: {}", e),
    }

    let gateway: Arc<dyn gateway::PaymentGateway> =
        Arc::new(gateway::StripeGateway::new(&config.payments));

    let app = app(store, gateway);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Haven API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(store: store::Store, gateway: Arc<dyn gateway::PaymentGateway>) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Token-verified API
        .merge(protected_routes())
        // Global middleware
        .layer(Extension(store))
        .layer(Extension(gateway))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router {
    use axum::routing::{delete, patch, post};
    use handlers::{agreements, announcements, apartments, bookings, payments, tokens, users};

    Router::new()
        // Token minting
        .route("/jwt", post(tokens::create))
        // Registration (idempotent per email)
        .route("/users", post(users::create))
        // Apartment catalog
        .route("/apartment", get(apartments::list).post(apartments::create))
        .route(
            "/apartment/:id",
            get(apartments::get)
                .patch(apartments::update)
                .delete(apartments::remove),
        )
        // Bookings; deletion is policy-gated inside the handler
        .route("/books", post(bookings::create))
        .route("/books/:id", delete(bookings::remove))
        // Agreement requests and approval
        .route("/agree", get(agreements::list).post(agreements::create))
        .route(
            "/agree/:id",
            patch(agreements::approve).delete(agreements::remove),
        )
        // Residents' board
        .route(
            "/announcement",
            get(announcements::list).post(announcements::create),
        )
        // Payments
        .route("/create-payment-intent", post(payments::create_intent))
        .route("/payments", post(payments::record))
}

fn protected_routes() -> Router {
    use axum::routing::delete;
    use handlers::{bookings, payments, stats, users};

    Router::new()
        // User administration
        .route("/users", get(users::list))
        .route("/users/admin/:id", get(users::is_admin).patch(users::make_admin))
        .route(
            "/users/member/:id",
            get(users::is_member).patch(users::make_member),
        )
        .route("/users/:id", delete(users::remove))
        // Member-scoped reads
        .route("/books", get(bookings::list))
        .route("/payments/:email", get(payments::list_for))
        // Dashboard
        .route("/admin-stats", get(stats::summary))
        .route_layer(from_fn(middleware::verify_token))
}

async fn root() -> &'static str {
    "Haven API is running"
}

async fn health(Extension(store): Extension<store::Store>) -> impl axum::response::IntoResponse {
    match store.ping().await {
        Ok(()) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "database": e.to_string()
            })),
        ),
    }
}
