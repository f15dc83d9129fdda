//! API Routes
//!
//! Configures the Axum router with all paste service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_paste_handler, fallback_handler, get_paste_handler, health_handler, home_handler,
    paste_page_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Create form
/// - `POST /api/pastes` - Create a paste
/// - `GET /api/pastes/:id` - Read a paste (counts a view)
/// - `GET /api/healthz` - Store reachability
/// - `GET /p/:id` - HTML view of a paste (counts a view)
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home_handler))
        .route("/api/pastes", post(create_paste_handler))
        .route("/api/pastes/:id", get(get_paste_handler))
        .route("/api/healthz", get(health_handler))
        .route("/p/:id", get(paste_page_handler))
        .fallback(fallback_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
