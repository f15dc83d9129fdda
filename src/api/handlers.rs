//! API Handlers
//!
//! HTTP request handlers for each paste service endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};

use crate::api::view_renderer::{render_error, render_template, render_with_status};
use crate::config::Config;
use crate::error::{PasteError, Result};
use crate::health::HealthCheck;
use crate::kv::{current_timestamp_ms, KvStore};
use crate::models::{
    CreatePasteRequest, CreatePasteResponse, ErrorResponse, HealthResponse, PasteResponse,
};
use crate::paste::{PasteStore, ReadOutcome};
use crate::views::{HomeView, NotFoundView, PastePageView};

/// Header carrying an overriding clock value, honoured only in test mode.
pub const TEST_NOW_HEADER: &str = "x-test-now-ms";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Paste lifecycle over the shared store
    pub pastes: PasteStore,
    /// Store reachability probe
    pub health: HealthCheck,
    /// Whether `x-test-now-ms` may override the clock
    pub test_mode: bool,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(pastes: PasteStore, health: HealthCheck, test_mode: bool) -> Self {
        Self {
            pastes,
            health,
            test_mode,
        }
    }

    /// Creates a new AppState over `store` with parameters from the Config.
    pub fn from_config(store: Arc<dyn KvStore>, config: &Config) -> Self {
        let health = HealthCheck::new(
            store.clone(),
            Duration::from_millis(config.request_timeout_ms),
        );
        let pastes = PasteStore::from_config(store, config);
        Self::new(pastes, health, config.test_mode)
    }

    /// Current time for a read: the wall clock, or the test header in test mode.
    pub fn resolve_now(&self, headers: &HeaderMap) -> i64 {
        if self.test_mode {
            let overridden = headers
                .get(TEST_NOW_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<i64>().ok());
            if let Some(now) = overridden {
                return now;
            }
        }
        current_timestamp_ms()
    }
}

/// Handler for POST /api/pastes
///
/// Validates the body and creates a paste. The body is parsed as JSON
/// whatever its content type; malformed JSON is a 400.
pub async fn create_paste_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreatePasteResponse>> {
    let req: CreatePasteRequest = serde_json::from_slice(&body)
        .map_err(|e| PasteError::Validation(format!("Invalid JSON body: {}", e)))?;
    let input = req.parse()?;

    let created = state
        .pastes
        .create(
            input.content,
            input.ttl_seconds,
            input.max_views,
            current_timestamp_ms(),
        )
        .await?;

    Ok(Json(created.into()))
}

/// Handler for GET /api/pastes/:id
///
/// Reads a paste, counting the view. Every unavailable case is the same 404.
pub async fn get_paste_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<PasteResponse>> {
    let now = state.resolve_now(&headers);

    match state.pastes.read(&id, now).await? {
        ReadOutcome::Available(view) => Ok(Json(view.into())),
        ReadOutcome::Unavailable => Err(PasteError::NotFound),
    }
}

/// Handler for GET /api/healthz
///
/// Always 200; store reachability is reported in the body.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.health.check().await.into())
}

/// Handler for GET /p/:id
///
/// Server-side read of the paste rendered as HTML.
pub async fn paste_page_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let now = state.resolve_now(&headers);

    match state.pastes.read(&id, now).await {
        Ok(ReadOutcome::Available(view)) => render_template(PastePageView::new(id, view)),
        Ok(ReadOutcome::Unavailable) => {
            render_with_status(StatusCode::NOT_FOUND, NotFoundView::default())
        }
        Err(e) => {
            tracing::error!("Failed to load paste page: {}", e);
            render_error("The paste could not be loaded. Please try again.")
        }
    }
}

/// Handler for GET /
///
/// The create form; submits to `POST /api/pastes` from the browser.
pub async fn home_handler(State(state): State<AppState>) -> Response {
    render_template(HomeView::new(state.pastes.max_content_bytes()))
}

/// Fallback for unknown routes.
pub async fn fallback_handler() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found")))
}
