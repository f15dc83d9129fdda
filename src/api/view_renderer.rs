//! View rendering helpers
//!
//! Turns askama views into responses and falls back to an error page when
//! rendering fails.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::views::ErrorView;

/// Renders a template as a 200 HTML response.
pub fn render_template<T: Template>(template: T) -> Response {
    render_with_status(StatusCode::OK, template)
}

/// Renders a template with the given status, or the error page on failure.
pub fn render_with_status<T: Template>(status: StatusCode, template: T) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            render_error("The page could not be rendered. Please try again.")
        }
    }
}

/// Renders the 500 page, falling back to plain text if that fails too.
pub fn render_error(message: &str) -> Response {
    match ErrorView::new(message).render() {
        Ok(html) => (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error view: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, message.to_string()).into_response()
        }
    }
}
