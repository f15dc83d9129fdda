//! HTML view models
//!
//! Each page is an askama template under `templates/`; askama escapes every
//! interpolated value.

use askama::Template;

use crate::paste::PasteView;

const NOT_FOUND_MESSAGE: &str =
    "This paste is either unavailable, expired, or has reached its view limit.";

/// Landing page with the create form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct HomeView {
    pub max_content_kib: usize,
}

impl HomeView {
    pub fn new(max_content_bytes: usize) -> Self {
        Self {
            max_content_kib: max_content_bytes.div_ceil(1024),
        }
    }
}

/// An available paste.
#[derive(Template)]
#[template(path = "paste.html")]
pub struct PastePageView {
    pub id: String,
    pub content: String,
    pub remaining_views: Option<u64>,
    pub expires_at: Option<String>,
}

impl PastePageView {
    pub fn new(id: impl Into<String>, view: PasteView) -> Self {
        Self {
            id: id.into(),
            content: view.content,
            remaining_views: view.remaining_views,
            expires_at: view.expires_at,
        }
    }
}

/// Shown for every unavailable paste, whatever the reason.
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundView {
    pub message: &'static str,
}

impl Default for NotFoundView {
    fn default() -> Self {
        Self {
            message: NOT_FOUND_MESSAGE,
        }
    }
}

/// Shown when the store failed.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorView {
    pub message: String,
}

impl ErrorView {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
