//! API Module
//!
//! HTTP handlers and routing for the paste service.
//!
//! # Endpoints
//! - `GET /` - Create form
//! - `POST /api/pastes` - Create a paste
//! - `GET /api/pastes/:id` - Read a paste
//! - `GET /api/healthz` - Health check endpoint
//! - `GET /p/:id` - HTML paste page

pub mod handlers;
pub mod routes;
pub mod view_renderer;

pub use handlers::*;
pub use routes::create_router;
