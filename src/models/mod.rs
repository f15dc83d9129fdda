//! Request and Response models for the paste API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CreatePasteInput, CreatePasteRequest};
pub use responses::{CreatePasteResponse, ErrorResponse, HealthResponse, PasteResponse};
