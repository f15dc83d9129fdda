//! Request DTOs for the paste API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{PasteError, Result};

/// Request body for paste creation (POST /api/pastes)
///
/// Fields are kept as raw JSON so that wrong types produce a 400 with a
/// message instead of an extractor rejection.
///
/// # Fields
/// - `content`: Text to share
/// - `ttl_seconds`: Optional lifetime, integral number or numeric string
/// - `max_views`: Optional view limit, integral number or numeric string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePasteRequest {
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub ttl_seconds: Option<Value>,
    #[serde(default)]
    pub max_views: Option<Value>,
}

/// Typed creation input extracted from a [`CreatePasteRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePasteInput {
    pub content: String,
    pub ttl_seconds: Option<i64>,
    pub max_views: Option<i64>,
}

impl CreatePasteRequest {
    /// Checks field types and parses the numeric limits.
    ///
    /// Range checks on the limits are left to the paste store.
    pub fn parse(self) -> Result<CreatePasteInput> {
        let content = match self.content {
            Some(Value::String(content)) => content,
            _ => return Err(PasteError::Validation("Content is required".to_string())),
        };

        Ok(CreatePasteInput {
            content,
            ttl_seconds: parse_integer("ttl_seconds", self.ttl_seconds)?,
            max_views: parse_integer("max_views", self.max_views)?,
        })
    }
}

/// Largest float magnitude that still converts to `i64` without losing digits.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_991.0;

/// Accepts JSON integers, integral floats such as `60.0`, and strings holding
/// a base-10 integer. Fractional numbers are rejected rather than truncated.
fn parse_integer(name: &str, value: Option<Value>) -> Result<Option<i64>> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT)
                .map(|f| f as i64)
        }),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    parsed
        .map(Some)
        .ok_or_else(|| PasteError::Validation(format!("{} must be a positive integer", name)))
}
