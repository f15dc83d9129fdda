//! Paste Record Module
//!
//! The persisted shape of a paste and the rules evaluated against it.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{PasteError, Result};
use crate::kv::Fields;

// == Field Names ==
pub const CONTENT_FIELD: &str = "content";
pub const CREATED_AT_FIELD: &str = "created_at";
pub const EXPIRES_AT_FIELD: &str = "expires_at";
pub const MAX_VIEWS_FIELD: &str = "max_views";
pub const VIEWS_FIELD: &str = "views";

// == Paste Record ==
/// A stored paste. Everything but `views` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteRecord {
    /// The shared text
    pub content: String,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
    /// Expiration timestamp (Unix milliseconds), None = never time-expires
    pub expires_at: Option<i64>,
    /// View limit, None = unlimited
    pub max_views: Option<u64>,
    /// Read attempts counted so far
    pub views: u64,
}

impl PasteRecord {
    // == Constructor ==
    /// Creates a fresh record with a zero view counter.
    pub fn new(
        content: String,
        created_at: i64,
        expires_at: Option<i64>,
        max_views: Option<u64>,
    ) -> Self {
        Self {
            content,
            created_at,
            expires_at,
            max_views,
            views: 0,
        }
    }

    // == Is Expired ==
    /// True once `now_ms` is strictly past the expiration time.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        matches!(self.expires_at, Some(expires) if expires < now_ms)
    }

    // == View Limit ==
    /// True when a counter value of `views` is past the view limit.
    pub fn is_exhausted_by(&self, views: u64) -> bool {
        matches!(self.max_views, Some(max) if views > max)
    }

    /// Views left once the counter reached `views`. None for unlimited pastes.
    pub fn remaining_views(&self, views: u64) -> Option<u64> {
        self.max_views.map(|max| max.saturating_sub(views))
    }

    // == Expiry Formatting ==
    /// Expiration instant as ISO 8601 with millisecond precision in UTC.
    pub fn expires_at_iso(&self) -> Option<String> {
        self.expires_at.and_then(iso_from_ms)
    }

    // == Serialization ==
    /// Flattens the record into store fields. Optional limits are omitted when unset.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(CONTENT_FIELD.to_string(), self.content.clone());
        fields.insert(CREATED_AT_FIELD.to_string(), self.created_at.to_string());
        fields.insert(VIEWS_FIELD.to_string(), self.views.to_string());
        if let Some(expires_at) = self.expires_at {
            fields.insert(EXPIRES_AT_FIELD.to_string(), expires_at.to_string());
        }
        if let Some(max_views) = self.max_views {
            fields.insert(MAX_VIEWS_FIELD.to_string(), max_views.to_string());
        }
        fields
    }

    /// Rebuilds a record from store fields.
    ///
    /// A missing `content` or an unparsable number is reported as an internal
    /// error: the record was not written by this service.
    pub fn from_fields(fields: &Fields) -> Result<Self> {
        let content = fields
            .get(CONTENT_FIELD)
            .cloned()
            .ok_or_else(|| corrupt(CONTENT_FIELD))?;

        Ok(Self {
            content,
            created_at: parse_field(fields, CREATED_AT_FIELD)?.unwrap_or_default(),
            expires_at: parse_field(fields, EXPIRES_AT_FIELD)?,
            max_views: parse_field(fields, MAX_VIEWS_FIELD)?,
            views: parse_field(fields, VIEWS_FIELD)?.unwrap_or_default(),
        })
    }
}

/// Formats a Unix millisecond timestamp like `2024-01-01T00:00:00.000Z`.
pub fn iso_from_ms(ms: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn parse_field<T: std::str::FromStr>(fields: &Fields, name: &str) -> Result<Option<T>> {
    fields
        .get(name)
        .map(|raw| raw.parse::<T>().map_err(|_| corrupt(name)))
        .transpose()
}

fn corrupt(field: &str) -> PasteError {
    PasteError::Internal(format!("paste record has invalid field '{}'", field))
}
