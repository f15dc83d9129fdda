//! Paste Module
//!
//! Paste records, ID generation and the create/read lifecycle.

mod id;
mod record;
mod store;


// Re-export public types
pub use id::{generate_id, is_valid_id, PASTE_ID_LENGTH};
pub use record::{iso_from_ms, PasteRecord, VIEWS_FIELD};
pub use store::{storage_key, CreatedPaste, PasteStore, PasteView, ReadOutcome, KEY_PREFIX};
