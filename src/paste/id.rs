//! Paste ID Module
//!
//! Short random identifiers drawn from the alphanumeric alphabet.

use rand::distributions::Distribution;
use rand::Rng;

/// Number of characters in a paste ID.
pub const PASTE_ID_LENGTH: usize = 8;

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Samples single ID characters, or whole IDs via [`generate_id`].
pub struct Generator;

impl Distribution<char> for Generator {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        let value = rng.gen_range(0..ALPHABET.len());
        ALPHABET[value] as char
    }
}

/// Generates a fresh paste ID.
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..PASTE_ID_LENGTH).map(|_| Generator.sample(rng)).collect()
}

/// True if `id` could have been produced by [`generate_id`].
pub fn is_valid_id(id: &str) -> bool {
    id.len() == PASTE_ID_LENGTH && id.bytes().all(|b| ALPHABET.contains(&b))
}
