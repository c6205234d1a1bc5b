//! Short code generation.
//!
//! Codes are 8 characters drawn uniformly from `[a-z0-9]`, giving a keyspace
//! of 36^8 (about 2.8 × 10^12). Uniqueness is still enforced by the store;
//! see [`crate::application::services::AllocationService`].

use rand::Rng;

/// Symbols a short code may contain.
pub const ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Number of characters in every generated short code.
pub const CODE_LENGTH: usize = 8;

/// Generates a random short code.
///
/// Uses the thread-local CSPRNG; each position is sampled independently and
/// uniformly from [`ALPHABET`].
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 8);
/// assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}
