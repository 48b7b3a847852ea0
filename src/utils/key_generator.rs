//! Short key generation.
//!
//! Keys are fixed-length strings drawn from a fixed alphanumeric alphabet.
//! Uniqueness is not checked here; the durable store rejects a duplicate.

use rand::Rng;

/// Alphabet used for generated keys.
pub const KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default number of characters in a generated key.
pub const DEFAULT_KEY_LENGTH: usize = 6;

/// Keys that would shadow a fixed route and are never handed out.
const RESERVED_KEYS: &[&str] = &["health", "shorten", "url"];

/// Source of candidate short keys.
#[cfg_attr(test, mockall::automock)]
pub trait KeyGenerator: Send + Sync {
    /// Returns a new candidate key.
    fn generate(&self) -> String;
}

/// Generates random keys from [`KEY_ALPHABET`].
///
/// Draws from `rand`'s thread-local generator, which is seeded from the
/// operating system and periodically reseeded, so concurrent callers never
/// share or reseed a global source.
#[derive(Debug, Clone)]
pub struct RandomKeyGenerator {
    length: usize,
}

impl RandomKeyGenerator {
    /// Creates a generator producing keys of `length` characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Returns the configured key length.
    pub fn length(&self) -> usize {
        self.length
    }

    fn random_key(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| KEY_ALPHABET[rng.random_range(0..KEY_ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for RandomKeyGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_LENGTH)
    }
}

impl KeyGenerator for RandomKeyGenerator {
    fn generate(&self) -> String {
        loop {
            let key = self.random_key();
            if !RESERVED_KEYS.contains(&key.as_str()) {
                return key;
            }
        }
    }
}
