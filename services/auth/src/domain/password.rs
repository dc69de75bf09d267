//! Salted password hashing.
//!
//! SHA-256 over password + salt, hex digest, compared exact-match against the
//! stored value. Not a memory-hard KDF; acceptable for the threat model of an
//! office-internal tool and flagged as the production follow-up.

use rand::RngExt;
use sha2::{Digest, Sha256};

/// Generate a random salt: 32 bytes, hex-encoded (256 bits of entropy).
pub fn generate_salt() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}

/// Hash a password with its salt.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}
