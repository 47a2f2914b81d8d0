//! Cryptographic utilities

use sha2::{Digest, Sha256};

/// Hash a string using SHA-256
pub fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Anonymize a client address for rate limiting.
///
/// The raw address is never stored or compared; only this digest is.
pub fn hash_ip(ip: &str) -> String {
    hash_string(ip)
}
