//! Request key derivation and filesystem-safe naming.

use precache_core::http::Request;
use sha2::{Digest, Sha256};

/// Derive the store key for a request.
///
/// Matching is method-sensitive and keeps the query string, so the key is
/// the method joined with the full URL.
pub fn request_key(request: &Request) -> String {
    format!("{}:{}", request.method.as_str(), request.url)
}

/// Sanitize a cache name for use as a directory name.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

/// Hex-encoded digest of a request key, used as the entry file stem.
pub fn entry_file_stem(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}
