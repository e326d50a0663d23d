//! Demo-grade credential digests.
//!
//! Unsalted SHA-256 is fine for a seeded demo directory and keeps the crate
//! free of heavyweight KDF dependencies. Do not reuse for real credentials.

use sha2::{Digest, Sha256};

pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    format!("{digest:x}")
}

pub fn verify_password(password: &str, digest: &str) -> bool {
    hash_password(password) == digest
}
