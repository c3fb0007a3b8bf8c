//! SHA-256 credential hashing

use crate::core::traits::CredentialHasher;
use sha2::{Digest, Sha256};

/// Hashes secrets with SHA-256, rendered as 64 lowercase hex characters
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl CredentialHasher for Sha256Hasher {
    fn hash(&self, secret: &str) -> String {
        hex::encode(Sha256::digest(secret.as_bytes()))
    }
}
