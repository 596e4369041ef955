use sha2::{Digest, Sha256};

/// Hash an identifier (phone number or email) using SHA256
///
/// Raw identifiers never reach the logs; the hash still lets log lines for
/// the same person be correlated.
pub fn hash_identifier(identifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(identifier.trim().to_lowercase().as_bytes());
    format!("{:x}", hasher.finalize())
}
