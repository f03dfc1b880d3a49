//! One-way password digests.
//!
//! SHA-256 over the UTF-8 bytes of the plaintext, lowercase hex encoded.
//! Deterministic: the same input always yields the same digest, and there
//! is no per-user salt, so two users sharing a password share a digest.
//! That weakness is part of the stored credential format and is kept
//! rather than silently migrated.

use sha2::{Digest, Sha256};

/// Digest a plaintext password.
pub fn digest(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}

/// Check a plaintext password against a stored digest.
pub fn verify(plaintext: &str, stored: &str) -> bool {
    digest(plaintext) == stored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(digest("secret1"), digest("secret1"));
    }

    #[test]
    fn digest_is_hex_sha256() {
        // Well-known SHA-256 of the empty string.
        assert_eq!(
            digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(digest("secret1").len(), 64);
    }

    #[test]
    fn verify_accepts_only_the_original_plaintext() {
        let stored = digest("secret1");
        assert!(verify("secret1", &stored));
        assert!(!verify("secret2", &stored));
        assert!(!verify("", &stored));
    }
}
