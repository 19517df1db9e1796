//! Image fingerprinting for result memoization
//!
//! Content-derived cache key: identical bytes always produce identical
//! fingerprints. Used purely for cache lookup, not as a security primitive;
//! collisions are assumed negligible and not defended against.

use sha2::{Digest, Sha256};

/// Compute the deterministic fingerprint of raw image bytes.
///
/// Returns the SHA-256 digest as lowercase hex (64 characters).
pub fn fingerprint(image: &[u8]) -> String {
    format!("{:x}", Sha256::digest(image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        let a = fingerprint(b"shot-image");
        let b = fingerprint(b"shot-image");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_differs_on_content() {
        assert_ne!(fingerprint(b"image-a"), fingerprint(b"image-b"));
    }

    #[test]
    fn test_fingerprint_is_fixed_length_hex() {
        let fp = fingerprint(b"");
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
