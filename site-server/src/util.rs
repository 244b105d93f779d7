//! Shared utility functions for site-server

use rand::Rng;

pub use shared::util::now_millis;

/// Random lowercase hex suffix for object keys
pub fn random_hex() -> String {
    format!("{:x}", rand::thread_rng().r#gen::<u64>())
}

/// Quoted SHA-256 entity tag for a blob
pub fn content_etag(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("\"{}\"", hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_hex_is_hex() {
        let h = random_hex();
        assert!(!h.is_empty());
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_content_etag_is_quoted_and_stable() {
        let a = content_etag(b"pizza");
        assert!(a.starts_with('"') && a.ends_with('"'));
        assert_eq!(a.len(), 66);
        assert_eq!(a, content_etag(b"pizza"));
        assert_ne!(a, content_etag(b"pasta"));
    }
}
