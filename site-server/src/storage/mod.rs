//! Object store gateway for uploaded images

mod memory;
mod s3;

use async_trait::async_trait;
use bytes::Bytes;

pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;

use crate::BoxError;

/// Image extensions accepted on upload
pub const SUPPORTED_FORMATS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Blob read back from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: Option<String>,
    /// Quoted entity tag
    pub etag: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), BoxError>;

    /// `None` when the key does not exist
    async fn get(&self, key: &str) -> Result<Option<StoredObject>, BoxError>;
}

/// Extension of an uploaded file name; lower-cased, `jpg` when there is none
pub fn upload_extension(file_name: &str) -> String {
    let name = file_name.to_lowercase();
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_string(),
        None => "jpg".to_string(),
    }
}

/// Content type stored with an upload
pub fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}

/// Fresh object key: `gal_<millis>_<hex>.<ext>`
pub fn upload_key(ext: &str) -> String {
    format!(
        "gal_{}_{}.{ext}",
        crate::util::now_millis(),
        crate::util::random_hex()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_extension() {
        assert_eq!(upload_extension("Foto.JPG"), "jpg");
        assert_eq!(upload_extension("archive.tar.webp"), "webp");
        assert_eq!(upload_extension("upload"), "jpg");
        assert_eq!(upload_extension("shot."), "");
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("png"), "image/png");
        assert_eq!(content_type_for("webp"), "image/webp");
        assert_eq!(content_type_for("jpeg"), "image/jpeg");
        assert_eq!(content_type_for("jpg"), "image/jpeg");
    }

    #[test]
    fn test_upload_key_shape() {
        let key = upload_key("png");
        let rest = key.strip_prefix("gal_").unwrap();
        let (stem, ext) = rest.rsplit_once('.').unwrap();
        assert_eq!(ext, "png");
        let (millis, hex) = stem.split_once('_').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(upload_key("png"), key);
    }
}
