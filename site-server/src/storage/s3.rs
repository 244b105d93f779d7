//! S3-compatible object store (AWS S3, R2, MinIO)

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;

use super::{ObjectStore, StoredObject};
use crate::BoxError;

#[derive(Clone)]
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), BoxError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body.into())
            .content_type(content_type)
            .send()
            .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, BoxError> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) if err.as_service_error().is_some_and(|e| e.is_no_such_key()) => {
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let content_type = output.content_type().map(str::to_string);
        let etag = output.e_tag().map(str::to_string);
        let body = output.body.collect().await?.into_bytes();
        let etag = etag.unwrap_or_else(|| crate::util::content_etag(&body));

        Ok(Some(StoredObject {
            body,
            content_type,
            etag,
        }))
    }
}
