//! Amazon S3 report store

use super::{ensure_parent, file_name, object_key, ObjectStore, StoredObject, UploadReceipt};
use crate::config::StorageConfig;
use anyhow::Context;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ServerSideEncryption;
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Largest page `list_objects_v2` returns
const MAX_LIST_KEYS: usize = 1000;

/// Uploads reports to an S3 bucket with AES256 server-side encryption
pub struct S3Store {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3Store {
    /// Build a client from the ambient AWS credential chain
    pub async fn from_config(config: &StorageConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        Self::new(Client::new(&sdk_config), config)
    }

    pub fn new(client: Client, config: &StorageConfig) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            prefix: config.prefix.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn upload(&self, path: &Path) -> anyhow::Result<UploadReceipt> {
        let uploaded_at = Utc::now();
        let key = object_key(&self.prefix, uploaded_at, file_name(path)?);
        let size_bytes = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Report not found: {}", path.display()))?
            .len();

        tracing::info!(bucket = %self.bucket, key = %key, size_bytes, "Uploading report to S3");

        let body = ByteStream::from_path(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(body)
            .content_type("text/csv")
            .server_side_encryption(ServerSideEncryption::Aes256)
            .metadata("source", "crypto-sentinel")
            .metadata("uploaded_at", uploaded_at.to_rfc3339())
            .metadata("file_size", size_bytes.to_string())
            .send()
            .await
            .with_context(|| format!("S3 upload to {}/{} failed", self.bucket, key))?;

        Ok(UploadReceipt {
            location: format!("s3://{}/{}", self.bucket, key),
            key,
            size_bytes,
            uploaded_at,
        })
    }

    async fn list(&self, max_items: usize) -> anyhow::Result<Vec<StoredObject>> {
        let prefix = self.prefix.trim_matches('/');
        let resp = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .max_keys(max_items.min(MAX_LIST_KEYS) as i32)
            .send()
            .await
            .with_context(|| format!("Failed to list s3://{}/{}", self.bucket, prefix))?;

        let objects: Vec<StoredObject> = resp
            .contents()
            .iter()
            .filter_map(|obj| {
                Some(StoredObject {
                    key: obj.key()?.to_string(),
                    size_bytes: obj.size().unwrap_or(0).max(0) as u64,
                    last_modified: obj
                        .last_modified()
                        .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos())),
                })
            })
            .take(max_items)
            .collect();

        tracing::debug!(bucket = %self.bucket, prefix, count = objects.len(), "Listed reports");
        Ok(objects)
    }

    async fn download(&self, key: &str, dest: &Path) -> anyhow::Result<u64> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("S3 download of {}/{} failed", self.bucket, key))?;

        let bytes = resp
            .body
            .collect()
            .await
            .with_context(|| format!("Failed to read body of {}/{}", self.bucket, key))?
            .into_bytes();

        ensure_parent(dest).await?;
        tokio::fs::write(dest, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", dest.display()))?;

        tracing::info!(bucket = %self.bucket, key, path = %dest.display(), "Report downloaded");
        Ok(bytes.len() as u64)
    }

    fn name(&self) -> &str {
        "s3"
    }
}
