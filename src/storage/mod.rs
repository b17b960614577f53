//! Report storage
//!
//! Uploads finished reports to object storage under a date-partitioned key,
//! lists what was stored and fetches reports back.

mod local;
mod s3;

pub use local::LocalStore;
pub use s3::S3Store;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where an uploaded report ended up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Store-specific location, e.g. `s3://bucket/key`
    pub location: String,
    pub key: String,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// A stored report as seen by [`ObjectStore::list`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredObject {
    pub key: String,
    pub size_bytes: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Trait for report storage backends
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(&self, path: &Path) -> anyhow::Result<UploadReceipt>;

    /// Up to `max_items` objects under the store prefix, in key order
    async fn list(&self, max_items: usize) -> anyhow::Result<Vec<StoredObject>>;

    /// Write the object at `key` to `dest`, returning the bytes written
    async fn download(&self, key: &str, dest: &Path) -> anyhow::Result<u64>;

    /// Identifier used in logs
    fn name(&self) -> &str;
}

/// `<prefix>/<YYYY>/<MM>/<DD>/<file_name>`
pub fn object_key(prefix: &str, date: DateTime<Utc>, file_name: &str) -> String {
    let prefix = prefix.trim_matches('/');
    let dated = date.format("%Y/%m/%d");
    if prefix.is_empty() {
        format!("{}/{}", dated, file_name)
    } else {
        format!("{}/{}/{}", prefix, dated, file_name)
    }
}

fn file_name(path: &Path) -> anyhow::Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid report path {}", path.display()))
}

async fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_object_key() {
        let date = Utc.with_ymd_and_hms(2024, 2, 5, 23, 0, 0).unwrap();
        assert_eq!(
            object_key("reports/daily", date, "r.csv"),
            "reports/daily/2024/02/05/r.csv"
        );
        assert_eq!(object_key("/reports/", date, "r.csv"), "reports/2024/02/05/r.csv");
        assert_eq!(object_key("", date, "r.csv"), "2024/02/05/r.csv");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("/a/b/report.csv")).unwrap(), "report.csv");
        assert!(file_name(Path::new("/")).is_err());
    }
}
