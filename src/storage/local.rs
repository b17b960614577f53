//! Filesystem report store

use super::{ensure_parent, file_name, object_key, ObjectStore, StoredObject, UploadReceipt};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Component, Path, PathBuf};

/// Copies reports under a root directory using the same key layout as S3
pub struct LocalStore {
    root: PathBuf,
    prefix: String,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
        }
    }

    /// Resolve `key` under the root, rejecting keys that would leave it
    fn resolve(&self, key: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(key);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if key.is_empty() || !contained {
            anyhow::bail!("Invalid object key {:?}", key);
        }
        Ok(self.root.join(relative))
    }

    /// Root-relative key with `/` separators
    fn key_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Option<Vec<&str>> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect();
        Some(parts?.join("/"))
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn upload(&self, path: &Path) -> anyhow::Result<UploadReceipt> {
        let uploaded_at = Utc::now();
        let key = object_key(&self.prefix, uploaded_at, file_name(path)?);
        let target = self.root.join(&key);

        ensure_parent(&target).await?;
        let size_bytes = tokio::fs::copy(path, &target)
            .await
            .with_context(|| format!("Failed to copy {} to {}", path.display(), target.display()))?;

        tracing::info!(path = %target.display(), size_bytes, "Report stored locally");

        Ok(UploadReceipt {
            location: target.display().to_string(),
            key,
            size_bytes,
            uploaded_at,
        })
    }

    async fn list(&self, max_items: usize) -> anyhow::Result<Vec<StoredObject>> {
        let base = self.root.join(self.prefix.trim_matches('/'));
        let mut objects = Vec::new();
        if !tokio::fs::try_exists(&base).await? {
            return Ok(objects);
        }

        let mut pending = vec![base];
        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir)
                .await
                .with_context(|| format!("Failed to read {}", dir.display()))?;
            while let Some(entry) = entries.next_entry().await? {
                let meta = entry.metadata().await?;
                let path = entry.path();
                if meta.is_dir() {
                    pending.push(path);
                } else if let Some(key) = self.key_for(&path) {
                    objects.push(StoredObject {
                        key,
                        size_bytes: meta.len(),
                        last_modified: meta.modified().ok().map(DateTime::<Utc>::from),
                    });
                }
            }
        }

        objects.sort_by(|a, b| a.key.cmp(&b.key));
        objects.truncate(max_items);
        Ok(objects)
    }

    async fn download(&self, key: &str, dest: &Path) -> anyhow::Result<u64> {
        let source = self.resolve(key)?;
        ensure_parent(dest).await?;
        let size_bytes = tokio::fs::copy(&source, dest)
            .await
            .with_context(|| format!("Object not found: {}", key))?;

        tracing::info!(key, path = %dest.display(), size_bytes, "Report fetched");
        Ok(size_bytes)
    }

    fn name(&self) -> &str {
        "local"
    }
}
