use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

use crate::storage::ObjectStorage;

/// Stores objects under `{root}/{bucket}/{path}` and serves them from
/// `{public_base}/{bucket}/{path}`.
pub struct LocalDiskStorage {
    root: PathBuf,
    public_base: String,
}

impl LocalDiskStorage {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn object_path(&self, bucket: &str, path: &str) -> Result<PathBuf> {
        let relative = Path::new(bucket).join(path);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            bail!("Invalid object path: {}/{}", bucket, path);
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStorage for LocalDiskStorage {
    async fn put(&self, bucket: &str, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let target = self.object_path(bucket, path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .with_context(|| format!("Failed to write {}", target.display()))?;
        log::debug!("Stored {} ({})", target.display(), content_type);
        Ok(())
    }

    async fn exists(&self, bucket: &str, path: &str) -> Result<bool> {
        let target = self.object_path(bucket, path)?;
        tokio::fs::try_exists(&target)
            .await
            .with_context(|| format!("Failed to stat {}", target.display()))
    }

    fn public_url(&self, bucket: &str, path: &str) -> Option<String> {
        if self.public_base.is_empty() {
            return None;
        }
        Some(format!("{}/{}/{}", self.public_base, bucket, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn writes_under_bucket_directory() {
        let root = std::env::temp_dir().join(format!("smartqr-{}", nanoid::nanoid!(8)));
        let storage = LocalDiskStorage::new(&root, "https://cdn.test/");

        storage
            .put("qr_assets", "qr_pdfs/u1/a.pdf", b"%PDF".to_vec(), "application/pdf")
            .await
            .unwrap();

        let written = tokio::fs::read(root.join("qr_assets/qr_pdfs/u1/a.pdf")).await.unwrap();
        assert_eq!(written, b"%PDF");
        assert!(storage.exists("qr_assets", "qr_pdfs/u1/a.pdf").await.unwrap());
        assert!(!storage.exists("qr_assets", "qr_pdfs/u1/b.pdf").await.unwrap());
        assert_eq!(
            storage.public_url("qr_assets", "qr_pdfs/u1/a.pdf").as_deref(),
            Some("https://cdn.test/qr_assets/qr_pdfs/u1/a.pdf")
        );
        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[actix_web::test]
    async fn rejects_path_traversal() {
        let storage = LocalDiskStorage::new(std::env::temp_dir(), "https://cdn.test");
        assert!(
            storage
                .put("qr_assets", "../escape.pdf", vec![], "application/pdf")
                .await
                .is_err()
        );
        assert!(storage.exists("qr_assets", "qr_pdfs/u1/../u2/x.pdf").await.is_err());
    }
}
