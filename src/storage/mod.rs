pub mod local;
#[cfg(test)]
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

/// Bucket holding every uploaded QR asset.
pub const QR_ASSETS_BUCKET: &str = "qr_assets";

/// Object storage as seen from the QR subsystem: writes plus presence checks,
/// never reads.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(&self, bucket: &str, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    async fn exists(&self, bucket: &str, path: &str) -> Result<bool>;

    /// Public address of an object, if the backend exposes one.
    fn public_url(&self, bucket: &str, path: &str) -> Option<String>;
}
