use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::storage::ObjectStorage;

/// Keeps uploaded objects in memory, keyed by `{bucket}/{path}`.
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    public_base: Option<String>,
}

impl MemoryStorage {
    pub fn new(public_base: Option<String>) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            public_base,
        }
    }

    pub fn contains(&self, bucket: &str, path: &str) -> bool {
        self.objects
            .lock()
            .map(|objects| objects.contains_key(&format!("{}/{}", bucket, path)))
            .unwrap_or(false)
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn put(&self, bucket: &str, path: &str, bytes: Vec<u8>, _content_type: &str) -> Result<()> {
        self.objects
            .lock()
            .map_err(|e| anyhow!("memory storage poisoned: {}", e))?
            .insert(format!("{}/{}", bucket, path), bytes);
        Ok(())
    }

    async fn exists(&self, bucket: &str, path: &str) -> Result<bool> {
        Ok(self.contains(bucket, path))
    }

    fn public_url(&self, bucket: &str, path: &str) -> Option<String> {
        self.public_base
            .as_ref()
            .map(|base| format!("{}/{}/{}", base, bucket, path))
    }
}
