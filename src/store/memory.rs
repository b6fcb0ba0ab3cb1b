use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

use crate::errors::QrError;
use crate::models::catalogue::{Event, Project};
use crate::models::qr_code::QrCodeRecord;
use crate::store::{CatalogueSource, QrStore};

/// In-process store for local runs without MongoDB.
#[derive(Default)]
pub struct MemoryQrStore {
    records: Mutex<Vec<QrCodeRecord>>,
}

impl MemoryQrStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<QrCodeRecord>>, QrError> {
        self.records
            .lock()
            .map_err(|e| QrError::transport("Memory store poisoned", e))
    }
}

#[async_trait]
impl QrStore for MemoryQrStore {
    async fn insert(&self, mut record: QrCodeRecord) -> Result<QrCodeRecord, QrError> {
        record.id = Some(ObjectId::new());
        self.lock()?.push(record.clone());
        Ok(record)
    }

    async fn list_active(&self, owner_id: &str) -> Result<Vec<QrCodeRecord>, QrError> {
        // Reverse insertion order first so equal timestamps still come out newest first.
        let mut active: Vec<QrCodeRecord> = self
            .lock()?
            .iter()
            .rev()
            .filter(|r| r.owner_id == owner_id && r.is_active)
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }

    async fn deactivate(&self, owner_id: &str, id: ObjectId) -> Result<bool, QrError> {
        let mut records = self.lock()?;
        match records
            .iter_mut()
            .find(|r| r.id == Some(id) && r.owner_id == owner_id)
        {
            Some(record) => {
                if record.is_active {
                    record.is_active = false;
                    record.updated_at = chrono::Utc::now().timestamp_millis();
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), QrError> {
        Ok(())
    }
}

/// Fixed catalogue, seeded at construction.
#[derive(Default)]
pub struct MemoryCatalogue {
    projects: Vec<Project>,
    events: Vec<Event>,
}

impl MemoryCatalogue {
    pub fn new(projects: Vec<Project>, events: Vec<Event>) -> Self {
        Self { projects, events }
    }
}

fn matches_id(id: Option<ObjectId>, wanted: &str) -> bool {
    id.map(|oid| oid.to_hex() == wanted).unwrap_or(false)
}

#[async_trait]
impl CatalogueSource for MemoryCatalogue {
    async fn published_projects(&self, owner_id: &str) -> Result<Vec<Project>, QrError> {
        Ok(self
            .projects
            .iter()
            .filter(|p| p.owner_id == owner_id && p.is_published)
            .cloned()
            .collect())
    }

    async fn published_events(&self, owner_id: &str) -> Result<Vec<Event>, QrError> {
        Ok(self
            .events
            .iter()
            .filter(|e| e.organizer_id == owner_id && e.is_published)
            .cloned()
            .collect())
    }

    async fn project(&self, owner_id: &str, id: &str) -> Result<Option<Project>, QrError> {
        Ok(self
            .published_projects(owner_id)
            .await?
            .into_iter()
            .find(|p| matches_id(p.id, id)))
    }

    async fn event(&self, owner_id: &str, id: &str) -> Result<Option<Event>, QrError> {
        Ok(self
            .published_events(owner_id)
            .await?
            .into_iter()
            .find(|e| matches_id(e.id, id)))
    }
}
