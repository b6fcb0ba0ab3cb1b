use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

use crate::errors::QrError;
use crate::models::catalogue::{Event, Project};
use crate::models::qr_code::QrCodeRecord;
use crate::store::{CatalogueSource, QrStore};

pub struct MongoQrStore {
    db: Database,
    qr_codes: Collection<QrCodeRecord>,
}

impl MongoQrStore {
    pub fn new(db: Database) -> Self {
        let qr_codes = db.collection::<QrCodeRecord>("qr_codes");
        Self { db, qr_codes }
    }
}

#[async_trait]
impl QrStore for MongoQrStore {
    async fn insert(&self, mut record: QrCodeRecord) -> Result<QrCodeRecord, QrError> {
        let result = self
            .qr_codes
            .insert_one(&record)
            .await
            .map_err(|e| QrError::transport("Failed to insert QR code", e))?;
        record.id = result.inserted_id.as_object_id();
        Ok(record)
    }

    async fn list_active(&self, owner_id: &str) -> Result<Vec<QrCodeRecord>, QrError> {
        self.qr_codes
            .find(doc! { "user_id": owner_id, "is_active": true })
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| QrError::transport("Failed to list QR codes", e))?
            .try_collect::<Vec<QrCodeRecord>>()
            .await
            .map_err(|e| QrError::transport("Failed to read QR codes", e))
    }

    async fn deactivate(&self, owner_id: &str, id: ObjectId) -> Result<bool, QrError> {
        let result = self
            .qr_codes
            .update_one(
                doc! { "_id": id, "user_id": owner_id },
                doc! {
                    "$set": {
                        "is_active": false,
                        "updated_at": chrono::Utc::now().timestamp_millis(),
                    }
                },
            )
            .await
            .map_err(|e| QrError::transport("Failed to deactivate QR code", e))?;
        Ok(result.matched_count > 0)
    }

    async fn ping(&self) -> Result<(), QrError> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| QrError::transport("Database ping failed", e))
    }
}

pub struct MongoCatalogue {
    projects: Collection<Project>,
    events: Collection<Event>,
}

impl MongoCatalogue {
    pub fn new(db: &Database) -> Self {
        Self {
            projects: db.collection::<Project>("projects"),
            events: db.collection::<Event>("events"),
        }
    }
}

#[async_trait]
impl CatalogueSource for MongoCatalogue {
    async fn published_projects(&self, owner_id: &str) -> Result<Vec<Project>, QrError> {
        self.projects
            .find(doc! { "owner_id": owner_id, "is_published": true })
            .sort(doc! { "name": 1 })
            .await
            .map_err(|e| QrError::transport("Failed to list projects", e))?
            .try_collect()
            .await
            .map_err(|e| QrError::transport("Failed to read projects", e))
    }

    async fn published_events(&self, owner_id: &str) -> Result<Vec<Event>, QrError> {
        self.events
            .find(doc! { "organizer_id": owner_id, "is_published": true })
            .sort(doc! { "title": 1 })
            .await
            .map_err(|e| QrError::transport("Failed to list events", e))?
            .try_collect()
            .await
            .map_err(|e| QrError::transport("Failed to read events", e))
    }

    async fn project(&self, owner_id: &str, id: &str) -> Result<Option<Project>, QrError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        self.projects
            .find_one(doc! { "_id": object_id, "owner_id": owner_id, "is_published": true })
            .await
            .map_err(|e| QrError::transport("Failed to load project", e))
    }

    async fn event(&self, owner_id: &str, id: &str) -> Result<Option<Event>, QrError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        self.events
            .find_one(doc! { "_id": object_id, "organizer_id": owner_id, "is_published": true })
            .await
            .map_err(|e| QrError::transport("Failed to load event", e))
    }
}
