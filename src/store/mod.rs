pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::errors::QrError;
use crate::models::catalogue::{Event, Project};
use crate::models::qr_code::QrCodeRecord;

/// Persistence for QR records. Every call is scoped to one owner.
#[async_trait]
pub trait QrStore: Send + Sync {
    /// Insert a new record and return it with its store-assigned id.
    async fn insert(&self, record: QrCodeRecord) -> Result<QrCodeRecord, QrError>;

    /// Active records of `owner_id`, newest first.
    async fn list_active(&self, owner_id: &str) -> Result<Vec<QrCodeRecord>, QrError>;

    /// Flip `is_active` to false. Returns whether the owner has such a record
    /// at all; an already inactive record still counts.
    async fn deactivate(&self, owner_id: &str, id: ObjectId) -> Result<bool, QrError>;

    async fn ping(&self) -> Result<(), QrError>;
}

/// Read-only view of a member's published projects and events.
#[async_trait]
pub trait CatalogueSource: Send + Sync {
    async fn published_projects(&self, owner_id: &str) -> Result<Vec<Project>, QrError>;

    async fn published_events(&self, owner_id: &str) -> Result<Vec<Event>, QrError>;

    async fn project(&self, owner_id: &str, id: &str) -> Result<Option<Project>, QrError>;

    async fn event(&self, owner_id: &str, id: &str) -> Result<Option<Event>, QrError>;
}
