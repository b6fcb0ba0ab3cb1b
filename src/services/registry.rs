use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

use crate::errors::QrError;
use crate::models::qr_code::{QrCodeRecord, QrKind, ResolvedTarget};
use crate::services::clipboard::ClipboardPort;
use crate::store::QrStore;

/// Listing filter: `all` or one kind (`external_link`, `internal_link`, `pdf`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrFilter {
    #[default]
    All,
    Kind(QrKind),
}

impl QrFilter {
    pub fn matches(&self, record: &QrCodeRecord) -> bool {
        match self {
            QrFilter::All => true,
            QrFilter::Kind(kind) => record.kind == *kind,
        }
    }
}

impl<'de> Deserialize<'de> for QrFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "all" {
            return Ok(QrFilter::All);
        }
        QrKind::deserialize(serde::de::value::StrDeserializer::<D::Error>::new(&raw)).map(QrFilter::Kind)
    }
}

/// Active records fetched for one owner. Owned by whoever listed them and
/// never synchronised with other sessions.
#[derive(Debug, Clone, Default)]
pub struct QrListing {
    records: Vec<QrCodeRecord>,
}

impl QrListing {
    pub fn into_filtered(self, filter: QrFilter) -> Vec<QrCodeRecord> {
        self.records.into_iter().filter(|r| filter.matches(r)).collect()
    }

    pub fn find(&self, id: &str) -> Option<&QrCodeRecord> {
        self.records.iter().find(|r| r.id_hex().as_deref() == Some(id))
    }

    /// Drop a record locally; returns whether it was present.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != Some(id));
        before != self.records.len()
    }
}

pub enum CopySource {
    Record(String),
    Adhoc(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CopyOutcome {
    pub target: String,
    pub copied: bool,
}

/// Owner-scoped façade over the QR store.
#[derive(Clone)]
pub struct QrRegistry {
    store: Arc<dyn QrStore>,
    clipboard: Arc<dyn ClipboardPort>,
}

impl QrRegistry {
    pub fn new(store: Arc<dyn QrStore>, clipboard: Arc<dyn ClipboardPort>) -> Self {
        Self { store, clipboard }
    }

    pub async fn ping(&self) -> Result<(), QrError> {
        self.store.ping().await
    }

    /// Validates before touching the store. Duplicate submissions are not
    /// detected here.
    pub async fn create(
        &self,
        owner_id: &str,
        title: &str,
        description: Option<&str>,
        target: ResolvedTarget,
    ) -> Result<QrCodeRecord, QrError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(QrError::validation("Title is required"));
        }
        if target.target_url.trim().is_empty() {
            return Err(QrError::validation("The QR code has no destination yet"));
        }
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);

        let record = QrCodeRecord::new(owner_id.to_string(), title.to_string(), description, target);
        let record = self.store.insert(record).await?;
        log::info!(
            "Created {} QR code {:?} for {}",
            record.kind,
            record.id_hex(),
            owner_id
        );
        Ok(record)
    }

    pub async fn listing(&self, owner_id: &str) -> Result<QrListing, QrError> {
        Ok(QrListing {
            records: self.store.list_active(owner_id).await?,
        })
    }

    /// Active records, newest first, narrowed to `filter`.
    pub async fn list(&self, owner_id: &str, filter: QrFilter) -> Result<Vec<QrCodeRecord>, QrError> {
        Ok(self.listing(owner_id).await?.into_filtered(filter))
    }

    pub async fn find(&self, owner_id: &str, id: &str) -> Result<QrCodeRecord, QrError> {
        self.listing(owner_id)
            .await?
            .find(id)
            .cloned()
            .ok_or(QrError::NotFound("QR code"))
    }

    /// One-way soft delete. Requires explicit confirmation; repeating it on an
    /// inactive record succeeds.
    pub async fn deactivate(&self, owner_id: &str, id: &str, confirmed: bool) -> Result<ObjectId, QrError> {
        if !confirmed {
            return Err(QrError::validation("Deactivation must be confirmed"));
        }
        let object_id = ObjectId::parse_str(id).map_err(|_| QrError::NotFound("QR code"))?;
        if !self.store.deactivate(owner_id, object_id).await? {
            return Err(QrError::NotFound("QR code"));
        }
        log::info!("Deactivated QR code {} for {}", id, owner_id);
        Ok(object_id)
    }

    /// Deactivate and drop the record from an already fetched listing.
    pub async fn deactivate_in(
        &self,
        listing: &mut QrListing,
        owner_id: &str,
        id: &str,
        confirmed: bool,
    ) -> Result<(), QrError> {
        let object_id = self.deactivate(owner_id, id, confirmed).await?;
        listing.remove(object_id);
        Ok(())
    }

    /// Best effort: a clipboard failure only clears `copied`.
    pub async fn copy_target(&self, owner_id: &str, source: CopySource) -> Result<CopyOutcome, QrError> {
        let target = match source {
            CopySource::Record(id) => self.find(owner_id, &id).await?.target_url,
            CopySource::Adhoc(text) => text.trim().to_string(),
        };
        if target.is_empty() {
            return Err(QrError::validation("Nothing to copy"));
        }

        let clipboard = Arc::clone(&self.clipboard);
        let text = target.clone();
        let copied = match tokio::task::spawn_blocking(move || clipboard.write_text(&text)).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                log::warn!("Clipboard copy failed: {:#}", e);
                false
            }
            Err(e) => {
                log::warn!("Clipboard task failed: {}", e);
                false
            }
        };
        Ok(CopyOutcome { target, copied })
    }
}
