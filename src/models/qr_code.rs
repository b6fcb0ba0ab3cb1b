use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a QR code points at. Serialized names match the `type` column.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrKind {
    #[serde(rename = "external_link")]
    ExternalLink,
    #[serde(rename = "internal_link")]
    InternalLink,
    #[serde(rename = "pdf")]
    Document,
}

impl QrKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QrKind::ExternalLink => "external_link",
            QrKind::InternalLink => "internal_link",
            QrKind::Document => "pdf",
        }
    }
}

impl fmt::Display for QrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform-hosted destination categories.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InternalKind {
    #[default]
    #[serde(rename = "profile")]
    Profile,
    #[serde(rename = "link_bio")]
    LinkInBio,
    #[serde(rename = "project")]
    Project,
    #[serde(rename = "event")]
    Event,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QrCodeRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "user_id")]
    pub owner_id: String,
    #[serde(rename = "type")]
    pub kind: QrKind,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target_url: String,
    #[serde(rename = "internal_type", default)]
    pub internal_kind: Option<InternalKind>,
    #[serde(default)]
    pub internal_ref: Option<String>,
    #[serde(rename = "file_path", default)]
    pub document_ref: Option<String>,
    pub is_active: bool,
    pub created_at: i64, // milliseconds
    pub updated_at: i64,
}

/// A target that passed resolution, together with the fields backing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTarget {
    pub kind: QrKind,
    pub target_url: String,
    pub internal_kind: Option<InternalKind>,
    pub internal_ref: Option<String>,
    pub document_ref: Option<String>,
}

impl QrCodeRecord {
    pub fn new(
        owner_id: String,
        title: String,
        description: Option<String>,
        target: ResolvedTarget,
    ) -> Self {
        let now = chrono::Utc::now().timestamp_millis();

        Self {
            id: None,
            owner_id,
            kind: target.kind,
            title,
            description,
            target_url: target.target_url,
            internal_kind: target.internal_kind,
            internal_ref: target.internal_ref,
            document_ref: target.document_ref,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_hex(&self) -> Option<String> {
        self.id.map(|oid| oid.to_hex())
    }
}
