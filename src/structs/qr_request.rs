use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::catalogue::{Event, Project};
use crate::models::form_state::QrFormState;
use crate::models::qr_code::{InternalKind, QrCodeRecord, QrKind};
use crate::services::registry::QrFilter;

#[derive(Deserialize, Validate)]
pub struct CreateQrRequest {
    #[validate(length(min = 1, max = 120, message = "Title must be 1-120 characters"))]
    pub title: String,
    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,
    #[serde(flatten)]
    pub form: QrFormState,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub target: String,
    pub resolvable: bool,
}

#[derive(Deserialize)]
pub struct ListQrParams {
    #[serde(rename = "type", default)]
    pub filter: QrFilter,
}

#[derive(Deserialize)]
pub struct DeactivateParams {
    #[serde(default)]
    pub confirm: bool,
    #[serde(rename = "type", default)]
    pub filter: QrFilter,
}

#[derive(Deserialize)]
pub struct PreviewParams {
    pub target: String,
}

#[derive(Deserialize)]
pub struct AdhocExportRequest {
    pub target: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Deserialize)]
pub struct CopyRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct RasterResponse {
    /// `None` when the raster could not be produced.
    pub data_url: Option<String>,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub document_url: String,
}

#[derive(Serialize)]
pub struct QrCodeResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QrKind,
    pub title: String,
    pub description: Option<String>,
    pub target_url: String,
    pub internal_type: Option<InternalKind>,
    pub internal_ref: Option<String>,
    pub file_path: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<QrCodeRecord> for QrCodeResponse {
    fn from(record: QrCodeRecord) -> Self {
        Self {
            id: record.id_hex().unwrap_or_default(),
            kind: record.kind,
            title: record.title,
            description: record.description,
            target_url: record.target_url,
            internal_type: record.internal_kind,
            internal_ref: record.internal_ref,
            file_path: record.document_ref,
            is_active: record.is_active,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct CreateQrResponse {
    pub qr_code: QrCodeResponse,
    /// Empty form of the same kind, ready for the next submission.
    pub form: QrFormState,
}

#[derive(Serialize)]
pub struct ProjectOption {
    pub id: String,
    pub name: String,
}

impl From<Project> for ProjectOption {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: project.name,
        }
    }
}

#[derive(Serialize)]
pub struct EventOption {
    pub id: String,
    pub title: String,
    pub slug: Option<String>,
    pub organizer_username: Option<String>,
}

impl From<Event> for EventOption {
    fn from(event: Event) -> Self {
        let organizer_username = event.organizer_username().map(String::from);
        Self {
            id: event.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: event.title,
            slug: event.slug,
            organizer_username,
        }
    }
}
