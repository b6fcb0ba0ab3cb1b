use serde::{Deserialize, Serialize};

use crate::models::qr_code::{InternalKind, QrKind};

/// Progress of the document upload attached to a form session.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UploadState {
    #[serde(default)]
    pub progress: u8,
    /// Public address returned by the last successful upload.
    #[serde(default)]
    pub document_url: Option<String>,
}

/// Transient QR form, keyed by kind. Only the fields of the active kind exist.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum QrFormState {
    #[serde(rename = "external_link")]
    ExternalLink {
        #[serde(default)]
        url: String,
    },
    #[serde(rename = "internal_link")]
    InternalLink {
        #[serde(default)]
        category: InternalKind,
        #[serde(default)]
        project_id: Option<String>,
        #[serde(default)]
        event_id: Option<String>,
    },
    #[serde(rename = "pdf")]
    Document {
        #[serde(default)]
        upload: UploadState,
    },
}

impl QrFormState {
    pub fn empty(kind: QrKind) -> Self {
        match kind {
            QrKind::ExternalLink => QrFormState::ExternalLink { url: String::new() },
            QrKind::InternalLink => QrFormState::InternalLink {
                category: InternalKind::default(),
                project_id: None,
                event_id: None,
            },
            QrKind::Document => QrFormState::Document {
                upload: UploadState::default(),
            },
        }
    }

    pub fn kind(&self) -> QrKind {
        match self {
            QrFormState::ExternalLink { .. } => QrKind::ExternalLink,
            QrFormState::InternalLink { .. } => QrKind::InternalLink,
            QrFormState::Document { .. } => QrKind::Document,
        }
    }

    /// Cleared form for the next submission; the kind is kept.
    pub fn reset(&self) -> Self {
        Self::empty(self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_kind_and_clears_fields() {
        let form = QrFormState::InternalLink {
            category: InternalKind::Event,
            project_id: None,
            event_id: Some("65f0c0ffee".into()),
        };
        let reset = form.reset();
        assert_eq!(reset.kind(), QrKind::InternalLink);
        assert_eq!(reset, QrFormState::empty(QrKind::InternalLink));
    }

    #[test]
    fn deserializes_tagged_document_variant() {
        let form: QrFormState = serde_json::from_value(serde_json::json!({
            "type": "pdf",
            "upload": { "progress": 100, "document_url": "https://cdn/x.pdf" }
        }))
        .unwrap();
        match form {
            QrFormState::Document { upload } => {
                assert_eq!(upload.document_url.as_deref(), Some("https://cdn/x.pdf"));
            }
            other => panic!("unexpected variant {:?}", other),
        }
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let form: QrFormState =
            serde_json::from_value(serde_json::json!({ "type": "external_link" })).unwrap();
        assert_eq!(form, QrFormState::empty(QrKind::ExternalLink));
    }
}
