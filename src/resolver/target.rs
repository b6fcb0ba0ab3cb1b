use crate::errors::QrError;
use crate::models::catalogue::{Event, Project};
use crate::models::form_state::QrFormState;
use crate::models::qr_code::{InternalKind, ResolvedTarget};
use crate::resolver::internal::internal_link;
use crate::resolver::url::normalize_url;

/// Inputs the resolver needs besides the form itself. The project/event are
/// the catalogue entries matching the form's selection, when found.
pub struct ResolveContext<'a> {
    pub base_url: &'a str,
    pub username: &'a str,
    pub project: Option<&'a Project>,
    pub event: Option<&'a Event>,
}

/// The canonical target for the form, or `""` when it cannot be built yet.
/// Never performs I/O: documents only read the cached upload result.
pub fn resolve_target(form: &QrFormState, ctx: &ResolveContext<'_>) -> String {
    match form {
        QrFormState::ExternalLink { url } => normalize_url(url),
        QrFormState::InternalLink { category, .. } => {
            internal_link(ctx.base_url, ctx.username, *category, ctx.project, ctx.event)
        }
        QrFormState::Document { upload } => upload.document_url.clone().unwrap_or_default(),
    }
}

/// Resolve and attach the per-kind reference fields. An empty target is a
/// validation error so the caller blocks submission.
pub fn resolve(form: &QrFormState, ctx: &ResolveContext<'_>) -> Result<ResolvedTarget, QrError> {
    let target_url = resolve_target(form, ctx);
    if target_url.is_empty() {
        return Err(QrError::validation(missing_target_message(form)));
    }

    let (internal_kind, internal_ref, document_ref) = match form {
        QrFormState::ExternalLink { .. } => (None, None, None),
        QrFormState::InternalLink { category, .. } => {
            let reference = match category {
                InternalKind::Profile | InternalKind::LinkInBio => Some(ctx.username.to_string()),
                InternalKind::Project => ctx.project.and_then(|p| p.id).map(|id| id.to_hex()),
                InternalKind::Event => ctx.event.and_then(|e| e.id).map(|id| id.to_hex()),
            };
            (Some(*category), reference, None)
        }
        QrFormState::Document { .. } => (None, None, Some(target_url.clone())),
    };

    Ok(ResolvedTarget {
        kind: form.kind(),
        target_url,
        internal_kind,
        internal_ref,
        document_ref,
    })
}

fn missing_target_message(form: &QrFormState) -> &'static str {
    match form {
        QrFormState::ExternalLink { .. } => "A destination URL is required",
        QrFormState::InternalLink { category: InternalKind::Project, .. } => {
            "Select a project for this QR code"
        }
        QrFormState::InternalLink { category: InternalKind::Event, .. } => {
            "Select an event with a public link for this QR code"
        }
        QrFormState::InternalLink { .. } => "Your profile has no public username yet",
        QrFormState::Document { .. } => "Upload a PDF before creating this QR code",
    }
}
