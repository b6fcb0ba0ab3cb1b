use nanoid::nanoid;
use std::sync::Arc;

use crate::errors::QrError;
use crate::storage::{ObjectStorage, QR_ASSETS_BUCKET};

pub const DOCUMENT_MIME: &str = "application/pdf";
const DOCUMENT_PREFIX: &str = "qr_pdfs";
const DOCUMENT_EXTENSION: &str = "pdf";

/// Uploads documents for the `pdf` QR kind and hands back their public address.
/// No retries: a failed upload leaves the form without a target.
#[derive(Clone)]
pub struct DocumentUploader {
    storage: Arc<dyn ObjectStorage>,
}

impl DocumentUploader {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    pub async fn upload(&self, owner_id: &str, content_type: &str, bytes: Vec<u8>) -> Result<String, QrError> {
        if content_type != DOCUMENT_MIME {
            return Err(QrError::validation("Only PDF files can be attached to a QR code"));
        }
        if bytes.is_empty() {
            return Err(QrError::validation("The uploaded file is empty"));
        }

        let path = format!(
            "{}/{}/{}.{}",
            DOCUMENT_PREFIX,
            owner_id,
            nanoid!(),
            DOCUMENT_EXTENSION
        );
        let size = bytes.len();
        self.storage
            .put(QR_ASSETS_BUCKET, &path, bytes, content_type)
            .await
            .map_err(|e| QrError::transport("Upload failed", format!("{:#}", e)))?;

        let url = self
            .storage
            .public_url(QR_ASSETS_BUCKET, &path)
            .ok_or_else(|| QrError::transport("Upload failed", "could not obtain public address"))?;

        log::info!("Uploaded QR document {} ({} bytes) for {}", path, size, owner_id);
        Ok(url)
    }

    /// Accepts `url` only if it names a document this owner uploaded: a single
    /// `{id}.pdf` object directly under their namespace that is present in
    /// storage.
    pub async fn verify_document(&self, owner_id: &str, url: &str) -> Result<(), QrError> {
        let not_uploaded = || QrError::validation("Upload the PDF before creating this QR code");
        let namespace = format!("{}/{}/", DOCUMENT_PREFIX, owner_id);
        let prefix = self
            .storage
            .public_url(QR_ASSETS_BUCKET, &namespace)
            .ok_or_else(not_uploaded)?;
        let file_name = url.strip_prefix(prefix.as_str()).ok_or_else(not_uploaded)?;
        if !is_document_name(file_name) {
            return Err(not_uploaded());
        }

        let path = format!("{}{}", namespace, file_name);
        match self.storage.exists(QR_ASSETS_BUCKET, &path).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(not_uploaded()),
            Err(e) => Err(QrError::transport("Document lookup failed", format!("{:#}", e))),
        }
    }
}

/// `{nanoid}.pdf`, as produced by `upload`.
fn is_document_name(name: &str) -> bool {
    name.strip_suffix(DOCUMENT_EXTENSION)
        .and_then(|stem| stem.strip_suffix('.'))
        .is_some_and(|id| {
            !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;
    use async_trait::async_trait;

    struct BrokenStorage;

    #[async_trait]
    impl ObjectStorage for BrokenStorage {
        async fn put(&self, _: &str, _: &str, _: Vec<u8>, _: &str) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }

        async fn exists(&self, _: &str, _: &str) -> anyhow::Result<bool> {
            anyhow::bail!("connection refused")
        }

        fn public_url(&self, _: &str, _: &str) -> Option<String> {
            None
        }
    }

    fn uploader(storage: Arc<dyn ObjectStorage>) -> DocumentUploader {
        DocumentUploader::new(storage)
    }

    #[actix_web::test]
    async fn uploads_pdf_under_owner_namespace() {
        let storage = Arc::new(MemoryStorage::new(Some("https://cdn.test".into())));
        let up = uploader(storage.clone());

        let url = up.upload("u1", DOCUMENT_MIME, b"%PDF-1.4".to_vec()).await.unwrap();
        assert!(url.starts_with("https://cdn.test/qr_assets/qr_pdfs/u1/"));
        assert!(url.ends_with(".pdf"));

        let path = url.trim_start_matches("https://cdn.test/qr_assets/");
        assert!(storage.contains("qr_assets", path));
        up.verify_document("u1", &url).await.unwrap();
        assert!(matches!(
            up.verify_document("u2", &url).await,
            Err(QrError::Validation(_))
        ));
    }

    #[actix_web::test]
    async fn only_stored_documents_in_the_owners_namespace_verify() {
        let storage = Arc::new(MemoryStorage::new(Some("https://cdn.test".into())));
        let up = uploader(storage);
        let theirs = up.upload("u2", DOCUMENT_MIME, b"%PDF".to_vec()).await.unwrap();
        let their_file = theirs.rsplit('/').next().unwrap();

        let prefix = "https://cdn.test/qr_assets/qr_pdfs/u1/";
        for url in [
            format!("{}never-uploaded.pdf", prefix),
            format!("{}../u2/{}", prefix, their_file),
            format!("{}nested/{}", prefix, their_file),
            format!("{}.pdf", prefix),
            prefix.to_string(),
        ] {
            assert!(
                matches!(up.verify_document("u1", &url).await, Err(QrError::Validation(_))),
                "{url}"
            );
        }
    }

    #[test]
    fn document_names_match_the_upload_shape() {
        assert!(is_document_name("V1StGXR8_Z5jdHi6B-myT.pdf"));
        assert!(!is_document_name("a/b.pdf"));
        assert!(!is_document_name("..pdf"));
        assert!(!is_document_name("x.png"));
    }

    #[actix_web::test]
    async fn rejects_other_mime_types_before_uploading() {
        let storage = Arc::new(MemoryStorage::new(Some("https://cdn.test".into())));
        let up = uploader(storage);
        for mime in ["image/png", "application/pdf; charset=binary", ""] {
            let err = up.upload("u1", mime, b"data".to_vec()).await.unwrap_err();
            assert!(matches!(err, QrError::Validation(_)), "{mime}");
        }
    }

    #[actix_web::test]
    async fn transport_failure_surfaces_as_upload_failed() {
        let err = uploader(Arc::new(BrokenStorage))
            .upload("u1", DOCUMENT_MIME, b"%PDF".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, QrError::Transport(_)));
    }

    #[actix_web::test]
    async fn missing_public_address_is_treated_as_failure() {
        let err = uploader(Arc::new(MemoryStorage::new(None)))
            .upload("u1", DOCUMENT_MIME, b"%PDF".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, QrError::Transport(_)));
    }
}
