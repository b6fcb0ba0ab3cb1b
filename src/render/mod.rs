pub mod document;
pub mod filename;
pub mod label;
pub mod raster;
pub mod vector;

use base64::{Engine as _, engine::general_purpose};
use serde::Deserialize;
use std::sync::Arc;

use crate::errors::QrError;
use crate::render::filename::export_filename;
use crate::render::raster::{CANVAS_WIDTH, Rasterizer};
use crate::render::vector::VectorCode;

/// On-screen preview size, no label band.
pub const PREVIEW_SIZE: u32 = 160;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Svg,
    Png,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Png => "image/png",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Stateless vector -> raster -> document pipeline. Nothing is cached; every
/// export re-renders from the target string.
#[derive(Clone)]
pub struct RenderingPipeline {
    rasterizer: Arc<dyn Rasterizer>,
}

impl RenderingPipeline {
    pub fn new(rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self { rasterizer }
    }

    pub fn preview(&self, target: &str) -> Result<String, QrError> {
        Ok(VectorCode::render(target)?.svg(PREVIEW_SIZE))
    }

    pub fn vector_export(&self, target: &str) -> Result<String, QrError> {
        Ok(VectorCode::render(target)?.svg(CANVAS_WIDTH))
    }

    /// PNG bytes, or `None` if rendering or encoding failed.
    pub async fn raster_export(&self, target: &str) -> Option<Vec<u8>> {
        let rasterizer = Arc::clone(&self.rasterizer);
        let target = target.to_string();
        match tokio::task::spawn_blocking(move || raster::render_png(rasterizer.as_ref(), &target)).await {
            Ok(Ok(png)) => Some(png),
            Ok(Err(_)) => None,
            Err(e) => {
                log::warn!("Raster task failed: {}", e);
                None
            }
        }
    }

    pub async fn raster_data_url(&self, target: &str) -> Option<String> {
        let png = self.raster_export(target).await?;
        Some(format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(&png)
        ))
    }

    pub async fn document_export(&self, target: &str) -> Option<Vec<u8>> {
        let png = self.raster_export(target).await?;
        match tokio::task::spawn_blocking(move || document::build_pdf(&png)).await {
            Ok(Ok(pdf)) => Some(pdf),
            Ok(Err(_)) => None,
            Err(e) => {
                log::warn!("Document task failed: {}", e);
                None
            }
        }
    }

    /// One downloadable artifact, named after `title`. `None` means the
    /// export is a no-op for this target.
    pub async fn export(&self, format: ExportFormat, target: &str, title: &str) -> Option<ExportArtifact> {
        let bytes = match format {
            ExportFormat::Svg => self.vector_export(target).ok()?.into_bytes(),
            ExportFormat::Png => self.raster_export(target).await?,
            ExportFormat::Pdf => self.document_export(target).await?,
        };
        Some(ExportArtifact {
            filename: export_filename(title, format.extension()),
            content_type: format.content_type(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::raster::{LABEL_BAND_HEIGHT, ModuleRasterizer};

    fn pipeline() -> RenderingPipeline {
        RenderingPipeline::new(Arc::new(ModuleRasterizer))
    }

    #[actix_web::test]
    async fn raster_size_is_fixed_regardless_of_target_length() {
        let long_target = format!("https://example.com/{}", "a".repeat(600));
        for target in ["https://x.io", long_target.as_str()] {
            let png = pipeline().raster_export(target).await.unwrap();
            let img = image::load_from_memory(&png).unwrap();
            assert_eq!(img.width(), CANVAS_WIDTH);
            assert_eq!(img.height(), CANVAS_WIDTH + LABEL_BAND_HEIGHT);
        }
    }

    #[actix_web::test]
    async fn document_export_has_one_page() {
        let pdf = pipeline().document_export("https://mysite.io").await.unwrap();
        let doc = lopdf::Document::load_mem(&pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[actix_web::test]
    async fn failures_resolve_to_none() {
        let p = pipeline();
        assert!(p.raster_export("").await.is_none());
        assert!(p.document_export("  ").await.is_none());
        assert!(p.export(ExportFormat::Svg, "", "Landing").await.is_none());
        assert!(p.preview("").is_err());
    }

    #[actix_web::test]
    async fn data_url_is_base64_png() {
        let url = pipeline().raster_data_url("https://mysite.io").await.unwrap();
        assert!(url.starts_with("data:image/png;base64,iVBOR"));
    }

    #[actix_web::test]
    async fn export_names_follow_title() {
        let artifact = pipeline()
            .export(ExportFormat::Pdf, "https://mysite.io", "Spring Poster")
            .await
            .unwrap();
        assert_eq!(artifact.filename, "spring-poster.pdf");
        assert_eq!(artifact.content_type, "application/pdf");

        let svg = pipeline()
            .export(ExportFormat::Svg, "https://mysite.io", "Card")
            .await
            .unwrap();
        assert!(String::from_utf8(svg.bytes).unwrap().contains("<svg"));
    }

    #[test]
    fn preview_is_smaller_than_export() {
        let p = pipeline();
        let preview = p.preview("https://mysite.io").unwrap();
        let full = p.vector_export("https://mysite.io").unwrap();
        assert!(preview.contains("<svg"));
        assert_ne!(preview, full);
    }
}
