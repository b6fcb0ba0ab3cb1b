use std::sync::Arc;

use crate::render::RenderingPipeline;
use crate::services::registry::QrRegistry;
use crate::services::uploader::DocumentUploader;
use crate::store::CatalogueSource;

pub struct AppState {
    pub registry: QrRegistry,
    pub uploader: DocumentUploader,
    pub pipeline: RenderingPipeline,
    pub catalogue: Arc<dyn CatalogueSource>,
    /// Deployment origin used for internal links.
    pub base_url: String,
}
