mod config;
mod db;
mod errors;
mod handlers;
mod middlewares;
mod models;
mod render;
mod resolver;
mod routes;
mod services;
mod state;
mod storage;
mod store;
mod structs;
mod utils;

use crate::config::settings::{Settings, StoreBackend};
use crate::render::RenderingPipeline;
use crate::render::raster::ModuleRasterizer;
use crate::services::clipboard::{ClipboardPort, DisabledClipboard, SystemClipboard};
use crate::services::registry::QrRegistry;
use crate::services::uploader::DocumentUploader;
use crate::state::app_state::AppState;
use crate::storage::local::LocalDiskStorage;
use crate::store::memory::{MemoryCatalogue, MemoryQrStore};
use crate::store::mongo::{MongoCatalogue, MongoQrStore};
use crate::store::{CatalogueSource, QrStore};
use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware::Logger, web};
use db::mongodb::get_database;
use dotenv::dotenv;
use env_logger::Env;
use routes::init_routes;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize the stores
    let (store, catalogue): (Arc<dyn QrStore>, Arc<dyn CatalogueSource>) =
        match settings.store_backend {
            StoreBackend::Mongo => {
                let uri = settings.mongodb_uri.as_deref().unwrap_or_default();
                let db = match get_database(uri, &settings.database_name).await {
                    Ok(db) => db,
                    Err(e) => {
                        eprintln!("Error connecting to the database: {:#}", e);
                        std::process::exit(1);
                    }
                };
                let store: Arc<dyn QrStore> = Arc::new(MongoQrStore::new(db.clone()));
                let catalogue: Arc<dyn CatalogueSource> = Arc::new(MongoCatalogue::new(&db));
                (store, catalogue)
            }
            StoreBackend::Memory => {
                log::warn!("Using the in-memory store; QR codes are lost on restart");
                let store: Arc<dyn QrStore> = Arc::new(MemoryQrStore::new());
                let catalogue: Arc<dyn CatalogueSource> = Arc::new(MemoryCatalogue::new(Vec::new(), Vec::new()));
                (store, catalogue)
            }
        };

    let clipboard: Arc<dyn ClipboardPort> = if settings.clipboard_enabled {
        Arc::new(SystemClipboard)
    } else {
        Arc::new(DisabledClipboard)
    };
    let storage = Arc::new(LocalDiskStorage::new(
        &settings.storage_root,
        &settings.storage_public_url,
    ));

    // Create shared state
    let app_state = web::Data::new(AppState {
        registry: QrRegistry::new(store, clipboard),
        uploader: DocumentUploader::new(storage),
        pipeline: RenderingPipeline::new(Arc::new(ModuleRasterizer)),
        catalogue,
        base_url: settings.base_url.clone(),
    });

    log::info!(
        "Starting smartqr on {}:{} (links under {})",
        settings.bind_addr,
        settings.port,
        settings.base_url
    );

    let jwt_secret = settings.jwt_secret.clone();
    let cors_origins = settings.cors_origins.clone();

    // Start the Actix Web server
    HttpServer::new(move || {
        // Create a logger with a custom format instead
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allowed_headers(vec![http::header::AUTHORIZATION, http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .expose_headers(vec![http::header::CONTENT_DISPOSITION])
            .max_age(3600);
        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(|cfg| init_routes(cfg, &jwt_secret))
    })
    .bind((settings.bind_addr.as_str(), settings.port))?
    .run()
    .await
}
