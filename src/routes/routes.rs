use actix_web::web;

use crate::handlers::catalogue_handlers::{list_events, list_projects};
use crate::handlers::health_handlers::health_check;
use crate::handlers::qr_handlers::{
    copy_adhoc, copy_qr, create_qr, deactivate_qr, export_adhoc, export_qr, list_qr, preview_qr,
    raster_qr, resolve_qr,
};
use crate::handlers::upload_handlers::{MAX_DOCUMENT_BYTES, upload_document};
use crate::middlewares::authmw::JwtAuth;

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig, jwt_secret: &str) {
    // API routes - require authentication (health check is let through)
    cfg.service(
        web::scope("/api")
            .wrap(JwtAuth::new(jwt_secret))
            .route("/health/check", web::get().to(health_check))
            .route("/qr/resolve", web::post().to(resolve_qr))
            .route("/qr/preview", web::get().to(preview_qr))
            .route("/qr/copy", web::post().to(copy_adhoc))
            .route("/qr/export/{format}", web::post().to(export_adhoc))
            .service(
                web::resource("/qr/documents")
                    .app_data(web::PayloadConfig::new(MAX_DOCUMENT_BYTES))
                    .route(web::post().to(upload_document)),
            )
            .route("/qr", web::post().to(create_qr))
            .route("/qr", web::get().to(list_qr))
            .route("/qr/{id}", web::delete().to(deactivate_qr))
            .route("/qr/{id}/copy", web::post().to(copy_qr))
            .route("/qr/{id}/raster", web::get().to(raster_qr))
            .route("/qr/{id}/export/{format}", web::get().to(export_qr))
            // Read-only catalogue used to fill internal link selectors
            .service(
                web::scope("/catalogue")
                    .route("/projects", web::get().to(list_projects))
                    .route("/events", web::get().to(list_events)),
            ),
    );
}
