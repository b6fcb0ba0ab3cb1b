pub mod catalogue_handlers;
pub mod health_handlers;
pub mod qr_handlers;
pub mod upload_handlers;
