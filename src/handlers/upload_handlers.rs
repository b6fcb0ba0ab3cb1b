use actix_web::{HttpRequest, HttpResponse, Result, http::header, web};

use crate::errors::QrError;
use crate::state::app_state::AppState;
use crate::structs::qr_request::UploadResponse;
use crate::utils::jwt::AuthUser;

/// Largest document accepted for a `pdf` QR code.
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Store a PDF sent as the raw request body and return its public address
pub async fn upload_document(
    app_state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, QrError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let document_url = app_state
        .uploader
        .upload(&user.id, content_type, body.to_vec())
        .await?;

    Ok(HttpResponse::Created().json(UploadResponse { document_url }))
}
