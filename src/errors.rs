use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

/// Every failure surfaced by the QR subsystem.
///
/// None of these are fatal: a caller can always fix its input or re-submit.
#[derive(Debug, Error)]
pub enum QrError {
    #[error("{0}")]
    Validation(String),

    /// Store/upload failures. The detail is logged where the error is built
    /// and never sent back to the client.
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("no preview available: {0}")]
    Render(String),

    #[error("{0} not found")]
    NotFound(&'static str),
}

impl QrError {
    pub fn validation(message: impl Into<String>) -> Self {
        QrError::Validation(message.into())
    }

    /// Log the underlying failure and wrap it as a transport error.
    pub fn transport(context: &str, err: impl std::fmt::Display) -> Self {
        log::error!("{}: {}", context, err);
        QrError::Transport(format!("{}: {}", context, err))
    }

    pub fn render(err: impl std::fmt::Display) -> Self {
        log::warn!("QR render failed: {}", err);
        QrError::Render(err.to_string())
    }
}

impl ResponseError for QrError {
    fn status_code(&self) -> StatusCode {
        match self {
            QrError::Validation(_) => StatusCode::BAD_REQUEST,
            QrError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            QrError::Render(_) => StatusCode::UNPROCESSABLE_ENTITY,
            QrError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            QrError::Transport(_) => "Request failed, please try again".to_string(),
            QrError::Render(_) => "No preview available".to_string(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_hide_details_from_clients() {
        let err = QrError::transport("insert qr_codes", "connection reset");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let err = QrError::validation("Title is required");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Title is required");
    }
}
