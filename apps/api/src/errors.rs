use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by the layout engine and its PDF adapters.
///
/// Layout itself is total over well-formed input: these cover configuration
/// mistakes (unknown fonts, profiles, page sizes) and unreadable PDF bytes.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Unknown font: {0}")]
    UnknownFont(String),

    #[error("Unknown page size: {0}")]
    UnknownPageSize(String),

    #[error("Unknown size profile: {0}")]
    UnknownProfile(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Glyph extraction failed: {0}")]
    Extraction(String),

    #[error("Page index {index} out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("Encrypted PDFs are not supported")]
    EncryptedDocument,
}

impl From<lopdf::Error> for LayoutError {
    fn from(e: lopdf::Error) -> Self {
        LayoutError::Pdf(e.to_string())
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Layout(e) => match e {
                LayoutError::UnknownFont(_)
                | LayoutError::UnknownPageSize(_)
                | LayoutError::UnknownProfile(_)
                | LayoutError::PageOutOfRange { .. } => {
                    (StatusCode::BAD_REQUEST, "LAYOUT_CONFIG_ERROR", e.to_string())
                }
                LayoutError::Pdf(_)
                | LayoutError::Extraction(_)
                | LayoutError::EncryptedDocument => {
                    tracing::warn!("Unreadable PDF: {e}");
                    (StatusCode::UNPROCESSABLE_ENTITY, "PDF_ERROR", e.to_string())
                }
            },
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_font_maps_to_bad_request() {
        let response = AppError::from(LayoutError::UnknownFont("Comic Sans".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_pdf_error_maps_to_unprocessable() {
        let response = AppError::from(LayoutError::Pdf("bad xref".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_internal_error_hides_details() {
        let response = AppError::Internal(anyhow::anyhow!("secret")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
