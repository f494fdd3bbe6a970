//! Axum route handlers for the Documents API: bullet-block detection and overlay
//! editing of uploaded PDFs.

use std::collections::HashMap;

use axum::{
    extract::{Multipart, State},
    http::{HeaderName, HeaderValue},
    response::Response,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extract::{detect_document_blocks, page_lines};
use crate::extract::glyphs::PdfGlyphSource;
use crate::extract::tokens::{BulletBlock, TextLine};
use crate::layout::{apply_overlay_edits, OverlayStyle};
use crate::render::pdf_response;
use crate::state::AppState;

pub const EDITED_BLOCKS_HEADER: &str = "x-edited-blocks";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BlocksResponse {
    pub page_count: usize,
    pub blocks: Vec<BulletBlock>,
}

#[derive(Debug, Serialize)]
pub struct PageLinesResponse {
    pub page_index: usize,
    pub lines: Vec<TextLine>,
}

/// Fields collected from a multipart upload.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<Bytes>,
    edits: Option<String>,
    font_size: Option<String>,
    page: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();
        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => form.file = Some(field.bytes().await.map_err(malformed)?),
                "edits" => form.edits = Some(field.text().await.map_err(malformed)?),
                "font_size" => form.font_size = Some(field.text().await.map_err(malformed)?),
                "page" => form.page = Some(field.text().await.map_err(malformed)?),
                other => debug!(field = other, "Ignoring unknown multipart field"),
            }
        }
        Ok(form)
    }

    fn require_file(&mut self) -> Result<Bytes, AppError> {
        match self.file.take() {
            Some(bytes) if !bytes.is_empty() => Ok(bytes),
            _ => Err(AppError::Validation("multipart field 'file' is required".into())),
        }
    }
}

fn malformed(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Malformed multipart body: {e}"))
}

fn parse_edits(raw: Option<&str>) -> Result<HashMap<String, String>, AppError> {
    let raw = raw.ok_or_else(|| AppError::Validation("multipart field 'edits' is required".into()))?;
    serde_json::from_str(raw).map_err(|e| {
        AppError::UnprocessableEntity(format!("'edits' must be a JSON object of block id to text: {e}"))
    })
}

fn parse_font_size(raw: Option<&str>, default: f64) -> Result<f64, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default);
    };
    match raw.parse::<f64>() {
        Ok(size) if size.is_finite() && size > 0.0 => Ok(size),
        _ => Err(AppError::Validation(format!(
            "'font_size' must be a positive number, got '{raw}'"
        ))),
    }
}

/// Zero-based page index; an absent or blank field means the first page.
fn parse_page_index(raw: Option<&str>) -> Result<usize, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(0);
    };
    raw.parse::<usize>().map_err(|_| {
        AppError::Validation(format!("'page' must be a non-negative integer, got '{raw}'"))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents/blocks
pub async fn handle_detect_blocks(multipart: Multipart) -> Result<Json<BlocksResponse>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form.require_file()?;

    let detected = tokio::task::spawn_blocking(move || detect_document_blocks(&PdfGlyphSource, &file))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in detection: {e}")))??;

    info!(
        pages = detected.page_count,
        blocks = detected.blocks.len(),
        "Detected bullet blocks"
    );
    Ok(Json(BlocksResponse {
        page_count: detected.page_count,
        blocks: detected.blocks,
    }))
}

/// POST /api/v1/documents/lines
pub async fn handle_page_lines(multipart: Multipart) -> Result<Json<PageLinesResponse>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form.require_file()?;
    let page_index = parse_page_index(form.page.as_deref())?;

    let lines = tokio::task::spawn_blocking(move || page_lines(&PdfGlyphSource, &file, page_index))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in line grouping: {e}")))??;

    debug!(page = page_index, lines = lines.len(), "Grouped page lines");
    Ok(Json(PageLinesResponse { page_index, lines }))
}

/// POST /api/v1/documents/edit
pub async fn handle_edit_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form.require_file()?;
    let edits = parse_edits(form.edits.as_deref())?;
    let font_size = parse_font_size(form.font_size.as_deref(), state.config.overlay_font_size)?;
    let style = OverlayStyle::new(state.config.resume_font, font_size);
    let requested = edits.len();

    // Detection and overlay are CPU-bound — run both off the async executor.
    let outcome = tokio::task::spawn_blocking(move || {
        let blocks = if edits.is_empty() {
            Vec::new()
        } else {
            detect_document_blocks(&PdfGlyphSource, &file)?.blocks
        };
        apply_overlay_edits(&file, &blocks, &edits, &style)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in overlay edit: {e}")))??;

    info!(
        requested,
        edited = outcome.edited_blocks,
        font_size,
        bytes = outcome.bytes.len(),
        "Applied overlay edits"
    );
    let headers = vec![(
        HeaderName::from_static(EDITED_BLOCKS_HEADER),
        HeaderValue::from(outcome.edited_blocks),
    )];
    Ok(pdf_response(outcome.bytes, headers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edits_accepts_object() {
        let edits = parse_edits(Some(r#"{"p0-b0":"Shipped v2"}"#)).unwrap();
        assert_eq!(edits.get("p0-b0").map(String::as_str), Some("Shipped v2"));
    }

    #[test]
    fn test_parse_edits_rejects_non_object() {
        assert!(matches!(
            parse_edits(Some("[1,2,3]")),
            Err(AppError::UnprocessableEntity(_))
        ));
        assert!(matches!(parse_edits(None), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_page_index_defaults_to_first_page() {
        assert_eq!(parse_page_index(None).unwrap(), 0);
        assert_eq!(parse_page_index(Some(" 2 ")).unwrap(), 2);
        assert!(matches!(parse_page_index(Some("-1")), Err(AppError::Validation(_))));
        assert!(matches!(parse_page_index(Some("two")), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_font_size_defaults_and_validates() {
        assert_eq!(parse_font_size(None, 10.0).unwrap(), 10.0);
        assert_eq!(parse_font_size(Some(" "), 10.0).unwrap(), 10.0);
        assert_eq!(parse_font_size(Some("9.5"), 10.0).unwrap(), 9.5);
        assert!(parse_font_size(Some("-1"), 10.0).is_err());
        assert!(parse_font_size(Some("NaN"), 10.0).is_err());
        assert!(parse_font_size(Some("big"), 10.0).is_err());
    }
}
