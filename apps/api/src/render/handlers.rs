//! Axum route handlers for the Render API.

use axum::{
    extract::State,
    http::{HeaderName, HeaderValue},
    response::Response,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::layout::{FontFamily, SizeProfileKind};
use crate::models::resume::StructuredResume;
use crate::render::pdf_response;
use crate::render::policy::{render_resume, PageMode};
use crate::state::AppState;

pub const PAGE_COUNT_HEADER: &str = "x-page-count";
pub const TRUNCATED_HEADER: &str = "x-truncated";
pub const SIZE_PROFILE_HEADER: &str = "x-size-profile";

#[derive(Debug, Deserialize)]
pub struct RenderPdfRequest {
    pub resume: StructuredResume,
    #[serde(default)]
    pub mode: PageMode,
    /// Overrides the configured font family.
    #[serde(default)]
    pub font: Option<String>,
    /// Pins the size profile; disables the one-page compact retry.
    #[serde(default)]
    pub profile: Option<String>,
}

/// POST /api/v1/render/pdf
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    Json(req): Json<RenderPdfRequest>,
) -> Result<Response, AppError> {
    if req.resume.header.name.trim().is_empty() {
        return Err(AppError::Validation("resume.header.name must not be empty".into()));
    }
    let family = match req.font.as_deref() {
        Some(name) => name.parse::<FontFamily>()?,
        None => state.config.resume_font,
    };
    let profile = req
        .profile
        .as_deref()
        .map(str::parse::<SizeProfileKind>)
        .transpose()?;
    let page_size = state.config.page_size;
    let mode = req.mode;
    let resume = req.resume;

    // CPU-bound layout — spawn_blocking to avoid blocking the async executor.
    let rendered = tokio::task::spawn_blocking(move || {
        render_resume(&resume, mode, profile, family, page_size)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    info!(
        ?mode,
        font = ?family,
        profile = rendered.profile.as_str(),
        pages = rendered.page_count,
        truncated = rendered.truncated,
        bytes = rendered.bytes.len(),
        "Rendered résumé PDF"
    );

    let headers = vec![
        (
            HeaderName::from_static(PAGE_COUNT_HEADER),
            HeaderValue::from(rendered.page_count),
        ),
        (
            HeaderName::from_static(TRUNCATED_HEADER),
            HeaderValue::from_static(if rendered.truncated { "true" } else { "false" }),
        ),
        (
            HeaderName::from_static(SIZE_PROFILE_HEADER),
            HeaderValue::from_static(rendered.profile.as_str()),
        ),
    ];
    Ok(pdf_response(rendered.bytes, headers))
}
