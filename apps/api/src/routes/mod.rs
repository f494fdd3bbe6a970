pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Render API
        .route("/api/v1/render/pdf", post(render::handle_render_pdf))
        // Documents API
        .route("/api/v1/documents/blocks", post(documents::handle_detect_blocks))
        .route("/api/v1/documents/lines", post(documents::handle_page_lines))
        .route("/api/v1/documents/edit", post(documents::handle_edit_document))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
