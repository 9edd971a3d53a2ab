use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

use super::handlers::extract_text::{__path_extract_text, extract_text};
use crate::application::http::server::app_state::AppState;

/// Headroom for multipart boundaries and headers on top of the image itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(extract_text))]
pub struct OcrApiDoc;

pub fn ocr_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/ocr", state.args.server.root_path),
            post(extract_text),
        )
        .layer(DefaultBodyLimit::max(
            state.args.ocr.max_image_bytes + MULTIPART_OVERHEAD_BYTES,
        ))
}
