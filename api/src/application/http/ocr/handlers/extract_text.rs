use axum::extract::{Multipart, State, multipart::MultipartRejection};
use ingredai_core::domain::ocr::{
    entities::ExtractedText, ports::OcrService, value_objects::ImageInput,
};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

pub const IMAGE_FIELD: &str = "image";

#[utoipa::path(
    post,
    path = "/ocr",
    tag = "ocr",
    summary = "Extract ingredient text from a label photo",
    description = "Accepts a multipart upload with an `image` field and returns the recognized text as a single comma separated line.",
    responses(
        (status = 200, body = ExtractedText),
        (status = 400, body = ApiErrorResponse),
        (status = 500, body = ApiErrorResponse)
    )
)]
pub async fn extract_text(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response<ExtractedText>, ApiError> {
    let mut multipart = multipart?;
    let max_image_bytes = state.args.ocr.max_image_bytes;
    let mut image: Option<ImageInput> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let mime_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

        if data.len() > max_image_bytes {
            return Err(ApiError::BadRequest(format!(
                "Image too large. Max size is {} bytes",
                max_image_bytes
            )));
        }

        image = Some(ImageInput::new(data.to_vec(), mime_type));
    }

    let image = image.ok_or_else(|| ApiError::BadRequest("No image uploaded".to_string()))?;

    let extracted = state
        .service
        .extract_text(image)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(extracted))
}
