use std::sync::LazyLock;

use regex::Regex;
use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    ingredient_analysis::ports::LLMClient,
    ocr::{
        entities::ExtractedText,
        ports::{OcrService, TextRecognizer},
        value_objects::ImageInput,
    },
};

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("line break pattern is valid"));

static NON_LABEL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9, ]").expect("label charset pattern is valid"));

/// Reduces raw OCR output to an ingredient-style, comma separated line.
///
/// Runs of line breaks become `", "`, everything outside `[A-Za-z0-9, ]` is
/// dropped and leading or trailing separators are trimmed.
pub fn clean_recognized_text(raw: &str) -> String {
    let joined = LINE_BREAKS.replace_all(raw, ", ");
    NON_LABEL_CHARS
        .replace_all(&joined, "")
        .trim_matches(|c: char| c == ',' || c == ' ')
        .to_string()
}

impl<LLM, OCR> OcrService for Service<LLM, OCR>
where
    LLM: LLMClient,
    OCR: TextRecognizer,
{
    #[instrument(skip(self, image), fields(bytes = image.data.len(), mime_type = %image.mime_type))]
    async fn extract_text(&self, image: ImageInput) -> Result<ExtractedText, CoreError> {
        if image.data.is_empty() {
            return Err(CoreError::InvalidInput("uploaded image is empty".to_string()));
        }

        let raw = self.text_recognizer.recognize(image).await?;
        let extracted_text = clean_recognized_text(&raw);

        tracing::info!(
            raw_chars = raw.len(),
            cleaned_chars = extracted_text.len(),
            "recognized label text"
        );

        Ok(ExtractedText { extracted_text })
    }
}
