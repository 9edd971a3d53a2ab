use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ocr::{entities::ExtractedText, value_objects::ImageInput},
};

/// Port for the optical character recognition engine
#[cfg_attr(test, mockall::automock)]
pub trait TextRecognizer: Send + Sync {
    /// Returns the raw text found in the image, line breaks included.
    fn recognize(
        &self,
        image: ImageInput,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for label text extraction
#[cfg_attr(test, mockall::automock)]
pub trait OcrService: Send + Sync {
    fn extract_text(
        &self,
        image: ImageInput,
    ) -> impl Future<Output = Result<ExtractedText, CoreError>> + Send;
}
