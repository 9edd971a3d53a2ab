use crate::{
    domain::{
        common::{OcrConfig, entities::app_errors::CoreError},
        ocr::{
            ports::TextRecognizer,
            value_objects::{ImageInput, OcrBackend},
        },
    },
    infrastructure::llm::openrouter_client::OpenRouterLLMClient,
};

pub mod tesseract;
pub mod vision;

use tesseract::TesseractRecognizer;
use vision::VisionTextRecognizer;

/// The recognizer selected by configuration at startup.
#[derive(Debug, Clone)]
pub enum OcrEngine {
    Tesseract(TesseractRecognizer),
    Vision(VisionTextRecognizer<OpenRouterLLMClient>),
}

impl OcrEngine {
    pub fn from_config(config: &OcrConfig, llm_client: OpenRouterLLMClient) -> Self {
        match config.backend {
            OcrBackend::Tesseract => Self::Tesseract(TesseractRecognizer::new(
                config.tesseract_path.clone(),
                config.language.clone(),
            )),
            OcrBackend::Vision => Self::Vision(VisionTextRecognizer::new(
                llm_client,
                config.vision_model.clone(),
            )),
        }
    }
}

impl TextRecognizer for OcrEngine {
    async fn recognize(&self, image: ImageInput) -> Result<String, CoreError> {
        match self {
            OcrEngine::Tesseract(recognizer) => recognizer.recognize(image).await,
            OcrEngine::Vision(recognizer) => recognizer.recognize(image).await,
        }
    }
}
