use std::sync::Arc;

use crate::domain::{
    common::AnalysisConfig, ingredient_analysis::ports::LLMClient, ocr::ports::TextRecognizer,
};

/// Request-scoped orchestration over the upstream model and the text recognizer.
///
/// Holds nothing mutable; every request reads the same injected clients and
/// settings.
pub struct Service<LLM, OCR>
where
    LLM: LLMClient,
    OCR: TextRecognizer,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) text_recognizer: Arc<OCR>,
    pub(crate) settings: AnalysisSettings,
}

#[derive(Clone, Debug)]
pub struct AnalysisSettings {
    pub analysis: AnalysisConfig,
    pub model: String,
    pub temperature: f32,
}

impl<LLM, OCR> Service<LLM, OCR>
where
    LLM: LLMClient,
    OCR: TextRecognizer,
{
    pub fn new(llm_client: LLM, text_recognizer: OCR, settings: AnalysisSettings) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            text_recognizer: Arc::new(text_recognizer),
            settings,
        }
    }
}

impl<LLM, OCR> Clone for Service<LLM, OCR>
where
    LLM: LLMClient,
    OCR: TextRecognizer,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            text_recognizer: Arc::clone(&self.text_recognizer),
            settings: self.settings.clone(),
        }
    }
}
