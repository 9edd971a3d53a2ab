use std::time::Duration;

use chrono::{DateTime, Utc};
use redact::Secret;
use uuid::{NoContext, Timestamp, Uuid};

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient_analysis::value_objects::{AnalysisMode, SeverityPolicy},
    ocr::value_objects::OcrBackend,
};

pub mod entities;
pub mod services;

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_LLM_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.7;

#[derive(Clone, Debug)]
pub struct IngredaiConfig {
    pub llm: LLMConfig,
    pub analysis: AnalysisConfig,
    pub ocr: OcrConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub api_key: Secret<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
    pub referer: String,
    pub app_title: String,
}

#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    pub mode: AnalysisMode,
    pub severity_policy: SeverityPolicy,
    pub request_deadline: Duration,
    pub per_ingredient_concurrency: usize,
    pub strict_json_retry: bool,
}

#[derive(Clone, Debug)]
pub struct OcrConfig {
    pub backend: OcrBackend,
    pub tesseract_path: String,
    pub language: String,
    pub vision_model: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::Batch,
            severity_policy: SeverityPolicy::ModelTag,
            request_deadline: Duration::from_secs(30),
            per_ingredient_concurrency: 3,
            strict_json_retry: true,
        }
    }
}

impl IngredaiConfig {
    /// Rejects settings that would only surface as failures on the first request.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.llm.api_key.expose_secret().trim().is_empty() {
            return Err(CoreError::Configuration(
                "upstream API key is missing".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.llm.temperature) {
            return Err(CoreError::Configuration(format!(
                "temperature must be between 0.0 and 1.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.model.trim().is_empty() {
            return Err(CoreError::Configuration(
                "upstream model identifier is empty".to_string(),
            ));
        }

        if self.analysis.per_ingredient_concurrency == 0 {
            return Err(CoreError::Configuration(
                "per-ingredient concurrency must be at least 1".to_string(),
            ));
        }

        if self.analysis.request_deadline.is_zero() {
            return Err(CoreError::Configuration(
                "request deadline must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn config() -> IngredaiConfig {
        IngredaiConfig {
            llm: LLMConfig {
                api_key: Secret::new("sk-or-test-key".to_string()),
                base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
                model: DEFAULT_LLM_MODEL.to_string(),
                temperature: DEFAULT_LLM_TEMPERATURE,
                timeout: Duration::from_secs(20),
                referer: "http://localhost:8000".to_string(),
                app_title: "IngrediAI".to_string(),
            },
            analysis: AnalysisConfig::default(),
            ocr: OcrConfig {
                backend: OcrBackend::Tesseract,
                tesseract_path: "tesseract".to_string(),
                language: "eng".to_string(),
                vision_model: DEFAULT_LLM_MODEL.to_string(),
            },
        }
    }
}
