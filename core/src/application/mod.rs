use crate::{
    domain::common::{
        IngredaiConfig,
        entities::app_errors::CoreError,
        services::{AnalysisSettings, Service},
    },
    infrastructure::{llm::openrouter_client::OpenRouterLLMClient, ocr::OcrEngine},
};

pub type IngredaiService = Service<OpenRouterLLMClient, OcrEngine>;

pub fn create_service(config: IngredaiConfig) -> Result<IngredaiService, CoreError> {
    config.validate()?;

    let llm_client = OpenRouterLLMClient::new(&config.llm)?;
    let ocr_engine = OcrEngine::from_config(&config.ocr, llm_client.clone());

    tracing::info!(
        model = %config.llm.model,
        mode = ?config.analysis.mode,
        severity_policy = ?config.analysis.severity_policy,
        ocr_backend = ?config.ocr.backend,
        "ingredient reasoning service configured"
    );

    Ok(Service::new(
        llm_client,
        ocr_engine,
        AnalysisSettings {
            analysis: config.analysis,
            model: config.llm.model,
            temperature: config.llm.temperature,
        },
    ))
}
