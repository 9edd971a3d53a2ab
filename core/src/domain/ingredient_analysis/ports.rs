use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient_analysis::{
        entities::ReasoningOutcome,
        value_objects::{AnalyzeIngredientsInput, CompletionOptions, CompletionRequest},
    },
    ocr::value_objects::ImageInput,
};

/// LLM Client trait for calling chat-completion models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Sends a system + user prompt pair and returns the raw message content.
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Sends a text prompt together with one image.
    fn complete_with_image(
        &self,
        prompt: String,
        image: ImageInput,
        options: CompletionOptions,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for ingredient reasoning
#[cfg_attr(test, mockall::automock)]
pub trait IngredientAnalysisService: Send + Sync {
    fn analyze_ingredients(
        &self,
        input: AnalyzeIngredientsInput,
    ) -> impl Future<Output = Result<ReasoningOutcome, CoreError>> + Send;
}
