use futures::{StreamExt, TryStreamExt, stream};
use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7, services::Service},
    ingredient_analysis::{
        entities::{AnalysisResult, GreetingReply, IngredientAnalysis, ReasoningOutcome},
        helpers::split_ingredients,
        normalizer::{normalize, normalize_ingredient, normalize_summary},
        ports::{IngredientAnalysisService, LLMClient},
        prompt::{RenderedPrompt, build_ingredient_prompt, build_prompt, build_summary_prompt},
        value_objects::{AnalysisMode, AnalyzeIngredientsInput, CompletionOptions, CompletionRequest},
    },
    intent::{Intent, classify_intent},
    ocr::ports::TextRecognizer,
};

impl<LLM, OCR> IngredientAnalysisService for Service<LLM, OCR>
where
    LLM: LLMClient,
    OCR: TextRecognizer,
{
    #[instrument(
        skip(self, input),
        fields(analysis_id = %generate_uuid_v7(), mode = ?self.settings.analysis.mode)
    )]
    async fn analyze_ingredients(
        &self,
        input: AnalyzeIngredientsInput,
    ) -> Result<ReasoningOutcome, CoreError> {
        // 1. Validate and classify
        if classify_intent(&input.ingredients)? == Intent::Greeting {
            tracing::info!("greeting detected, skipping upstream model");
            return Ok(ReasoningOutcome::Greeting(GreetingReply::default()));
        }

        // 2. Analyze under the request deadline
        let deadline = self.settings.analysis.request_deadline;
        let result = tokio::time::timeout(deadline, self.run_analysis(&input))
            .await
            .map_err(|_| {
                tracing::error!(?deadline, "ingredient analysis exceeded its deadline");
                CoreError::DeadlineExceeded(deadline)
            })??;

        tracing::info!(
            ingredients = result.ingredients.len(),
            "ingredient analysis completed"
        );

        Ok(ReasoningOutcome::Analysis(result))
    }
}

impl<LLM, OCR> Service<LLM, OCR>
where
    LLM: LLMClient,
    OCR: TextRecognizer,
{
    async fn run_analysis(
        &self,
        input: &AnalyzeIngredientsInput,
    ) -> Result<AnalysisResult, CoreError> {
        let policy = self.settings.analysis.severity_policy;

        match self.settings.analysis.mode {
            AnalysisMode::Batch => {
                let prompt = build_prompt(&input.ingredients, input.product_context.as_deref());
                self.complete_and_normalize(&prompt, |raw| normalize(raw, policy))
                    .await
            }
            AnalysisMode::PerIngredient => self.analyze_per_ingredient(input).await,
        }
    }

    /// One completion per ingredient (bounded concurrency, input order kept)
    /// followed by one completion for the aggregate fields.
    async fn analyze_per_ingredient(
        &self,
        input: &AnalyzeIngredientsInput,
    ) -> Result<AnalysisResult, CoreError> {
        let names = split_ingredients(&input.ingredients);
        if names.is_empty() {
            return Err(CoreError::InvalidInput(
                "no ingredient names found in input".to_string(),
            ));
        }

        let context = input.product_context.as_deref();
        let limit = self.settings.analysis.per_ingredient_concurrency.max(1);

        let calls: Vec<_> = names
            .iter()
            .map(|name| self.analyze_single(name, &input.ingredients, context))
            .collect();
        let ingredients: Vec<IngredientAnalysis> =
            stream::iter(calls).buffered(limit).try_collect().await?;

        let summary_prompt = build_summary_prompt(&input.ingredients, context);
        let summary = self
            .complete_and_normalize(&summary_prompt, normalize_summary)
            .await?;

        Ok(AnalysisResult::from_parts(ingredients, summary))
    }

    async fn analyze_single(
        &self,
        name: &str,
        ingredients: &str,
        context: Option<&str>,
    ) -> Result<IngredientAnalysis, CoreError> {
        let policy = self.settings.analysis.severity_policy;
        let prompt = build_ingredient_prompt(name, ingredients, context);

        self.complete_and_normalize(&prompt, |raw| normalize_ingredient(raw, name, policy))
            .await
    }

    /// Calls the model and parses its answer, re-asking once with the strict
    /// JSON instruction when the first answer is malformed.
    async fn complete_and_normalize<T, F>(
        &self,
        prompt: &RenderedPrompt,
        parse: F,
    ) -> Result<T, CoreError>
    where
        T: Send,
        F: Fn(&str) -> Result<T, CoreError> + Send + Sync,
    {
        let raw = self.llm_client.complete(self.completion_request(prompt)).await?;

        match parse(&raw) {
            Err(CoreError::MalformedAIOutput(reason)) if self.settings.analysis.strict_json_retry => {
                tracing::warn!(%reason, "malformed model output, re-asking with strict JSON instruction");

                let raw = self
                    .llm_client
                    .complete(self.completion_request(&prompt.strict()))
                    .await?;
                parse(&raw)
            }
            Err(CoreError::MalformedAIOutput(reason)) => {
                tracing::error!(%reason, "malformed model output");
                Err(CoreError::MalformedAIOutput(reason))
            }
            other => other,
        }
    }

    fn completion_request(&self, prompt: &RenderedPrompt) -> CompletionRequest {
        tracing::debug!(prompt_version = prompt.version, "rendering completion request");

        CompletionRequest {
            system_prompt: prompt.system.to_string(),
            user_prompt: prompt.user.clone(),
            options: CompletionOptions {
                model: self.settings.model.clone(),
                temperature: self.settings.temperature,
            },
        }
    }
}
