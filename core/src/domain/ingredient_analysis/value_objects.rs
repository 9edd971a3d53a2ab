use serde::{Deserialize, Serialize};

use crate::domain::ingredient_analysis::entities::Severity;

#[derive(Debug, Clone)]
pub struct AnalyzeIngredientsInput {
    pub ingredients: String,
    pub product_context: Option<String>,
}

/// How the upstream model is asked about an ingredient list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMode {
    /// One completion for the whole list.
    Batch,
    /// One completion per ingredient plus one for the aggregate fields.
    PerIngredient,
}

/// Where the emitted severity comes from. Exactly one applies per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeverityPolicy {
    /// Canonicalize the model's own one-word tag.
    ModelTag,
    /// Ignore the model and infer from the ingredient name.
    KeywordLexicon,
}

impl SeverityPolicy {
    pub fn resolve(&self, name: &str, model_tag: Option<&str>) -> Severity {
        match self {
            SeverityPolicy::ModelTag => model_tag
                .map(Severity::from_tag)
                .unwrap_or(Severity::Medium),
            SeverityPolicy::KeywordLexicon => Severity::infer_from_name(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub options: CompletionOptions,
}
