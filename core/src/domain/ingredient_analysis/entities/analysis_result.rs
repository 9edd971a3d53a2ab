use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ingredient_analysis::entities::ingredient_analysis::IngredientAnalysis;

pub const NUTRITION_UNKNOWN: &str = "unknown";

pub const GREETING_MESSAGE: &str = "Hi! I'm your ingredient intelligence assistant. Paste ingredients and I'll break them down for you.";

/// Approximate nutrition per 100 g for the whole ingredient set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NutritionEstimate {
    pub calories_kcal: String,
    pub carbohydrates_g: String,
    pub sugars_g: String,
    pub fats_g: String,
    pub protein_g: String,
    pub fiber_g: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    pub ingredients: Vec<IngredientAnalysis>,
    pub overall_nutrition_per_100g: Option<NutritionEstimate>,
    pub overall_conclusion: Option<String>,
}

/// Aggregate fields computed over the full ingredient set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub overall_nutrition_per_100g: Option<NutritionEstimate>,
    pub overall_conclusion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GreetingReply {
    pub greeting: String,
}

impl Default for GreetingReply {
    fn default() -> Self {
        Self {
            greeting: GREETING_MESSAGE.to_string(),
        }
    }
}

/// Either a greeting or a full analysis; never both in one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ReasoningOutcome {
    Greeting(GreetingReply),
    Analysis(AnalysisResult),
}

impl AnalysisResult {
    pub fn from_parts(ingredients: Vec<IngredientAnalysis>, summary: AnalysisSummary) -> Self {
        Self {
            ingredients,
            overall_nutrition_per_100g: summary.overall_nutrition_per_100g,
            overall_conclusion: summary.overall_conclusion,
        }
    }
}
