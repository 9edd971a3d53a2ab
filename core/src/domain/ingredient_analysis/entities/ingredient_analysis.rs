use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ingredient_analysis::entities::severity::Severity;

pub const UNNAMED_INGREDIENT: &str = "Unnamed ingredient";

pub const FALLBACK_WHAT_IT_IS: &str =
    "A food ingredient; the model did not describe what it is.";
pub const FALLBACK_WHY_IT_IS_USED: &str =
    "The reason manufacturers add this ingredient was not provided.";
pub const FALLBACK_TRADEOFFS: &str =
    "Tradeoffs for this ingredient could not be determined from the analysis.";
pub const FALLBACK_UNCERTAINTY: &str =
    "Evidence about this ingredient varies with source and usage level.";

/// One ingredient as sent to the front end. Every field is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientAnalysis {
    pub name: String,
    pub what_it_is: String,
    pub why_it_is_used: String,
    pub tradeoffs: String,
    pub uncertainty: String,
    pub severity: Severity,
}

impl IngredientAnalysis {
    pub fn has_empty_field(&self) -> bool {
        [
            &self.name,
            &self.what_it_is,
            &self.why_it_is_used,
            &self.tradeoffs,
            &self.uncertainty,
        ]
        .iter()
        .any(|field| field.trim().is_empty())
    }
}
