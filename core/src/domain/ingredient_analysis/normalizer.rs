use serde_json::{Map, Value};

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient_analysis::{
        entities::{
            AnalysisResult, AnalysisSummary, FALLBACK_TRADEOFFS, FALLBACK_UNCERTAINTY,
            FALLBACK_WHAT_IT_IS, FALLBACK_WHY_IT_IS_USED, IngredientAnalysis, NUTRITION_UNKNOWN,
            NutritionEstimate, UNNAMED_INGREDIENT,
        },
        value_objects::SeverityPolicy,
    },
};

/// Removes a code fence wrapped around the whole model answer.
///
/// Only a fence that opens the (trimmed) text is stripped; fences buried in
/// prose are left alone.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop an info string such as `json`, on its own line or glued to the body.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Parses model content into its top-level JSON object.
pub fn parse_model_output(raw: &str) -> Result<Map<String, Value>, CoreError> {
    let body = strip_code_fences(raw);

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(root)) => Ok(root),
        Ok(other) => Err(CoreError::MalformedAIOutput(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(CoreError::MalformedAIOutput(format!(
            "model output is not valid JSON: {e}"
        ))),
    }
}

/// Turns a whole-list model answer into a fully populated [`AnalysisResult`].
pub fn normalize(raw: &str, policy: SeverityPolicy) -> Result<AnalysisResult, CoreError> {
    let root = parse_model_output(raw)?;

    let ingredients = match root.get("ingredients") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(position, item)| normalize_list_item(position, item, policy))
            .collect(),
        Some(other) => {
            return Err(CoreError::MalformedAIOutput(format!(
                "`ingredients` must be a list, got {}",
                json_kind(other)
            )));
        }
    };

    Ok(AnalysisResult::from_parts(ingredients, summarize(&root)))
}

/// Normalizes the answer to a single-ingredient prompt.
///
/// Accepts either the bare record or a record wrapped in `{"ingredients": [..]}`.
pub fn normalize_ingredient(
    raw: &str,
    fallback_name: &str,
    policy: SeverityPolicy,
) -> Result<IngredientAnalysis, CoreError> {
    let root = parse_model_output(raw)?;

    let record = match root.get("ingredients") {
        Some(Value::Array(items)) => match items.first() {
            Some(Value::Object(first)) => first,
            _ => {
                return Err(CoreError::MalformedAIOutput(
                    "`ingredients` does not contain a record".to_string(),
                ));
            }
        },
        _ => &root,
    };

    Ok(normalize_record(record, fallback_name.trim().to_string(), policy))
}

/// Extracts only the aggregate fields from a summary answer.
pub fn normalize_summary(raw: &str) -> Result<AnalysisSummary, CoreError> {
    let root = parse_model_output(raw)?;
    Ok(summarize(&root))
}

fn normalize_list_item(
    position: usize,
    item: &Value,
    policy: SeverityPolicy,
) -> Option<IngredientAnalysis> {
    let fallback_name = format!("Ingredient {}", position + 1);

    match item {
        Value::Object(record) => Some(normalize_record(record, fallback_name, policy)),
        Value::String(name) => {
            let mut record = Map::new();
            record.insert("name".to_string(), Value::String(name.clone()));
            Some(normalize_record(&record, fallback_name, policy))
        }
        other => {
            tracing::warn!(
                position,
                kind = json_kind(other),
                "skipping ingredient entry that is not a record"
            );
            None
        }
    }
}

fn normalize_record(
    record: &Map<String, Value>,
    fallback_name: String,
    policy: SeverityPolicy,
) -> IngredientAnalysis {
    let name = text_field(record, "name")
        .or_else(|| (!fallback_name.is_empty()).then_some(fallback_name))
        .unwrap_or_else(|| UNNAMED_INGREDIENT.to_string());

    let model_tag = text_field(record, "severity");
    let severity = policy.resolve(&name, model_tag.as_deref());

    let analysis = IngredientAnalysis {
        what_it_is: text_field(record, "what_it_is")
            .unwrap_or_else(|| FALLBACK_WHAT_IT_IS.to_string()),
        why_it_is_used: text_field(record, "why_it_is_used")
            .unwrap_or_else(|| FALLBACK_WHY_IT_IS_USED.to_string()),
        tradeoffs: text_field(record, "tradeoffs")
            .unwrap_or_else(|| FALLBACK_TRADEOFFS.to_string()),
        uncertainty: text_field(record, "uncertainty")
            .unwrap_or_else(|| FALLBACK_UNCERTAINTY.to_string()),
        severity,
        name,
    };

    debug_assert!(!analysis.has_empty_field(), "fallbacks left an empty field");
    analysis
}

fn summarize(root: &Map<String, Value>) -> AnalysisSummary {
    let overall_nutrition_per_100g = match root.get("overall_nutrition_per_100g") {
        Some(Value::Object(nutrition)) => Some(NutritionEstimate {
            calories_kcal: nutrition_field(nutrition, "calories_kcal"),
            carbohydrates_g: nutrition_field(nutrition, "carbohydrates_g"),
            sugars_g: nutrition_field(nutrition, "sugars_g"),
            fats_g: nutrition_field(nutrition, "fats_g"),
            protein_g: nutrition_field(nutrition, "protein_g"),
            fiber_g: nutrition_field(nutrition, "fiber_g"),
        }),
        _ => None,
    };

    AnalysisSummary {
        overall_nutrition_per_100g,
        overall_conclusion: text_field(root, "overall_conclusion"),
    }
}

fn nutrition_field(nutrition: &Map<String, Value>, key: &str) -> String {
    text_field(nutrition, key).unwrap_or_else(|| NUTRITION_UNKNOWN.to_string())
}

/// A usable scalar value as trimmed text; empty strings, nulls and containers yield `None`.
fn text_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
