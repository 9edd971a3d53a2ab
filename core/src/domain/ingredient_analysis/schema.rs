use serde_json::json;

fn ingredient_skeleton() -> serde_json::Value {
    json!({
        "name": "",
        "what_it_is": "",
        "why_it_is_used": "",
        "tradeoffs": "",
        "uncertainty": "",
        "severity": "Low | Medium | High"
    })
}

fn nutrition_skeleton() -> serde_json::Value {
    json!({
        "calories_kcal": "",
        "carbohydrates_g": "",
        "sugars_g": "",
        "fats_g": "",
        "protein_g": "",
        "fiber_g": ""
    })
}

/// Returns the JSON shape expected from a whole-list analysis
pub fn get_analysis_output_format() -> serde_json::Value {
    json!({
        "ingredients": [ingredient_skeleton()],
        "overall_nutrition_per_100g": nutrition_skeleton(),
        "overall_conclusion": ""
    })
}

/// Returns the JSON shape expected for a single ingredient
pub fn get_ingredient_output_format() -> serde_json::Value {
    ingredient_skeleton()
}

/// Returns the JSON shape expected for the aggregate-only summary
pub fn get_summary_output_format() -> serde_json::Value {
    json!({
        "overall_nutrition_per_100g": nutrition_skeleton(),
        "overall_conclusion": ""
    })
}
