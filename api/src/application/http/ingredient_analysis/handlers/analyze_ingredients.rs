use axum::extract::State;
use ingredai_core::domain::ingredient_analysis::{
    entities::ReasoningOutcome, ports::IngredientAnalysisService,
    value_objects::AnalyzeIngredientsInput,
};

use crate::application::http::{
    ingredient_analysis::validators::ReasoningRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/reasoning",
    tag = "ingredient-analysis",
    summary = "Explain an ingredient list",
    description = "Returns a plain-language explanation of each ingredient with a severity level, an estimated nutrition profile and an overall conclusion. Greetings are answered without consulting the model.",
    responses(
        (status = 200, body = ReasoningOutcome),
        (status = 400, body = ApiErrorResponse),
        (status = 500, body = ApiErrorResponse),
        (status = 504, body = ApiErrorResponse)
    ),
    request_body = ReasoningRequest
)]
pub async fn analyze_ingredients(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ReasoningRequest>,
) -> Result<Response<ReasoningOutcome>, ApiError> {
    let outcome = state
        .service
        .analyze_ingredients(AnalyzeIngredientsInput {
            ingredients: payload.ingredients,
            product_context: payload.product_context,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(outcome))
}
