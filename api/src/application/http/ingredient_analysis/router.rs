use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::analyze_ingredients::{__path_analyze_ingredients, analyze_ingredients};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(analyze_ingredients))]
pub struct IngredientAnalysisApiDoc;

pub fn ingredient_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/api/reasoning", state.args.server.root_path),
        post(analyze_ingredients),
    )
}
