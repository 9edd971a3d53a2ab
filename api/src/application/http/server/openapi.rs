use utoipa::OpenApi;

use crate::application::http::{
    health::HealthApiDoc, ingredient_analysis::router::IngredientAnalysisApiDoc,
    ocr::router::OcrApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "IngrediAI API"
    ),
    nest(
        (path = "/api", api = IngredientAnalysisApiDoc),
        (path = "/api", api = OcrApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
