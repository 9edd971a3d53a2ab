use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct ReasoningRequest {
    #[validate(length(min = 1, message = "ingredients must be a non-empty string"))]
    #[schema(example = "sugar, salt, palm oil, soy lecithin")]
    pub ingredients: String,

    #[schema(example = "chocolate spread")]
    pub product_context: Option<String>,
}
