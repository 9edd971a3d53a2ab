use std::sync::Arc;

use ingredai_core::application::IngredaiService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: IngredaiService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: IngredaiService) -> Self {
        Self { args, service }
    }
}
