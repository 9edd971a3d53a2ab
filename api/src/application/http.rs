pub mod health;
pub mod ingredient_analysis;
pub mod ocr;
pub mod server;
