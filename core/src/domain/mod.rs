pub mod common;
pub mod ingredient_analysis;
pub mod intent;
pub mod ocr;
