pub mod llm;
pub mod ocr;
