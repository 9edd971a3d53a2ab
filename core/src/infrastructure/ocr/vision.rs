use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient_analysis::{ports::LLMClient, value_objects::CompletionOptions},
    ocr::{ports::TextRecognizer, value_objects::ImageInput},
};

pub const VISION_OCR_PROMPT: &str = "Transcribe all text printed on this product label exactly as written, line by line. Output only the transcribed text with no commentary. If there is no readable text, output nothing.";

/// Text recognition delegated to a vision-capable chat model.
#[derive(Debug, Clone)]
pub struct VisionTextRecognizer<L: LLMClient> {
    llm_client: L,
    options: CompletionOptions,
}

impl<L: LLMClient> VisionTextRecognizer<L> {
    pub fn new(llm_client: L, model: impl Into<String>) -> Self {
        Self {
            llm_client,
            options: CompletionOptions {
                model: model.into(),
                temperature: 0.0,
            },
        }
    }
}

impl<L: LLMClient> TextRecognizer for VisionTextRecognizer<L> {
    async fn recognize(&self, image: ImageInput) -> Result<String, CoreError> {
        self.llm_client
            .complete_with_image(VISION_OCR_PROMPT.to_string(), image, self.options.clone())
            .await
            .map_err(|e| {
                tracing::error!("Vision OCR failed: {}", e);
                CoreError::RecognitionFailed(e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingredient_analysis::ports::MockLLMClient;

    #[tokio::test]
    async fn test_recognize_sends_image_with_transcription_prompt() {
        let mut llm = MockLLMClient::new();
        llm.expect_complete_with_image()
            .withf(|prompt, image, options| {
                prompt == VISION_OCR_PROMPT
                    && image.mime_type == "image/png"
                    && options.model == "vision-model"
                    && options.temperature == 0.0
            })
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok("Sugar\nSalt".to_string()) }));

        let text = VisionTextRecognizer::new(llm, "vision-model")
            .recognize(ImageInput::new(vec![1, 2], Some("image/png".to_string())))
            .await
            .unwrap();

        assert_eq!(text, "Sugar\nSalt");
    }

    #[tokio::test]
    async fn test_upstream_failure_becomes_recognition_failure() {
        let mut llm = MockLLMClient::new();
        llm.expect_complete_with_image().returning(|_, _, _| {
            Box::pin(async { Err(CoreError::external_with_status(502, "bad gateway")) })
        });

        let result = VisionTextRecognizer::new(llm, "vision-model")
            .recognize(ImageInput::new(vec![1], None))
            .await;

        assert!(matches!(result, Err(CoreError::RecognitionFailed(_))));
    }
}
