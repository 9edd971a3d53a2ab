use std::process::Stdio;

use tokio::{io::AsyncWriteExt, process::Command};

use crate::domain::{
    common::entities::app_errors::CoreError,
    ocr::{ports::TextRecognizer, value_objects::ImageInput},
};

/// Runs the local `tesseract` executable, piping the image through stdin.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    program: String,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(program: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            language: language.into(),
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(["stdin", "stdout", "-l", &self.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image: ImageInput) -> Result<String, CoreError> {
        let mut child = self.command().spawn().map_err(|e| {
            tracing::error!("Failed to start {}: {}", self.program, e);
            CoreError::RecognitionFailed(format!("could not start OCR engine: {e}"))
        })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            CoreError::RecognitionFailed("OCR engine stdin is unavailable".to_string())
        })?;
        let writer = tokio::spawn(async move {
            stdin.write_all(&image.data).await?;
            stdin.shutdown().await
        });

        let output = child.wait_with_output().await.map_err(|e| {
            tracing::error!("OCR engine did not complete: {}", e);
            CoreError::RecognitionFailed(format!("OCR engine did not complete: {e}"))
        })?;

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("OCR engine closed stdin early: {}", e),
            Err(e) => tracing::warn!("OCR stdin writer aborted: {}", e),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!("OCR engine exited with {}: {}", output.status, stderr.trim());
            return Err(CoreError::RecognitionFailed(format!(
                "OCR engine exited with {}",
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_executable_is_recognition_failure() {
        let recognizer = TesseractRecognizer::new("/nonexistent/tesseract-binary", "eng");

        let result = recognizer
            .recognize(ImageInput::new(vec![0xFF, 0xD8], None))
            .await;

        assert!(matches!(result, Err(CoreError::RecognitionFailed(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_of_engine_is_returned() {
        // echo ignores stdin and prints its arguments
        let recognizer = TesseractRecognizer::new("echo", "eng");

        let text = recognizer
            .recognize(ImageInput::new(b"ignored".to_vec(), None))
            .await
            .unwrap();

        assert_eq!(text.trim(), "stdin stdout -l eng");
    }
}
