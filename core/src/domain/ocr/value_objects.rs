use serde::{Deserialize, Serialize};

pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl ImageInput {
    pub fn new(data: Vec<u8>, mime_type: Option<String>) -> Self {
        let mime_type = mime_type
            .filter(|m| m.starts_with("image/"))
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME_TYPE.to_string());

        Self { data, mime_type }
    }
}

/// Which engine turns label photos into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OcrBackend {
    /// Local `tesseract` executable.
    Tesseract,
    /// The configured chat-completion model with image input.
    Vision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_input_keeps_image_mime_type() {
        let image = ImageInput::new(vec![1, 2, 3], Some("image/png".to_string()));
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn test_image_input_defaults_unknown_mime_type() {
        assert_eq!(
            ImageInput::new(vec![1], None).mime_type,
            DEFAULT_IMAGE_MIME_TYPE
        );
        assert_eq!(
            ImageInput::new(vec![1], Some("application/octet-stream".to_string())).mime_type,
            DEFAULT_IMAGE_MIME_TYPE
        );
    }
}
