use std::future::Future;

use base64::{Engine as _, engine::general_purpose};
use redact::Secret;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    ingredient_analysis::{
        ports::LLMClient,
        value_objects::{CompletionOptions, CompletionRequest},
    },
    ocr::value_objects::ImageInput,
};

const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, Clone)]
pub struct OpenRouterLLMClient {
    api_key: Secret<String>,
    endpoint: String,
    referer: String,
    app_title: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenRouterLLMClient {
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            referer: config.referer.clone(),
            app_title: config.app_title.clone(),
            client,
        })
    }

    async fn call_openrouter_api(&self, request: ChatRequest) -> Result<String, CoreError> {
        let response = retry_on_connect(|| self.send(&request))
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("OpenRouter request failed: {}", e);
                if e.is_timeout() {
                    CoreError::external("request to upstream model timed out")
                } else {
                    CoreError::external(format!("request to upstream model failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenRouter API error: {} - {}", status, error_text);
            return Err(CoreError::external_with_status(
                status.as_u16(),
                upstream_error_message(&error_text),
            ));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenRouter response: {}", e);
            CoreError::external(format!("failed to parse upstream response: {e}"))
        })?;

        message_content(chat_response)
    }

    async fn send(&self, request: &ChatRequest) -> reqwest::Result<Response> {
        self.client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.app_title)
            .json(request)
            .send()
            .await
    }
}

impl LLMClient for OpenRouterLLMClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CoreError> {
        let request = ChatRequest {
            model: request.options.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(request.system_prompt),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Text(request.user_prompt),
                },
            ],
            temperature: request.options.temperature,
        };

        self.call_openrouter_api(request).await
    }

    async fn complete_with_image(
        &self,
        prompt: String,
        image: ImageInput,
        options: CompletionOptions,
    ) -> Result<String, CoreError> {
        let request = ChatRequest {
            model: options.model,
            messages: vec![ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text { text: prompt },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: data_uri(&image),
                        },
                    },
                ]),
            }],
            temperature: options.temperature,
        };

        self.call_openrouter_api(request).await
    }
}

/// Sends a second time only when the first attempt never reached the upstream.
async fn retry_on_connect<F, Fut>(mut send: F) -> reqwest::Result<Response>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = reqwest::Result<Response>>,
{
    match send().await {
        Err(e) if e.is_connect() => {
            tracing::warn!("OpenRouter connection failed, retrying once: {}", e.without_url());
            send().await
        }
        other => other,
    }
}

fn data_uri(image: &ImageInput) -> String {
    format!(
        "data:{};base64,{}",
        image.mime_type,
        general_purpose::STANDARD.encode(&image.data)
    )
}

fn message_content(response: ChatResponse) -> Result<String, CoreError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| CoreError::external("upstream response contained no message content"))
}

/// The provider's own error message when present, else a bounded excerpt of the body.
fn upstream_error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }

    let excerpt: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
    if excerpt.is_empty() {
        "empty error body".to_string()
    } else {
        excerpt
    }
}
