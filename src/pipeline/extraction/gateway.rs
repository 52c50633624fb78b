//! Vision OCR engine backed by a hosted chat-completions gateway.
//!
//! One request per document image: a mode-specific system prompt, a
//! class-specific user prompt and the image inlined as a data URL. The
//! model's reply is parsed leniently into an `ExtractedRecord`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::parser::parse_extracted_record;
use super::prompt::{system_prompt, user_prompt};
use super::types::DocumentExtractor;
use super::ExtractionError;
use crate::config::GatewayConfig;
use crate::models::{DocumentClass, ExtractedRecord, ExtractionMode};

const DEFAULT_MIME: &str = "image/jpeg";

// ──────────────────────────────────────────────
// Wire types
// ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
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

// ──────────────────────────────────────────────
// VisionGatewayExtractor
// ──────────────────────────────────────────────

/// Production OCR engine.
pub struct VisionGatewayExtractor {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

impl VisionGatewayExtractor {
    pub fn new(config: &GatewayConfig) -> Result<Self, ExtractionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExtractionError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(
        &self,
        image: &[u8],
        class: DocumentClass,
        mime_type: &str,
        mode: ExtractionMode,
    ) -> ChatRequest<'_> {
        let mime = if mime_type.trim().is_empty() {
            DEFAULT_MIME
        } else {
            mime_type
        };
        let data_url = format!(
            "data:{mime};base64,{}",
            base64::engine::general_purpose::STANDARD.encode(image)
        );

        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(system_prompt(mode)),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: user_prompt(class, mode),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl { url: data_url },
                        },
                    ]),
                },
            ],
        }
    }
}

#[async_trait]
impl DocumentExtractor for VisionGatewayExtractor {
    async fn extract(
        &self,
        image: &[u8],
        class: DocumentClass,
        mime_type: &str,
        mode: ExtractionMode,
    ) -> Result<ExtractedRecord, ExtractionError> {
        if image.is_empty() {
            return Err(ExtractionError::MissingImage);
        }

        let start = Instant::now();
        tracing::info!(
            class = class.as_str(),
            mode = mode.as_str(),
            image_size = image.len(),
            model = %self.model,
            "Vision extraction started"
        );

        let body = self.build_request(image, class, mime_type, mode);
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractionError::from_transport(&e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %error_text, "AI gateway error");
            return Err(ExtractionError::from_status(status.as_u16()));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::Http(format!("Invalid gateway response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ExtractionError::EmptyContent)?;

        let record = parse_extracted_record(&content).inspect_err(|e| {
            tracing::warn!(error = %e, content_len = content.len(), "Failed to parse model output");
        })?;

        tracing::info!(
            class = class.as_str(),
            mode = mode.as_str(),
            elapsed_ms = %start.elapsed().as_millis(),
            fields = ?record.present_fields(),
            confidence = ?record.confidence,
            "Vision extraction complete"
        );

        Ok(record)
    }
}
