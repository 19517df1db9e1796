//! OpenAI-style chat-completions vision client
//!
//! Concrete [`VisionBackend`] over a multimodal chat-completions endpoint.
//! Owns the prompt texts and the per-tier wire parameters (model, token
//! budget, response format, image detail); interpreting the returned
//! content is the caller's concern.

use crate::config::{AnalyzerConfig, ModelCatalog};
use crate::types::{ModelTier, OcrQuality, VisionBackend, VisionError};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("shot-analyzer/", env!("CARGO_PKG_VERSION"));

const OCR_PROMPT: &str = "Extract all text from this golf shot monitor image. \
     Return only the raw text, no formatting.";

const MAX_VISION_PROMPT: &str = "You are an expert golf launch monitor analyst. \
     Extract ALL visible metrics from this golf shot monitor image with extreme precision.\n\
     \n\
     Look for:\n\
     1. Ball Speed (may be shown as \"Ball Speed\", \"BS\", \"Velocity\", etc.)\n\
     2. Launch Angle (may be shown as \"Launch\", \"LA\", \"Vert Angle\", etc.)\n\
     3. Spin Rate (may be shown as \"Spin\", \"RPM\", \"SR\", etc.)\n\
     4. Carry Distance (may be shown as \"Carry\", \"CRY\", etc.)\n\
     5. Total Distance (may be shown as \"Total\", \"TOT\", etc.)\n\
     \n\
     Also identify any other visible metrics like club speed, smash factor, apex height, etc.\n\
     \n\
     Return a JSON object with the numeric values only.";

fn structured_prompt(hint_text: &str) -> String {
    format!(
        "Extract golf shot metrics from this image.\n\
         OCR found: \"{}\"\n\
         \n\
         Return JSON with these exact numeric fields:\n\
         - ballSpeed (mph)\n\
         - launchAngle (degrees)\n\
         - spinRate (rpm)\n\
         - carry (yards)\n\
         - total (yards)\n\
         \n\
         Only return the JSON object, no other text.",
        hint_text
    )
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Chat-completions vision client
pub struct OpenAiVisionClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    models: ModelCatalog,
}

impl OpenAiVisionClient {
    /// Create a new client with a bounded per-request timeout.
    pub fn new(api_key: String, config: &AnalyzerConfig) -> Result<Self, VisionError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| VisionError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            models: config.models.clone(),
        })
    }

    fn model_for_quality(&self, quality: OcrQuality) -> &str {
        match quality {
            OcrQuality::Standard => &self.models.fast,
            OcrQuality::High => &self.models.premium,
        }
    }

    fn model_for_tier(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Fast => &self.models.fast,
            ModelTier::Premium => &self.models.premium,
            ModelTier::MaxVision => &self.models.vision,
        }
    }

    /// Encode image bytes as a JPEG data URL content part.
    fn image_part(image: &[u8], detail: Option<&'static str>) -> ContentPart {
        let url = format!(
            "data:image/jpeg;base64,{}",
            general_purpose::STANDARD.encode(image)
        );
        ContentPart::ImageUrl {
            image_url: ImageUrl { url, detail },
        }
    }

    /// Send a chat request and return the first choice's content.
    ///
    /// An empty or absent content field yields an empty string, matching
    /// the upstream contract of "content or nothing".
    async fn chat(&self, request: &ChatRequest) -> Result<String, VisionError> {
        debug!(model = %request.model, "Querying vision endpoint");

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| VisionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(VisionError::Api(status.as_u16(), error_text));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| VisionError::Malformed(e.to_string()))?;

        Ok(chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl VisionBackend for OpenAiVisionClient {
    async fn recognize_text(
        &self,
        image: &[u8],
        quality: OcrQuality,
    ) -> Result<String, VisionError> {
        let request = ChatRequest {
            model: self.model_for_quality(quality).to_string(),
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: OCR_PROMPT.to_string(),
                    },
                    Self::image_part(image, None),
                ],
            }],
            max_tokens: 200,
            temperature: 0.0,
            response_format: None,
        };

        self.chat(&request).await
    }

    async fn extract_structured(
        &self,
        image: &[u8],
        hint_text: &str,
        tier: ModelTier,
    ) -> Result<String, VisionError> {
        // The max tier uses its own expert prompt and a high-detail image
        // payload; the cheaper tiers embed the OCR hint and force a JSON
        // object response.
        let request = match tier {
            ModelTier::Fast | ModelTier::Premium => ChatRequest {
                model: self.model_for_tier(tier).to_string(),
                messages: vec![ChatMessage {
                    role: "user",
                    content: vec![
                        ContentPart::Text {
                            text: structured_prompt(hint_text),
                        },
                        Self::image_part(image, None),
                    ],
                }],
                max_tokens: 150,
                temperature: 0.0,
                response_format: Some(ResponseFormat {
                    format_type: "json_object",
                }),
            },
            ModelTier::MaxVision => ChatRequest {
                model: self.model_for_tier(tier).to_string(),
                messages: vec![ChatMessage {
                    role: "user",
                    content: vec![
                        ContentPart::Text {
                            text: MAX_VISION_PROMPT.to_string(),
                        },
                        Self::image_part(image, Some("high")),
                    ],
                }],
                max_tokens: 500,
                temperature: 0.0,
                response_format: None,
            },
        };

        self.chat(&request).await
    }
}
