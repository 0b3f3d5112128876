use std::fmt;

use adlint_core::{Error, ImageAttachment, ModelReply, ModelRequest, Result, TokenUsage};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::{classify_status, transport_error, ModelBackend};
use crate::{BackendConfig, PricingTable};

const DEFAULT_TEXT_MODEL: &str = "gpt-4";
const DEFAULT_VISION_MODEL: &str = "gpt-4o";
const BASE_URL: &str = "https://api.openai.com/v1";
const SYSTEM_PROMPT: &str = "You are a helpful assistant that reviews advertising copy.";

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<UsagePayload>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct UsagePayload {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: Option<u32>,
}

/// Chat-style variant. Text goes to the text model; when an image is
/// attached the call switches to the vision model and the image rides as an
/// extra user turn with a data URL. Usage counts are reported when present
/// and priced via the configured [`PricingTable`].
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: String,
    text_model: String,
    vision_model: String,
    pricing: PricingTable,
    base_url: String,
}

impl OpenAiBackend {
    pub fn new(config: BackendConfig, pricing: PricingTable) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::Config("OpenAI API key is required".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build OpenAI HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key: config.api_key,
            text_model: config.model.unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            pricing,
            base_url: BASE_URL.to_string(),
        })
    }

    fn build_chat(&self, request: &ModelRequest) -> ChatRequest {
        let mut messages = vec![
            ChatMessage {
                role: "system",
                content: MessageContent::Text(SYSTEM_PROMPT.to_string()),
            },
            ChatMessage {
                role: "user",
                content: MessageContent::Text(request.prompt.clone()),
            },
        ];

        let model = match &request.image {
            Some(image) => {
                messages.push(ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: data_url(image),
                        },
                    }]),
                });
                self.vision_model.clone()
            }
            None => self.text_model.clone(),
        };

        ChatRequest {
            model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

fn data_url(image: &ImageAttachment) -> String {
    format!("data:{};base64,{}", image.media_type, BASE64.encode(&image.data))
}

impl fmt::Debug for OpenAiBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiBackend")
            .field("api_key", &"<redacted>")
            .field("text_model", &self.text_model)
            .field("vision_model", &self.vision_model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl ModelBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    async fn invoke(&self, request: &ModelRequest) -> Result<ModelReply> {
        let payload = self.build_chat(request);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error("openai", e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(classify_status("openai", status, &detail));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Network(format!("openai returned an unreadable body: {}", e)))?;

        let usage = body.usage.map(|u| TokenUsage {
            prompt: u.prompt_tokens,
            completion: u.completion_tokens,
            total: u
                .total_tokens
                .unwrap_or(u.prompt_tokens + u.completion_tokens),
        });
        let cost_usd = usage.as_ref().map(|u| self.pricing.cost(u));

        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::EmptyReply("openai response had no message content".to_string()))?;

        tracing::debug!(model = %payload.model, chars = text.len(), "openai reply received");

        Ok(ModelReply {
            text: text.trim().to_string(),
            usage,
            cost_usd,
        })
    }
}
