use std::fmt;

use adlint_core::{Error, ImageAttachment, ModelReply, ModelRequest, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::{classify_status, transport_error, ModelBackend};
use crate::BackendConfig;

const DEFAULT_MODEL: &str = "gemini-1.5-pro-002";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Multimodal single-call variant: prompt and optional inline image go out
/// in one generateContent request. Gemini reports no usage metadata here.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(config: BackendConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::Config("Gemini API key is required".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build Gemini HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key: config.api_key,
            model: config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: BASE_URL.to_string(),
        })
    }

    fn build_parts(request: &ModelRequest) -> Vec<Part> {
        let mut parts = vec![Part::Text {
            text: request.prompt.clone(),
        }];
        if let Some(image) = &request.image {
            parts.push(inline_image(image));
        }
        parts
    }
}

fn inline_image(image: &ImageAttachment) -> Part {
    Part::InlineData {
        inline_data: InlineData {
            mime_type: image.media_type.clone(),
            data: BASE64.encode(&image.data),
        },
    }
}

impl fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn invoke(&self, request: &ModelRequest) -> Result<ModelReply> {
        let payload = GenerateRequest {
            contents: vec![Content {
                parts: Self::build_parts(request),
            }],
        };

        // The key travels in the query string; keep the URL out of logs.
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error("gemini", e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(classify_status("gemini", status, &detail));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Network(format!("gemini returned an unreadable body: {}", e)))?;

        let text = body
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
            .ok_or_else(|| Error::EmptyReply("gemini response had no text candidate".to_string()))?;

        tracing::debug!(model = %self.model, chars = text.len(), "gemini reply received");

        Ok(ModelReply {
            text: text.trim().to_string(),
            usage: None,
            cost_usd: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(image: Option<ImageAttachment>) -> ModelRequest {
        ModelRequest {
            prompt: "evaluate this ad".to_string(),
            image,
            max_tokens: 1000,
            temperature: 0.4,
        }
    }

    #[test]
    fn rejects_missing_api_key() {
        let result = GeminiBackend::new(BackendConfig::new(""));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn text_only_requests_carry_a_single_part() {
        let parts = GeminiBackend::build_parts(&request(None));
        assert_eq!(parts.len(), 1);
        assert!(matches!(&parts[0], Part::Text { text } if text == "evaluate this ad"));
    }

    #[test]
    fn image_requests_inline_the_payload() {
        let image = ImageAttachment {
            data: b"fakepng".to_vec(),
            media_type: "image/png".to_string(),
        };
        let parts = GeminiBackend::build_parts(&request(Some(image)));
        assert_eq!(parts.len(), 2);

        let serialized = serde_json::to_value(&parts[1]).unwrap();
        assert_eq!(serialized["inlineData"]["mimeType"], "image/png");
        assert_eq!(serialized["inlineData"]["data"], BASE64.encode(b"fakepng"));
    }

    #[test]
    fn empty_candidate_list_deserializes() {
        let body: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(body.candidates.is_empty());
    }
}
