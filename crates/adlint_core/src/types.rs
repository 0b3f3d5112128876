use serde::{Deserialize, Serialize};

/// Articles are embedded in prompts as a bounded excerpt, never in full.
pub const MAX_EXCERPT_CHARS: usize = 3000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub data: Vec<u8>,
    pub media_type: String,
}

#[derive(Debug, Clone, Default)]
pub struct AdSubmission {
    pub url: String,
    pub headline: String,
    pub description: String,
    pub primary_text: String,
    /// Guideline profile key, e.g. "facebook". None means the generic profile.
    pub source: Option<String>,
    pub keywords: Option<String>,
    pub images: Vec<ImageAttachment>,
}

impl AdSubmission {
    /// At most one image is considered per submission; extras are ignored.
    pub fn image(&self) -> Option<&ImageAttachment> {
        self.images.first()
    }
}

/// Plain article text truncated to [`MAX_EXCERPT_CHARS`] at construction.
/// Truncation happens here exactly once; downstream code embeds it as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleExcerpt(String);

impl ArticleExcerpt {
    pub fn new(body: &str) -> Self {
        Self(body.chars().take(MAX_EXCERPT_CHARS).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Finalized backend call. Immutable after construction.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub prompt: String,
    pub image: Option<ImageAttachment>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt: u32,
    pub completion: u32,
    pub total: u32,
}

/// Raw output of a single backend invocation. Usage and cost are only
/// available from backends that report them.
#[derive(Debug, Clone)]
pub struct ModelReply {
    pub text: String,
    pub usage: Option<TokenUsage>,
    pub cost_usd: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    pub compliant: bool,
    pub relevancy_score: u8,
    pub image_score: u8,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,
    #[serde(rename = "tokens", skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteResult {
    pub headline: String,
    pub description: String,
    pub primary_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_truncates_long_bodies_to_exactly_the_limit() {
        let body = "a".repeat(MAX_EXCERPT_CHARS + 500);
        let excerpt = ArticleExcerpt::new(&body);
        assert_eq!(excerpt.as_str().chars().count(), MAX_EXCERPT_CHARS);
    }

    #[test]
    fn excerpt_keeps_short_bodies_untouched() {
        let excerpt = ArticleExcerpt::new("short article body");
        assert_eq!(excerpt.as_str(), "short article body");
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let body = "é".repeat(MAX_EXCERPT_CHARS + 10);
        let excerpt = ArticleExcerpt::new(&body);
        assert_eq!(excerpt.as_str().chars().count(), MAX_EXCERPT_CHARS);
    }

    #[test]
    fn only_the_first_image_is_used() {
        let submission = AdSubmission {
            images: vec![
                ImageAttachment {
                    data: vec![1],
                    media_type: "image/png".into(),
                },
                ImageAttachment {
                    data: vec![2],
                    media_type: "image/jpeg".into(),
                },
            ],
            ..Default::default()
        };
        assert_eq!(submission.image().unwrap().data, vec![1]);
    }
}
