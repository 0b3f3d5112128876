use std::fmt;
use std::time::Duration;

use adlint_core::{AdSubmission, ComplianceVerdict, Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

/// One row per successful analysis, mirroring the audit store's columns.
/// Written at most once and never read back.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub timestamp: String,
    pub source: String,
    pub url: String,
    pub headline: String,
    pub description: String,
    pub primary_text: String,
    pub keywords: String,
    pub image_count: usize,
    pub compliant: bool,
    pub relevancy_score: u8,
    pub image_score: u8,
    pub issues: String,
    pub suggestions: String,
}

impl AuditRecord {
    pub fn new(submission: &AdSubmission, verdict: &ComplianceVerdict) -> Self {
        Self {
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            source: submission.source.clone().unwrap_or_default(),
            url: submission.url.clone(),
            headline: submission.headline.clone(),
            description: submission.description.clone(),
            primary_text: submission.primary_text.clone(),
            keywords: submission.keywords.clone().unwrap_or_default(),
            image_count: submission.images.len(),
            compliant: verdict.compliant,
            relevancy_score: verdict.relevancy_score,
            image_score: verdict.image_score,
            issues: verdict.issues.join(", "),
            suggestions: verdict.suggestions.join(", "),
        }
    }
}

/// Append-only external audit store. Callers treat failures as best-effort:
/// an append error is logged and never surfaced to the analysis result.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn append(&self, record: &AuditRecord) -> Result<()>;
}

/// Posts each record as JSON to a configured endpoint.
pub struct WebhookAuditSink {
    client: reqwest::Client,
    endpoint: String,
}

impl WebhookAuditSink {
    /// A missing endpoint is a constructor-time configuration error; the
    /// caller decides whether that means "auditing disabled".
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| Error::Config("audit webhook URL is not configured".to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build audit HTTP client: {}", e)))?;
        Ok(Self { client, endpoint })
    }
}

impl fmt::Debug for WebhookAuditSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookAuditSink")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[async_trait]
impl AuditSink for WebhookAuditSink {
    async fn append(&self, record: &AuditRecord) -> Result<()> {
        self.client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| Error::Network(format!("audit append failed: {}", e)))?
            .error_for_status()
            .map_err(|e| Error::Network(format!("audit append rejected: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adlint_core::ImageAttachment;

    #[test]
    fn missing_endpoint_is_a_constructor_error() {
        let err = WebhookAuditSink::new(None, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        let err = WebhookAuditSink::new(Some("  ".into()), Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn record_flattens_lists_and_counts_images() {
        let submission = AdSubmission {
            url: "https://example.com/a".into(),
            headline: "H".into(),
            description: "D".into(),
            primary_text: "P".into(),
            source: Some("facebook".into()),
            keywords: Some("k1, k2".into()),
            images: vec![ImageAttachment {
                data: vec![0],
                media_type: "image/png".into(),
            }],
        };
        let verdict = ComplianceVerdict {
            compliant: false,
            relevancy_score: 40,
            image_score: 20,
            issues: vec!["too vague".into(), "unrelated".into()],
            suggestions: vec!["mention the product".into()],
            cost_usd: None,
            usage: None,
        };

        let record = AuditRecord::new(&submission, &verdict);
        assert_eq!(record.source, "facebook");
        assert_eq!(record.image_count, 1);
        assert_eq!(record.issues, "too vague, unrelated");
        assert_eq!(record.suggestions, "mention the product");
        assert!(!record.timestamp.is_empty());
    }
}
