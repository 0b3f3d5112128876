use std::sync::Arc;

use adlint_article::ExcerptProvider;
use adlint_core::{AdSubmission, ComplianceVerdict, Error, ModelRequest, Result, RewriteResult};
use adlint_inference::ModelBackend;

use crate::audit::{AuditRecord, AuditSink};
use crate::guidelines::GuidelineCatalog;
use crate::{normalize, prompt};

const ANALYZE_MAX_TOKENS: u32 = 1000;
const ANALYZE_TEMPERATURE: f32 = 0.4;

const REWRITE_MAX_TOKENS: u32 = 600;
const REWRITE_TEMPERATURE: f32 = 0.7;

fn log_parse_failure(err: &Error) {
    if let Error::Parse { raw, message } = err {
        tracing::debug!(%message, raw, "backend reply failed normalization");
    }
}

/// Drives fetch -> prompt -> invoke -> normalize for one submission. Every
/// stage is a single attempt: the first failure short-circuits the request
/// and its category reaches the caller unchanged.
pub struct ComplianceAnalyzer {
    excerpts: ExcerptProvider,
    catalog: GuidelineCatalog,
    backend: Arc<dyn ModelBackend>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl ComplianceAnalyzer {
    pub fn new(excerpts: ExcerptProvider, backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            excerpts,
            catalog: GuidelineCatalog,
            backend,
            audit: None,
        }
    }

    pub fn with_audit(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    pub async fn analyze(&self, submission: &AdSubmission) -> Result<ComplianceVerdict> {
        let excerpt = self.excerpts.fetch(&submission.url).await?;

        let clause = self.catalog.resolve(submission.source.as_deref());
        let request = ModelRequest {
            prompt: prompt::compliance_check(&excerpt, submission, clause),
            image: submission.image().cloned(),
            max_tokens: ANALYZE_MAX_TOKENS,
            temperature: ANALYZE_TEMPERATURE,
        };

        let reply = self.backend.invoke(&request).await?;

        let mut verdict = normalize::verdict(&reply.text).inspect_err(log_parse_failure)?;
        verdict.cost_usd = reply.cost_usd;
        verdict.usage = reply.usage;

        tracing::info!(
            backend = self.backend.name(),
            url = %submission.url,
            compliant = verdict.compliant,
            relevancy_score = verdict.relevancy_score,
            "compliance analysis complete"
        );

        // Fire-and-forget: the caller's verdict never waits on, or fails
        // because of, the audit store.
        if let Some(sink) = &self.audit {
            let sink = Arc::clone(sink);
            let record = AuditRecord::new(submission, &verdict);
            tokio::spawn(async move {
                if let Err(err) = sink.append(&record).await {
                    tracing::warn!(error = %err, "audit append failed");
                }
            });
        }

        Ok(verdict)
    }
}

/// Same pipeline skeleton as [`ComplianceAnalyzer`] with a rewrite prompt
/// and a rewrite payload. Rewrites are not audited.
pub struct AdRewriter {
    excerpts: ExcerptProvider,
    backend: Arc<dyn ModelBackend>,
}

impl AdRewriter {
    pub fn new(excerpts: ExcerptProvider, backend: Arc<dyn ModelBackend>) -> Self {
        Self { excerpts, backend }
    }

    pub async fn rewrite(&self, submission: &AdSubmission) -> Result<RewriteResult> {
        let excerpt = self.excerpts.fetch(&submission.url).await?;

        let request = ModelRequest {
            prompt: prompt::rewrite(&excerpt, submission),
            image: None,
            max_tokens: REWRITE_MAX_TOKENS,
            temperature: REWRITE_TEMPERATURE,
        };

        let reply = self.backend.invoke(&request).await?;
        let result = normalize::rewrite(&reply.text).inspect_err(log_parse_failure)?;

        tracing::info!(
            backend = self.backend.name(),
            url = %submission.url,
            "ad rewrite complete"
        );

        Ok(result)
    }
}
