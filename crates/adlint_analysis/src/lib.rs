pub mod analyzer;
pub mod audit;
pub mod guidelines;
pub mod normalize;
pub mod prompt;

pub use analyzer::{AdRewriter, ComplianceAnalyzer};
pub use audit::{AuditRecord, AuditSink, WebhookAuditSink};
pub use guidelines::GuidelineCatalog;

pub mod prelude {
    pub use crate::analyzer::{AdRewriter, ComplianceAnalyzer};
    pub use crate::audit::{AuditRecord, AuditSink, WebhookAuditSink};
    pub use crate::guidelines::GuidelineCatalog;
    pub use adlint_core::{AdSubmission, ComplianceVerdict, Error, Result, RewriteResult};
}
