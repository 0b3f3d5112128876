use adlint_analysis::{AdRewriter, ComplianceAnalyzer};

/// Read-only per-process state: one analyzer per backend, built once at
/// startup. The backend behind each analyzer is an explicit construction
/// choice, never inferred from the request payload.
pub struct AppState {
    pub gemini_analyzer: ComplianceAnalyzer,
    pub gpt_analyzer: ComplianceAnalyzer,
    pub rewriter: AdRewriter,
}
