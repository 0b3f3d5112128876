use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use adlint_analysis::{AdRewriter, AuditSink, ComplianceAnalyzer, WebhookAuditSink};
use adlint_article::{ExcerptProvider, HttpArticleSource};
use adlint_inference::{BackendConfig, GeminiBackend, OpenAiBackend, PricingTable};
use adlint_web::{create_app, AppState};
use clap::Parser;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "adlint", about = "Ad compliance and relevance analysis service")]
struct Args {
    /// Address to serve the HTTP API on
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: SocketAddr,

    /// Override the Gemini model identifier
    #[arg(long)]
    gemini_model: Option<String>,

    /// Override the OpenAI text model identifier
    #[arg(long)]
    openai_model: Option<String>,

    /// Article fetch timeout in seconds
    #[arg(long, default_value_t = 15)]
    fetch_timeout: u64,

    /// Backend invocation timeout in seconds
    #[arg(long, default_value_t = 60)]
    backend_timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
    let args = Args::parse();

    let source = HttpArticleSource::new(Duration::from_secs(args.fetch_timeout))?;
    let excerpts = ExcerptProvider::new(Arc::new(source));

    let backend_timeout = Duration::from_secs(args.backend_timeout);

    let mut gemini_config = BackendConfig::new(std::env::var("GEMINI_API_KEY").unwrap_or_default())
        .with_timeout(backend_timeout);
    if let Some(model) = args.gemini_model {
        gemini_config = gemini_config.with_model(model);
    }
    let gemini = Arc::new(GeminiBackend::new(gemini_config)?);

    let mut openai_config = BackendConfig::new(std::env::var("OPENAI_API_KEY").unwrap_or_default())
        .with_timeout(backend_timeout);
    if let Some(model) = args.openai_model {
        openai_config = openai_config.with_model(model);
    }
    let openai = Arc::new(OpenAiBackend::new(openai_config, PricingTable::default())?);

    // A missing webhook URL means auditing is disabled, not a startup failure.
    let audit: Option<Arc<dyn AuditSink>> =
        match WebhookAuditSink::new(std::env::var("AUDIT_WEBHOOK_URL").ok(), Duration::from_secs(10)) {
            Ok(sink) => Some(Arc::new(sink)),
            Err(err) => {
                tracing::warn!(error = %err, "audit logging disabled");
                None
            }
        };

    let mut gemini_analyzer = ComplianceAnalyzer::new(excerpts.clone(), gemini);
    let mut gpt_analyzer = ComplianceAnalyzer::new(excerpts.clone(), openai.clone());
    if let Some(sink) = &audit {
        gemini_analyzer = gemini_analyzer.with_audit(Arc::clone(sink));
        gpt_analyzer = gpt_analyzer.with_audit(Arc::clone(sink));
    }
    let rewriter = AdRewriter::new(excerpts, openai);

    let app = create_app(AppState {
        gemini_analyzer,
        gpt_analyzer,
        rewriter,
    });

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    tracing::info!(addr = %args.listen, "adlint listening");
    axum::serve(listener, app).await?;
    Ok(())
}
