use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/analyze_with_gemini", post(handlers::analyze_with_gemini))
        .route("/analyze_with_gpt", post(handlers::analyze_with_gpt))
        .route("/rewrite_ad_with_gpt", post(handlers::rewrite_ad_with_gpt))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::{create_app, ApiError, AppState};
    pub use adlint_core::{AdSubmission, ComplianceVerdict, Result, RewriteResult};
}
