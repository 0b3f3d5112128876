use std::sync::Arc;

use adlint_core::{AdSubmission, ComplianceVerdict, ImageAttachment, RewriteResult};
use axum::extract::{Multipart, State};
use axum::Json;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_IMAGE_MEDIA_TYPE: &str = "image/jpeg";

/// Reads the multipart form into an [`AdSubmission`]. Extra `images` fields
/// beyond the first are ignored, not rejected.
async fn read_submission(mut multipart: Multipart) -> Result<AdSubmission, ApiError> {
    let mut submission = AdSubmission::default();
    let mut saw_url = false;
    let mut saw_headline = false;
    let mut saw_description = false;
    let mut saw_primary_text = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart form: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "url" => {
                submission.url = read_text(field, &name).await?;
                saw_url = true;
            }
            "headline" => {
                submission.headline = read_text(field, &name).await?;
                saw_headline = true;
            }
            "description" => {
                submission.description = read_text(field, &name).await?;
                saw_description = true;
            }
            "primary_text" => {
                submission.primary_text = read_text(field, &name).await?;
                saw_primary_text = true;
            }
            "source" => submission.source = Some(read_text(field, &name).await?),
            "keywords" => submission.keywords = Some(read_text(field, &name).await?),
            "images" => {
                let media_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_IMAGE_MEDIA_TYPE)
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("unreadable image upload: {}", e)))?
                    .to_vec();
                if submission.images.is_empty() {
                    submission.images.push(ImageAttachment { data, media_type });
                } else {
                    tracing::debug!("ignoring extra image upload");
                }
            }
            other => {
                tracing::debug!(field = other, "ignoring unknown form field");
            }
        }
    }

    for (present, name) in [
        (saw_url, "url"),
        (saw_headline, "headline"),
        (saw_description, "description"),
        (saw_primary_text, "primary_text"),
    ] {
        if !present {
            return Err(ApiError::bad_request(format!("missing form field {:?}", name)));
        }
    }

    Ok(submission)
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("unreadable form field {:?}: {}", name, e)))
}

pub async fn analyze_with_gemini(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ComplianceVerdict>, ApiError> {
    let submission = read_submission(multipart).await?;
    let verdict = state.gemini_analyzer.analyze(&submission).await?;
    Ok(Json(verdict))
}

pub async fn analyze_with_gpt(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ComplianceVerdict>, ApiError> {
    let submission = read_submission(multipart).await?;
    let verdict = state.gpt_analyzer.analyze(&submission).await?;
    Ok(Json(verdict))
}

pub async fn rewrite_ad_with_gpt(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<RewriteResult>, ApiError> {
    let submission = read_submission(multipart).await?;
    let result = state.rewriter.rewrite(&submission).await?;
    Ok(Json(result))
}
