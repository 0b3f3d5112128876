use std::sync::Arc;

use adlint_core::{ArticleExcerpt, Result};
use async_trait::async_trait;

pub mod http;

pub use http::HttpArticleSource;

/// URL -> plain body text. Implementations fail with [`adlint_core::Error::Fetch`]
/// for every sub-cause (bad URL, transport, empty extraction); callers only
/// branch on the category.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Fetches an article and bounds it to the fixed excerpt length. The
/// truncation in [`ArticleExcerpt::new`] is the only one in the pipeline.
#[derive(Clone)]
pub struct ExcerptProvider {
    source: Arc<dyn ArticleSource>,
}

impl ExcerptProvider {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        Self { source }
    }

    pub async fn fetch(&self, url: &str) -> Result<ArticleExcerpt> {
        let text = self.source.fetch_text(url).await?;
        tracing::debug!(url, chars = text.chars().count(), "article text extracted");
        Ok(ArticleExcerpt::new(&text))
    }
}

pub mod prelude {
    pub use super::{ArticleSource, ExcerptProvider, HttpArticleSource};
    pub use adlint_core::{ArticleExcerpt, Error, Result};
}
