use std::time::Duration;

use adlint_core::{Error, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

use super::ArticleSource;

const USER_AGENT: &str = concat!("adlint/", env!("CARGO_PKG_VERSION"));

/// Single-attempt HTTP article source. Downloads the page and extracts
/// paragraph text, preferring paragraphs inside an `<article>` element.
pub struct HttpArticleSource {
    client: reqwest::Client,
}

impl HttpArticleSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Config(format!("failed to build article HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ArticleSource for HttpArticleSource {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        Url::parse(url).map_err(|e| Error::Fetch(format!("invalid URL {:?}: {}", url, e)))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("request to {} failed: {}", url, e)))?
            .error_for_status()
            .map_err(|e| Error::Fetch(format!("request to {} failed: {}", url, e)))?;

        let html = response
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("could not read body of {}: {}", url, e)))?;

        extract_body(&html)
            .ok_or_else(|| Error::Fetch(format!("no article text extracted from {}", url)))
    }
}

/// Paragraphs inside `<article>` first, any `<p>` as fallback. Returns None
/// when neither yields non-whitespace text.
fn extract_body(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let article_paragraphs = Selector::parse("article p").unwrap();
    let any_paragraph = Selector::parse("p").unwrap();

    for selector in [&article_paragraphs, &any_paragraph] {
        let paragraphs: Vec<String> = document
            .select(selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if !paragraphs.is_empty() {
            return Some(paragraphs.join("\n\n"));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_paragraphs_inside_article_elements() {
        let html = r#"
            <html><body>
              <p>navigation cruft</p>
              <article><p>First real paragraph.</p><p>Second one.</p></article>
            </body></html>
        "#;
        let body = extract_body(html).unwrap();
        assert_eq!(body, "First real paragraph.\n\nSecond one.");
    }

    #[test]
    fn falls_back_to_bare_paragraphs() {
        let html = "<html><body><p>Only paragraph.</p></body></html>";
        assert_eq!(extract_body(html).unwrap(), "Only paragraph.");
    }

    #[test]
    fn reports_nothing_for_text_free_pages() {
        let html = "<html><body><div>no paragraphs here</div></body></html>";
        assert!(extract_body(html).is_none());
    }
}
