use adlint_core::{AdSubmission, ArticleExcerpt};

// Key set here must stay in sync with normalize::verdict.
const VERDICT_SCHEMA: &str = r#"{
  "compliant": true/false,
  "relevancy_score": 0-100,
  "image_score": 0-100,
  "issues": ["..."],
  "suggestions": ["..."]
}"#;

// Key set here must stay in sync with normalize::rewrite.
const REWRITE_SCHEMA: &str = r#"{"headline": "...", "description": "...", "primary_text": "..."}"#;

fn ad_block(ad: &AdSubmission) -> String {
    let mut block = format!(
        "Headline: {}\nDescription: {}\nPrimary Text: {}",
        ad.headline, ad.description, ad.primary_text
    );
    if let Some(keywords) = ad.keywords.as_deref().filter(|k| !k.trim().is_empty()) {
        block.push_str("\nKeywords: ");
        block.push_str(keywords);
    }
    block
}

/// Compliance-check prompt: bounded excerpt, labeled ad fields, the selected
/// guideline clause, and the exact JSON shape the normalizer expects.
pub fn compliance_check(excerpt: &ArticleExcerpt, ad: &AdSubmission, clause: &str) -> String {
    format!(
        "You are an expert in ad compliance and ad relevance checking.\n\
         \n\
         Given the article:\n\
         \"\"\"\n\
         {excerpt}\n\
         \"\"\"\n\
         \n\
         And the following ad:\n\
         {ad}\n\
         \n\
         Evaluate the ad against {clause}, covering:\n\
         1. Policy compliance\n\
         2. Relevance to the article\n\
         3. Suggestions for improvement\n\
         4. Image relevance and compliance (if an image is provided)\n\
         \n\
         Respond in this JSON format:\n\
         {schema}\n\
         \n\
         If no image was provided, report \"image_score\": 0. If there are no \
         issues or suggestions, report an empty list.\n\
         Only return the JSON object, with no explanation or markdown.",
        excerpt = excerpt.as_str(),
        ad = ad_block(ad),
        clause = clause,
        schema = VERDICT_SCHEMA,
    )
}

/// Rewrite prompt: same context, but asks for replacement ad copy.
pub fn rewrite(excerpt: &ArticleExcerpt, ad: &AdSubmission) -> String {
    format!(
        "You are an expert ad copywriter and policy reviewer.\n\
         \n\
         Given the article:\n\
         \"\"\"\n\
         {excerpt}\n\
         \"\"\"\n\
         \n\
         And this non-compliant or poorly performing ad:\n\
         {ad}\n\
         \n\
         Rewrite the ad to be:\n\
         - Fully compliant with platform ad policies\n\
         - Relevant to the article\n\
         - Clear and compelling\n\
         \n\
         Return only a pure JSON object.\n\
         DO NOT include markdown, code blocks, or any explanation.\n\
         Only return this format:\n\
         {schema}",
        excerpt = excerpt.as_str(),
        ad = ad_block(ad),
        schema = REWRITE_SCHEMA,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use adlint_core::MAX_EXCERPT_CHARS;

    fn ad() -> AdSubmission {
        AdSubmission {
            url: "https://example.com/story".into(),
            headline: "Big Sale".into(),
            description: "Half off".into(),
            primary_text: "Everything must go".into(),
            ..Default::default()
        }
    }

    #[test]
    fn compliance_prompt_embeds_ad_fields_and_clause() {
        let excerpt = ArticleExcerpt::new("An article about seasonal retail sales.");
        let prompt = compliance_check(&excerpt, &ad(), "general platform compliance policies");
        assert!(prompt.contains("Headline: Big Sale"));
        assert!(prompt.contains("Description: Half off"));
        assert!(prompt.contains("Primary Text: Everything must go"));
        assert!(prompt.contains("general platform compliance policies"));
        assert!(prompt.contains("\"relevancy_score\""));
    }

    #[test]
    fn keywords_line_appears_only_when_present() {
        let excerpt = ArticleExcerpt::new("article");
        let without = compliance_check(&excerpt, &ad(), "c");
        assert!(!without.contains("Keywords:"));

        let mut with_keywords = ad();
        with_keywords.keywords = Some("retail, sale".into());
        let with = compliance_check(&excerpt, &with_keywords, "c");
        assert!(with.contains("Keywords: retail, sale"));
    }

    #[test]
    fn embedded_excerpt_is_already_bounded() {
        let excerpt = ArticleExcerpt::new(&"x".repeat(MAX_EXCERPT_CHARS * 2));
        let prompt = compliance_check(&excerpt, &ad(), "c");
        assert!(prompt.contains(&"x".repeat(MAX_EXCERPT_CHARS)));
        assert!(!prompt.contains(&"x".repeat(MAX_EXCERPT_CHARS + 1)));
    }

    #[test]
    fn rewrite_prompt_asks_for_the_rewrite_shape() {
        let excerpt = ArticleExcerpt::new("article");
        let prompt = rewrite(&excerpt, &ad());
        assert!(prompt.contains("\"headline\""));
        assert!(prompt.contains("\"primary_text\""));
        assert!(!prompt.contains("relevancy_score"));
    }
}
