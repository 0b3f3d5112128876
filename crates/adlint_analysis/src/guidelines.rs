/// Clause used for any profile key the catalog does not know.
pub const FALLBACK_CLAUSE: &str = "general platform compliance policies";

const DEFAULT_PROFILE: &str = "adsense";

// Static configuration: profile key -> compliance clause embedded in prompts.
const PROFILES: &[(&str, &str)] = &[
    (
        "adsense",
        "Google AdSense program policies (prohibited and dangerous content, \
         misleading claims, landing page quality)",
    ),
    (
        "facebook",
        "Facebook advertising policies (no personal attributes targeting, no \
         sensational or shocking content, no prohibited claims)",
    ),
    (
        "google",
        "Google Ads search advertising policies (editorial standards, \
         misrepresentation, trademark and capitalization rules)",
    ),
    (
        "taboola",
        "native placement policies (clear sponsorship disclosure, no clickbait \
         framing, accurate thumbnails)",
    ),
    (
        "performance",
        "performance and quality heuristics (message clarity, call-to-action \
         strength, relevance to the landing page)",
    ),
];

/// Fixed profile-key to clause table. Lookup is case-insensitive and
/// infallible: unknown keys resolve to [`FALLBACK_CLAUSE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GuidelineCatalog;

impl GuidelineCatalog {
    pub fn resolve(&self, profile_key: Option<&str>) -> &'static str {
        let key = profile_key.unwrap_or(DEFAULT_PROFILE).trim();
        PROFILES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, clause)| *clause)
            .unwrap_or(FALLBACK_CLAUSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_resolves_to_the_adsense_profile() {
        let clause = GuidelineCatalog.resolve(None);
        assert!(clause.contains("AdSense"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(
            GuidelineCatalog.resolve(Some("FaceBook")),
            GuidelineCatalog.resolve(Some("facebook"))
        );
    }

    #[test]
    fn facebook_profile_names_personal_attributes() {
        let clause = GuidelineCatalog.resolve(Some("facebook"));
        assert!(clause.contains("personal attributes"));
        assert!(clause.contains("sensational"));
    }

    #[test]
    fn unknown_keys_fall_back_and_never_fail() {
        assert_eq!(GuidelineCatalog.resolve(Some("xyz")), FALLBACK_CLAUSE);
        assert_eq!(GuidelineCatalog.resolve(Some("")), FALLBACK_CLAUSE);
    }
}
