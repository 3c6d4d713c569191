//! Link classification for listing pages.
//!
//! Listing pages mix article links with navigation, account pages, ads and
//! section indexes, and the markup rarely tells them apart. Classification is
//! therefore done on the URL alone:
//!
//! 1. resolve against the listing URL, keep only same-site `http(s)` links
//! 2. drop anything containing a [`BLOCKLIST`] fragment
//! 3. apply the source's [`LinkRule`] (first matching table row, else the default)
//! 4. dedupe and cap
//!
//! # Rule table
//!
//! | Source | Accepts when |
//! |--------|--------------|
//! | BBC Health | `health-` and at least 4 `/` |
//! | WebMD | `/news/` and at least 5 `/` |
//! | The Guardian Health | `/article/` or `/202` |
//! | anything else | `article`, `news/`, `story` or `202` |
//!
//! All substring checks are case-insensitive.

use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};
use url::Url;

/// Fragments that mark a link as chrome rather than an article.
pub const BLOCKLIST: &[&str] = &[
    "login",
    "signup",
    "advert",
    "privacy",
    "archive",
    "category",
    "tag",
    "account",
    "settings",
    "subscribe",
    "newsletter",
    "visa",
    "insurance",
    "podcast",
    "parsi",
    "video",
    "gallery",
    "comment",
    "default.htm",
    "page=",
    "index",
];

static SEL_ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

const DEFAULT_INDICATORS: &[&str] = &["article", "news/", "story", "202"];

/// How many rejected links are carried along for diagnostics.
pub const REJECTED_SAMPLE: usize = 5;

/// Per-source allow rule applied after the shared filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRule {
    BbcHealth,
    WebMd,
    GuardianHealth,
    Default,
}

/// Source-specific overrides, keyed by source name.
const RULES: &[(&str, LinkRule)] = &[
    ("BBC Health", LinkRule::BbcHealth),
    ("WebMD", LinkRule::WebMd),
    ("The Guardian Health", LinkRule::GuardianHealth),
];

impl LinkRule {
    pub fn for_source(name: &str) -> Self {
        RULES
            .iter()
            .find(|(source, _)| *source == name)
            .map(|(_, rule)| *rule)
            .unwrap_or(LinkRule::Default)
    }

    /// Whether an absolute, already-filtered URL looks like an article under this rule.
    pub fn allows(self, url: &str) -> bool {
        let lower = url.to_lowercase();
        let slashes = url.matches('/').count();
        match self {
            LinkRule::BbcHealth => lower.contains("health-") && slashes >= 4,
            LinkRule::WebMd => lower.contains("/news/") && slashes >= 5,
            LinkRule::GuardianHealth => lower.contains("/article/") || lower.contains("/202"),
            LinkRule::Default => DEFAULT_INDICATORS.iter().any(|i| lower.contains(i)),
        }
    }
}

/// Outcome of classifying one listing page.
#[derive(Debug, Default)]
pub struct ClassifiedLinks {
    /// Deduplicated candidate article URLs, at most the requested cap.
    pub candidates: Vec<String>,
    /// Same-site, non-blocklisted links the source rule turned down, up to [`REJECTED_SAMPLE`].
    pub rejected: Vec<String>,
}

/// Collect every `href` on a page, unresolved, in document order.
pub fn harvest_hrefs(document: &Html) -> Vec<String> {
    document
        .select(&SEL_ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

fn is_blocklisted(url: &str) -> bool {
    let lower = url.to_lowercase();
    BLOCKLIST.iter().any(|fragment| lower.contains(fragment))
}

/// Resolve `href` and keep it only if it is a same-site `http(s)` link free of blocklisted fragments.
///
/// The `#fragment` is dropped so in-page anchors dedupe with their page.
fn resolve_same_site(base: &Url, host: &str, href: &str) -> Option<String> {
    let mut resolved = base.join(href.trim()).ok()?;
    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }
    if !resolved.host_str().is_some_and(|h| h.contains(host)) {
        return None;
    }
    resolved.set_fragment(None);
    let url = resolved.to_string();
    (!is_blocklisted(&url)).then_some(url)
}

/// Decide which of a listing page's links are candidate articles for `source_name`.
///
/// # Errors
///
/// Fails only when `listing_url` itself cannot be parsed or has no host.
#[instrument(level = "debug", skip(hrefs))]
pub fn classify_links<I, S>(
    hrefs: I,
    listing_url: &str,
    source_name: &str,
    max_articles: usize,
) -> Result<ClassifiedLinks, url::ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let base = Url::parse(listing_url)?;
    let host = base.host_str().ok_or(url::ParseError::EmptyHost)?;
    let rule = LinkRule::for_source(source_name);

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for href in hrefs {
        let Some(url) = resolve_same_site(&base, host, href.as_ref()) else {
            continue;
        };
        if rule.allows(&url) {
            accepted.push(url);
        } else {
            rejected.push(url);
        }
    }

    let total_accepted = accepted.len();
    let candidates: Vec<String> = accepted.into_iter().unique().take(max_articles).collect();
    debug!(
        ?rule,
        accepted = total_accepted,
        rejected = rejected.len(),
        kept = candidates.len(),
        "Classified listing links"
    );
    rejected.truncate(REJECTED_SAMPLE);

    Ok(ClassifiedLinks {
        candidates,
        rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(hrefs: &[&str], listing: &str, source: &str, max: usize) -> ClassifiedLinks {
        classify_links(hrefs.iter().copied(), listing, source, max).unwrap()
    }

    #[test]
    fn test_rule_lookup() {
        assert_eq!(LinkRule::for_source("BBC Health"), LinkRule::BbcHealth);
        assert_eq!(LinkRule::for_source("WebMD"), LinkRule::WebMd);
        assert_eq!(LinkRule::for_source("The Guardian Health"), LinkRule::GuardianHealth);
        assert_eq!(LinkRule::for_source("Healthline"), LinkRule::Default);
        assert_eq!(LinkRule::for_source("bbc health"), LinkRule::Default);
    }

    #[test]
    fn test_default_rule_scenario_three_of_ten() {
        let listing = "https://www.example.com/health";
        let hrefs = [
            "/news/heart-study",
            "https://www.example.com/story/sleep-and-mood",
            "/2025/10/flu-season-starts",
            "/login",
            "/privacy-policy",
            "/category/nutrition",
            "/subscribe",
            "/video/workouts",
            "/newsletter",
            "/health/index.html",
        ];
        let out = classify(&hrefs, listing, "Healthline", 10);
        assert_eq!(out.candidates.len(), 3);
        assert!(out.candidates.contains(&"https://www.example.com/news/heart-study".to_string()));
        assert!(out.rejected.is_empty());

        let capped = classify(&hrefs, listing, "Healthline", 2);
        assert_eq!(capped.candidates.len(), 2);
    }

    #[test]
    fn test_off_site_and_non_http_links_dropped() {
        let out = classify(
            &[
                "https://other.example.org/news/article-1",
                "mailto:news@example.com",
                "javascript:void(0)",
                "ftp://www.example.com/news/article-2",
                "https://www.example.com/news/article-3",
            ],
            "https://www.example.com/health",
            "Healthline",
            10,
        );
        assert_eq!(out.candidates, vec!["https://www.example.com/news/article-3"]);
    }

    #[test]
    fn test_blocklist_is_case_insensitive() {
        let out = classify(
            &["/news/LOGIN-help", "/Article/Comment-section", "/news/ok-story"],
            "https://www.example.com/",
            "Healthline",
            10,
        );
        assert_eq!(out.candidates, vec!["https://www.example.com/news/ok-story"]);
    }

    #[test]
    fn test_classified_links_never_blocklisted_or_off_site() {
        let hrefs = [
            "/news/a-story",
            "/news/tagged-story",
            "/article/archive-1",
            "https://cdn.example.net/news/story",
            "/2024/01/02/story",
            "?page=2",
        ];
        let out = classify(&hrefs, "https://www.example.com/news", "Healthline", 100);
        for url in &out.candidates {
            let parsed = Url::parse(url).unwrap();
            assert!(parsed.host_str().unwrap().contains("www.example.com"));
            assert!(!is_blocklisted(url), "{url} is blocklisted");
        }
        assert_eq!(out.candidates.len(), 2);
    }

    #[test]
    fn test_bbc_requires_health_dash() {
        let out = classify(
            &[
                "/news/world-us-canada-12345678",
                "/news/uk/politics/very/deep/path/12345",
                "/news/health-68412345",
                "/health-1",
            ],
            "https://www.bbc.com/news/health",
            "BBC Health",
            10,
        );
        assert_eq!(out.candidates, vec!["https://www.bbc.com/news/health-68412345"]);
        assert_eq!(out.rejected.len(), 3);
    }

    #[test]
    fn test_bbc_rule_direct() {
        assert!(!LinkRule::BbcHealth.allows("https://www.bbc.com/a/b/c/d/e/f/g"));
        assert!(!LinkRule::BbcHealth.allows("https://health-x.com"));
        assert!(LinkRule::BbcHealth.allows("https://www.bbc.com/news/HEALTH-1"));
    }

    #[test]
    fn test_webmd_rule() {
        assert!(LinkRule::WebMd.allows("https://www.webmd.com/news/20251019/new-study"));
        assert!(!LinkRule::WebMd.allows("https://www.webmd.com/news/new-study"));
        assert!(!LinkRule::WebMd.allows("https://www.webmd.com/a/b/c/d/e"));
    }

    #[test]
    fn test_guardian_rule() {
        assert!(LinkRule::GuardianHealth.allows(
            "https://www.theguardian.com/society/2025/oct/19/nhs-waiting-lists"
        ));
        assert!(LinkRule::GuardianHealth.allows("https://www.theguardian.com/Article/x"));
        assert!(!LinkRule::GuardianHealth.allows("https://www.theguardian.com/society/health"));
    }

    #[test]
    fn test_duplicates_removed_before_cap() {
        let out = classify(
            &["/news/one", "/news/one", "https://www.example.com/news/one", "/news/two"],
            "https://www.example.com/",
            "Healthline",
            2,
        );
        assert_eq!(
            out.candidates,
            vec![
                "https://www.example.com/news/one",
                "https://www.example.com/news/two"
            ]
        );
    }

    #[test]
    fn test_fragments_dedupe_with_their_page() {
        let out = classify(
            &["/news/one#top", "/news/one", "/news/one#comments-block", "/news/two#"],
            "https://www.example.com/",
            "Healthline",
            2,
        );
        assert_eq!(
            out.candidates,
            vec![
                "https://www.example.com/news/one",
                "https://www.example.com/news/two"
            ]
        );
    }

    #[test]
    fn test_rejected_sample_capped() {
        let hrefs: Vec<String> = (0..20).map(|i| format!("/health/item-{i}")).collect();
        let out = classify_links(&hrefs, "https://www.example.com/", "Healthline", 5).unwrap();
        assert!(out.candidates.is_empty());
        assert_eq!(out.rejected.len(), REJECTED_SAMPLE);
        assert_eq!(out.rejected[0], "https://www.example.com/health/item-0");
    }

    #[test]
    fn test_bad_listing_url() {
        assert!(classify_links(["/news/x"], "not a url", "Healthline", 1).is_err());
    }

    #[test]
    fn test_harvest_hrefs() {
        let html = Html::parse_document(
            r#"<html><body><a href="/a">A</a><a>no href</a><nav><a href="https://x.test/b">B</a></nav></body></html>"#,
        );
        assert_eq!(harvest_hrefs(&html), vec!["/a", "https://x.test/b"]);
    }
}
