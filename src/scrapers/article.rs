//! Article body extraction.
//!
//! Given a parsed article page, this module decides whether the page is
//! usable and, if so, pulls out a title and an ordered list of
//! [`ContentElement`]s. Nothing here fails: a page without the expected
//! structure is an ordinary outcome and comes back as
//! [`Extraction::Skipped`] with a reason.
//!
//! # Lookup order
//!
//! - **Title**: first `<h1>`, else `<title>`, else first `<h2>`
//! - **Content root**: `<article>`, else the first `<div>` with a class token
//!   containing `article`, `content`, `news` or `body`, else `<main>`, else the
//!   whole document
//!
//! Inside the root, `<h2>`, `<h3>`, `<p>` and `<blockquote>` elements are kept
//! in document order once their normalized text clears the length threshold.

use crate::config::LanguagePolicy;
use crate::models::{ContentElement, HeadingLevel};
use crate::text::{normalize_for_body, TextMode};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use tracing::{debug, info, instrument};

pub const NO_TITLE: &str = "No Title";

/// Fewest qualifying elements a page needs to be worth saving.
pub const MIN_ELEMENTS: usize = 2;

const CONTAINER_CLASS_KEYWORDS: &[&str] = &["article", "content", "news", "body"];

static SEL_H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static SEL_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static SEL_H2: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static SEL_ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
static SEL_CLASSED_DIV: Lazy<Selector> = Lazy::new(|| Selector::parse("div[class]").unwrap());
static SEL_MAIN: Lazy<Selector> = Lazy::new(|| Selector::parse("main").unwrap());
static SEL_CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2, h3, p, blockquote").unwrap());

/// Why a fetched page produced no article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The root element declares a language other than English.
    NonEnglish { lang: String },
    /// No `lang` attribute, and the run rejects undeclared pages.
    UndeclaredLanguage,
    /// Fewer than [`MIN_ELEMENTS`] elements survived the length thresholds.
    InsufficientContent { found: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NonEnglish { lang } => write!(f, "non-English page (lang={lang})"),
            SkipReason::UndeclaredLanguage => write!(f, "page declares no language"),
            SkipReason::InsufficientContent { found } => {
                write!(f, "insufficient content: {found} elements found")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Usable {
        title: String,
        elements: Vec<ContentElement>,
    },
    Skipped {
        title: String,
        reason: SkipReason,
    },
}

impl Extraction {
    pub fn title(&self) -> &str {
        match self {
            Extraction::Usable { title, .. } | Extraction::Skipped { title, .. } => title,
        }
    }

    /// Extracted elements; empty for a skipped page.
    pub fn elements(&self) -> &[ContentElement] {
        match self {
            Extraction::Usable { elements, .. } => elements,
            Extraction::Skipped { .. } => &[],
        }
    }
}

/// Lower-cased `lang` attribute of the root element, if present and non-empty.
pub fn declared_language(document: &Html) -> Option<String> {
    document
        .root_element()
        .value()
        .attr("lang")
        .map(|lang| lang.trim().to_lowercase())
        .filter(|lang| !lang.is_empty())
}

fn language_gate(document: &Html, policy: LanguagePolicy) -> Option<SkipReason> {
    match declared_language(document) {
        Some(lang) if lang.starts_with("en") => None,
        Some(lang) => Some(SkipReason::NonEnglish { lang }),
        None => match policy {
            LanguagePolicy::AcceptUndeclared => None,
            LanguagePolicy::RejectUndeclared => Some(SkipReason::UndeclaredLanguage),
        },
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

type Lookup = for<'a> fn(&'a Html) -> Option<ElementRef<'a>>;

fn first_h1(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&SEL_H1).next()
}

fn title_tag(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&SEL_TITLE).next()
}

fn first_h2(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&SEL_H2).next()
}

fn article_tag(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&SEL_ARTICLE).next()
}

fn content_classed_div(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&SEL_CLASSED_DIV).find(|div| {
        div.value().classes().any(|class| {
            let class = class.to_lowercase();
            CONTAINER_CLASS_KEYWORDS.iter().any(|k| class.contains(k))
        })
    })
}

fn main_tag(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&SEL_MAIN).next()
}

const TITLE_LOOKUPS: &[Lookup] = &[first_h1, title_tag, first_h2];
const CONTENT_ROOT_LOOKUPS: &[Lookup] = &[article_tag, content_classed_div, main_tag];

fn first_found<'a>(document: &'a Html, lookups: &[Lookup]) -> Option<ElementRef<'a>> {
    lookups.iter().find_map(|lookup| lookup(document))
}

/// Page title for display, or [`NO_TITLE`] when nothing usable is found.
pub fn extract_title(document: &Html) -> String {
    first_found(document, TITLE_LOOKUPS)
        .map(|el| normalize_for_body(&element_text(el), TextMode::Title))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

/// Container the article body is read from, falling back to the whole document.
pub fn content_root(document: &Html) -> ElementRef<'_> {
    first_found(document, CONTENT_ROOT_LOOKUPS).unwrap_or_else(|| document.root_element())
}

/// Walk `root` in document order and keep every element that clears its length threshold.
pub fn collect_elements(root: ElementRef<'_>) -> Vec<ContentElement> {
    root.select(&SEL_CONTENT)
        .filter_map(|el| {
            let raw = element_text(el);
            match el.value().name() {
                name @ ("h2" | "h3") => {
                    let text = normalize_for_body(&raw, TextMode::Title);
                    let level = if name == "h2" {
                        HeadingLevel::H2
                    } else {
                        HeadingLevel::H3
                    };
                    (text.len() > ContentElement::HEADING_MIN_LEN)
                        .then_some(ContentElement::Heading { level, text })
                }
                "p" => {
                    let text = normalize_for_body(&raw, TextMode::Body);
                    (text.len() > ContentElement::BODY_MIN_LEN)
                        .then_some(ContentElement::Paragraph { text })
                }
                "blockquote" => {
                    let text = normalize_for_body(&raw, TextMode::Body);
                    (text.len() > ContentElement::BODY_MIN_LEN)
                        .then_some(ContentElement::Quote { text })
                }
                _ => None,
            }
        })
        .collect()
}

/// Extract a usable article from a parsed page, or say why the page was skipped.
///
/// `url` and `source` are only used for log context.
#[instrument(level = "info", skip(document, policy))]
pub fn extract_article(
    document: &Html,
    url: &str,
    source: &str,
    policy: LanguagePolicy,
) -> Extraction {
    if let Some(reason) = language_gate(document, policy) {
        debug!(%reason, "Language gate rejected page");
        return Extraction::Skipped {
            title: NO_TITLE.to_string(),
            reason,
        };
    }

    let title = extract_title(document);
    let root = content_root(document);
    debug!(root = root.value().name(), "Selected content root");

    let elements = collect_elements(root);
    if elements.len() < MIN_ELEMENTS {
        return Extraction::Skipped {
            title,
            reason: SkipReason::InsufficientContent {
                found: elements.len(),
            },
        };
    }

    info!(%title, elements = elements.len(), "Scraped article");
    Extraction::Usable { title, elements }
}
