//! Data models for sources, extracted articles and the per-run summary.
//!
//! - [`Source`]: a configured outlet and its listing page
//! - [`ContentElement`]: one heading, paragraph or quote pulled from an article body
//! - [`Article`]: a successfully extracted page, written to exactly one file
//! - [`RunResult`]: everything one invocation produced, surfaced as a summary

use serde::Serialize;
use std::path::PathBuf;

/// A news outlet and the listing page its article links are harvested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    /// Unique, human-readable name. Also selects the link rule and prefixes file names.
    pub name: &'static str,
    /// Index page listing the outlet's recent articles.
    pub listing_url: &'static str,
}

/// Heading depth kept from an article body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H2,
    H3,
}

/// One normalized unit of article content, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentElement {
    Heading { level: HeadingLevel, text: String },
    Paragraph { text: String },
    Quote { text: String },
}

impl ContentElement {
    /// Minimum normalized length (exclusive) for a heading to be kept.
    pub const HEADING_MIN_LEN: usize = 10;
    /// Minimum normalized length (exclusive) for a paragraph or quote to be kept.
    pub const BODY_MIN_LEN: usize = 20;

    pub fn text(&self) -> &str {
        match self {
            ContentElement::Heading { text, .. }
            | ContentElement::Paragraph { text }
            | ContentElement::Quote { text } => text,
        }
    }
}

/// An article that passed the language and richness gates.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    /// Name of the [`Source`] the link was discovered under.
    pub source: String,
    pub url: String,
    pub title: String,
    pub elements: Vec<ContentElement>,
}

/// Aggregate outcome of one run.
///
/// Articles whose file write failed are still listed in `articles`; the
/// failure only shows up in `write_failures`.
#[derive(Debug, Default, Serialize)]
pub struct RunResult {
    /// Run timestamp shared by every file name, `YYYYMMDD_HHMMSS`.
    pub timestamp: String,
    pub articles: Vec<Article>,
    /// Files successfully written, in write order.
    pub files: Vec<PathBuf>,
    pub sources_attempted: usize,
    /// Sources abandoned because the listing fetch failed or no links survived classification.
    pub sources_skipped: usize,
    /// Candidate links abandoned on fetch failure, language or richness gate.
    pub links_skipped: usize,
    pub write_failures: usize,
}

impl RunResult {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
