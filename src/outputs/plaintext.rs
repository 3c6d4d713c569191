//! Plain-text article files.
//!
//! Every usable article becomes one `.txt` file in the output directory:
//!
//! ```text
//! {source}_{title}_{YYYYMMDD_HHMMSS}_{index}.txt
//! ```
//!
//! The timestamp is fixed for the whole run and the index increases with each
//! article, so names never collide within a run and sort in write order.
//!
//! # Layout
//!
//! ```text
//! Source: BBC Health
//! URL: https://www.bbc.com/news/health-68412345
//! Date: 2025-10-19 08:30:12
//! Title: Test, Article!!
//!
//! # A level-two heading
//!
//! ## A level-three heading
//!
//! A paragraph.
//!
//! > A quote.
//!
//! ```

use crate::models::{Article, ContentElement, HeadingLevel};
use crate::text::normalize_for_filename;
use chrono::Local;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, instrument};

pub const EXTENSION: &str = "txt";

#[derive(Debug, Error)]
#[error("failed to write {}: {source}", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// File name for an article; see the module docs for the scheme.
pub fn article_filename(source: &str, title: &str, timestamp: &str, index: usize) -> String {
    format!(
        "{}_{}_{}_{}.{}",
        source,
        normalize_for_filename(title),
        timestamp,
        index,
        EXTENSION
    )
}

/// Render the header block and body of an article.
///
/// `written_at` goes into the `Date:` line verbatim.
pub fn render_article(article: &Article, written_at: &str) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Source: {}", article.source);
    let _ = writeln!(out, "URL: {}", article.url);
    let _ = writeln!(out, "Date: {}", written_at);
    let _ = writeln!(out, "Title: {}\n", article.title);

    for element in &article.elements {
        let prefix = match element {
            ContentElement::Heading {
                level: HeadingLevel::H2,
                ..
            } => "# ",
            ContentElement::Heading {
                level: HeadingLevel::H3,
                ..
            } => "## ",
            ContentElement::Paragraph { .. } => "",
            ContentElement::Quote { .. } => "> ",
        };
        let _ = writeln!(out, "{}{}\n", prefix, element.text());
    }
    out
}

/// Write `article` into `output_dir` and return the path written.
#[instrument(level = "info", skip(output_dir, article, timestamp), fields(source = %article.source, url = %article.url))]
pub async fn write_article(
    output_dir: &Path,
    article: &Article,
    timestamp: &str,
    index: usize,
) -> Result<PathBuf, WriteError> {
    let path = output_dir.join(article_filename(
        &article.source,
        &article.title,
        timestamp,
        index,
    ));
    let written_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let body = render_article(article, &written_at);

    fs::write(&path, body).await.map_err(|source| WriteError {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "Saved article");
    Ok(path)
}
