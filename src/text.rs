//! Text normalization for file names and article bodies.
//!
//! Scraped text arrives with accents, smart quotes, non-breaking spaces and
//! whatever else the page happened to contain. Everything written to disk is
//! first folded to ASCII:
//!
//! - [`normalize_for_filename`]: `[A-Za-z0-9_-]` only, whitespace runs become
//!   underscores, at most 50 characters
//! - [`normalize_for_body`]: word characters plus `. , ! ? ' " -`, whitespace
//!   runs become single spaces, trimmed

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Maximum length of the title fragment embedded in an output file name.
pub const MAX_FILENAME_LEN: usize = 50;

static RE_FILENAME_STRIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static RE_BODY_STRIP: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[^\w\s.,!?'"-]"#).unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Which call site a piece of body text is being normalized for.
///
/// Both modes apply the same transform; the distinction only documents
/// intent at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    Body,
    Title,
}

/// Decompose accented characters and drop anything left outside ASCII.
fn fold_to_ascii(text: &str) -> String {
    text.nfkd().filter(char::is_ascii).collect()
}

/// Reduce `text` to a fragment safe to embed in a file name.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_for_filename("Test, Article!!"), "Test_Article");
/// assert_eq!(normalize_for_filename("Café  au lait"), "Cafe_au_lait");
/// ```
pub fn normalize_for_filename(text: &str) -> String {
    let ascii = fold_to_ascii(text);
    let stripped = RE_FILENAME_STRIP.replace_all(&ascii, "");
    let joined = RE_WHITESPACE.replace_all(stripped.trim(), "_");
    // Input is pure ASCII at this point, so byte and char counts agree.
    joined.chars().take(MAX_FILENAME_LEN).collect()
}

/// Reduce `text` to the character set allowed in article headings and paragraphs.
pub fn normalize_for_body(text: &str, mode: TextMode) -> String {
    if text.is_empty() {
        return String::new();
    }
    let ascii = fold_to_ascii(text);
    let stripped = RE_BODY_STRIP.replace_all(&ascii, "");
    let collapsed = RE_WHITESPACE.replace_all(&stripped, " ");
    match mode {
        TextMode::Body | TextMode::Title => collapsed.trim().to_string(),
    }
}
