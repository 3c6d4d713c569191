//! Heuristics that turn fetched markup into articles.
//!
//! Scraping happens in two phases, one per submodule:
//!
//! 1. **Indexing** ([`links`]): pick candidate article URLs out of a source's
//!    listing page
//! 2. **Extraction** ([`article`]): pull a title and body elements out of each
//!    candidate page, or report why it was skipped
//!
//! Neither phase performs I/O; both work on an already parsed
//! [`scraper::Html`] document or plain strings.

pub mod article;
pub mod links;
