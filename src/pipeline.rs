//! Run orchestration: sources → listing → candidate links → articles → files.
//!
//! One [`Run`] walks the configured sources in order, strictly one request at
//! a time:
//!
//! ```text
//! for each source:
//!     fetch listing ─┬─ fail ──────────────► skip source
//!                    └─ classify links ─┬─ none ──► skip source
//!                                       └─ for each candidate (capped):
//!                                              fetch ─┬─ fail ─► skip link
//!                                                     └─ extract ─┬─ skipped ─► skip link
//!                                                                 └─ usable ──► write, record
//! ```
//!
//! Every failure is logged and confined to the unit of work it happened in.
//! Pacing sleeps follow each listing fetch and each article fetch.

use crate::config::RunConfig;
use crate::fetch::{FetchError, Fetcher};
use crate::models::{Article, RunResult, Source};
use crate::outputs::plaintext::write_article;
use crate::scrapers::article::{extract_article, Extraction};
use crate::scrapers::links::{classify_links, harvest_hrefs};
use crate::utils::{error_chain, truncate_for_log};
use scraper::Html;
use std::io;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

const LOG_URL_MAX: usize = 120;

/// Gate a run on the output-directory probe, then connect and process `sources`.
///
/// A failed probe is returned before `connect` is called, so nothing touches
/// the network. A fetcher that cannot be built yields an empty result.
pub async fn run_job<F, C>(
    config: &RunConfig,
    probe: io::Result<()>,
    timestamp: String,
    connect: C,
    sources: &[Source],
) -> io::Result<RunResult>
where
    F: Fetcher,
    C: FnOnce(&RunConfig) -> Result<F, FetchError>,
{
    if let Err(e) = probe {
        error!(
            path = %config.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }
    info!(path = %config.output_dir.display(), "Output directory is writable");

    match connect(config) {
        Ok(fetcher) => Ok(Run::new(config, &fetcher, timestamp).execute(sources).await),
        Err(e) => {
            error!(error = %error_chain(&e), "Could not build HTTP client; no sources fetched");
            Ok(RunResult::new(timestamp))
        }
    }
}

/// State owned by one invocation: the aggregate result and the file-name index.
pub struct Run<'a, F> {
    config: &'a RunConfig,
    fetcher: &'a F,
    next_index: usize,
    result: RunResult,
}

impl<'a, F: Fetcher> Run<'a, F> {
    pub fn new(config: &'a RunConfig, fetcher: &'a F, timestamp: impl Into<String>) -> Self {
        Self {
            config,
            fetcher,
            next_index: 0,
            result: RunResult::new(timestamp),
        }
    }

    /// Process every source in order and return what was produced.
    pub async fn execute(mut self, sources: &[Source]) -> RunResult {
        for source in sources {
            self.process_source(source).await;
        }
        info!(
            articles = self.result.articles.len(),
            sources = self.result.sources_attempted,
            sources_skipped = self.result.sources_skipped,
            links_skipped = self.result.links_skipped,
            write_failures = self.result.write_failures,
            "Run finished"
        );
        self.result
    }

    #[instrument(level = "info", skip_all, fields(source = %source.name))]
    async fn process_source(&mut self, source: &Source) {
        self.result.sources_attempted += 1;
        info!(url = %source.listing_url, "Fetching from {}", source.name);

        let listing = self.fetcher.fetch(source.listing_url).await;
        pause(self.config.source_delay).await;

        let body = match listing {
            Ok(body) => body,
            Err(e) => {
                error!(url = %source.listing_url, error = %error_chain(&e), "Error fetching listing; skipping source");
                self.result.sources_skipped += 1;
                return;
            }
        };

        let hrefs = harvest_hrefs(&Html::parse_document(&body));
        let classified = match classify_links(
            &hrefs,
            source.listing_url,
            source.name,
            self.config.max_articles_per_source,
        ) {
            Ok(classified) => classified,
            Err(e) => {
                error!(url = %source.listing_url, error = %e, "Invalid listing URL; skipping source");
                self.result.sources_skipped += 1;
                return;
            }
        };

        if classified.candidates.is_empty() {
            let rejected: Vec<String> = classified
                .rejected
                .iter()
                .map(|url| truncate_for_log(url, LOG_URL_MAX))
                .collect();
            warn!(
                links_seen = hrefs.len(),
                ?rejected,
                "No valid article links found for {}",
                source.name
            );
            self.result.sources_skipped += 1;
            return;
        }

        info!(candidates = classified.candidates.len(), "Classified article links");
        for link in &classified.candidates {
            self.process_link(source, link).await;
        }
    }

    #[instrument(level = "info", skip_all, fields(url = %link))]
    async fn process_link(&mut self, source: &Source, link: &str) {
        info!("Processing article");
        let fetched = self.fetcher.fetch(link).await;
        pause(self.config.article_delay).await;

        let body = match fetched {
            Ok(body) => body,
            Err(e) => {
                error!(source = %source.name, error = %error_chain(&e), "Error scraping article; skipping link");
                self.result.links_skipped += 1;
                return;
            }
        };

        let extraction = {
            let document = Html::parse_document(&body);
            extract_article(&document, link, source.name, self.config.language_policy)
        };

        debug!(
            title = extraction.title(),
            elements = extraction.elements().len(),
            "Extraction finished"
        );
        match extraction {
            Extraction::Usable { title, elements } => {
                let article = Article {
                    source: source.name.to_string(),
                    url: link.to_string(),
                    title,
                    elements,
                };
                self.record(article).await;
            }
            Extraction::Skipped { title, reason } => {
                warn!(source = %source.name, %title, %reason, "No content found; skipping link");
                self.result.links_skipped += 1;
            }
        }
    }

    /// Write the article and add it to the aggregate, whether or not the write succeeded.
    async fn record(&mut self, article: Article) {
        let index = self.next_index;
        self.next_index += 1;

        let written =
            write_article(&self.config.output_dir, &article, &self.result.timestamp, index).await;
        match written {
            Ok(path) => self.result.files.push(path),
            Err(e) => {
                error!(source = %article.source, url = %article.url, error = %error_chain(&e), "Error saving article");
                self.result.write_failures += 1;
            }
        }
        self.result.articles.push(article);
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        sleep(delay).await;
    }
}
