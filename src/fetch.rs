//! Page retrieval behind a small async trait.
//!
//! # Architecture
//!
//! - [`Fetcher`]: core trait, one GET returning the decoded body
//! - [`HttpFetcher`]: `reqwest` implementation with a fixed user agent and timeout
//!
//! No retries: a failed GET is a skip for that URL until the next run.

use crate::config::RunConfig;
use crate::utils::error_chain;
use reqwest::{Client, StatusCode};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },
}

/// Something that can turn a URL into page markup.
///
/// The pipeline only depends on this trait, so tests drive it with canned pages.
pub trait Fetcher {
    /// GET `url` and return its body, decoded as UTF-8 with invalid sequences replaced.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Plain HTTP(S) fetcher. One client is built per run and reused for every request.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &RunConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }

    async fn get_body(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        let bytes = response.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let res = self.get_body(url).await;
        let dt = t0.elapsed();

        match &res {
            Ok(body) => debug!(
                elapsed_ms = dt.as_millis() as u64,
                bytes = body.len(),
                "GET succeeded"
            ),
            Err(e) => warn!(elapsed_ms = dt.as_millis() as u64, error = %error_chain(e), "GET failed"),
        }
        res
    }
}
