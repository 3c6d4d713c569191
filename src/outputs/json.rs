//! JSON run summary.
//!
//! With `--summary-json <path>`, the whole [`RunResult`] (every article with
//! its elements, plus the skip and failure counters) is serialized to one
//! file after the run. The article text files are unaffected.

use crate::models::RunResult;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `result` to `path`, creating parent directories as needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_summary(result: &RunResult, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(result)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create summary dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!(articles = result.articles.len(), "Wrote run summary");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, ContentElement};

    #[tokio::test]
    async fn test_write_summary_roundtrips_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("summary.json");

        let mut result = RunResult::new("20251019_083000");
        result.sources_attempted = 2;
        result.links_skipped = 1;
        result.articles.push(Article {
            source: "WebMD".to_string(),
            url: "https://www.webmd.com/news/20251019/x".to_string(),
            title: "A title".to_string(),
            elements: vec![ContentElement::Paragraph {
                text: "Paragraph text long enough.".to_string(),
            }],
        });

        write_summary(&result, &path).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["timestamp"], "20251019_083000");
        assert_eq!(value["sources_attempted"], 2);
        assert_eq!(value["links_skipped"], 1);
        assert_eq!(value["articles"][0]["source"], "WebMD");
        assert_eq!(value["articles"][0]["elements"][0]["type"], "paragraph");
    }
}
