//! Command-line interface definitions for the health news scraper.
//!
//! Only `--max-articles` is needed for a normal run; everything else has a
//! default suited to a once-a-day job. The output directory can also be set
//! through the environment.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the health news scraper.
///
/// # Examples
///
/// ```sh
/// # One article per source into ~/Desktop/HealthNewsLinks
/// health_news_scraper
///
/// # Three per source, somewhere else, no pacing
/// health_news_scraper --max-articles 3 -o /tmp/health --article-delay-ms 0 --source-delay-ms 0
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Max articles per source
    #[arg(long, default_value_t = 1)]
    pub max_articles: usize,

    /// Directory articles and scraper.log are written to [default: ~/Desktop/HealthNewsLinks]
    #[arg(short, long, env = "HEALTH_NEWS_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Pause after each article fetch, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub article_delay_ms: u64,

    /// Pause after each source, in milliseconds
    #[arg(long, default_value_t = 2000)]
    pub source_delay_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Skip pages whose <html> element declares no language
    #[arg(long)]
    pub reject_undeclared_lang: bool,

    /// Also write the run summary as JSON to this path
    #[arg(long)]
    pub summary_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["health_news_scraper"]);

        assert_eq!(cli.max_articles, 1);
        assert_eq!(cli.article_delay_ms, 1000);
        assert_eq!(cli.source_delay_ms, 2000);
        assert_eq!(cli.timeout_secs, 60);
        assert!(!cli.reject_undeclared_lang);
        assert!(cli.summary_json.is_none());
    }

    #[test]
    fn test_cli_max_articles() {
        let cli = Cli::parse_from(["health_news_scraper", "--max-articles", "4"]);
        assert_eq!(cli.max_articles, 4);
    }

    #[test]
    fn test_cli_output_dir_short_flag() {
        let cli = Cli::parse_from(["health_news_scraper", "-o", "/tmp/health"]);
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/health")));
    }

    #[test]
    fn test_cli_rejects_negative_max_articles() {
        let res = Cli::try_parse_from(["health_news_scraper", "--max-articles", "-1"]);
        assert!(res.is_err());
    }
}
