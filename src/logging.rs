//! Tracing setup: human-readable events on stderr plus an append-only run log.
//!
//! The run log lives next to the articles as `scraper.log` and is only attached
//! once the output directory has passed its write probe. Call [`init_logging`]
//! once from `main` and keep the returned guard alive until exit, otherwise
//! buffered lines are lost.

use std::error::Error;
use std::fmt;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::field::RecordFields;
use tracing_subscriber::fmt::format::{DefaultFields, Writer};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::FormatFields;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_FILE_NAME: &str = "scraper.log";

/// Span fields for the run log.
///
/// Formatted span fields are cached per formatter type, so the file layer needs
/// a type of its own or it reuses the colored text rendered for stderr.
#[derive(Debug)]
struct PlainFields(DefaultFields);

impl PlainFields {
    fn new() -> Self {
        Self(DefaultFields::new())
    }
}

impl<'w> FormatFields<'w> for PlainFields {
    fn format_fields<R: RecordFields>(&self, writer: Writer<'w>, fields: R) -> fmt::Result {
        self.0.format_fields(writer, fields)
    }
}

fn stderr_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(UtcTime::rfc_3339())
}

/// Layer appending plain, uncolored lines to `<dir>/scraper.log`.
pub fn file_layer<S>(dir: &Path) -> Result<(impl Layer<S>, WorkerGuard), InitError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = tracing_subscriber::fmt::layer()
        .fmt_fields(PlainFields::new())
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_timer(UtcTime::rfc_3339());
    Ok((layer, guard))
}

/// Install the global subscriber.
///
/// With `log_dir` set, events are also appended to `<log_dir>/scraper.log`.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>, Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file, guard) = match log_dir {
        Some(dir) => {
            let (layer, guard) = file_layer(dir)?;
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer())
        .with(file)
        .try_init()?;

    Ok(guard)
}
