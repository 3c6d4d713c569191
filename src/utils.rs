//! Utility functions for run timestamps, log formatting and output directory checks.

use chrono::{DateTime, Local};
use std::error::Error;
use std::fs as stdfs;
use std::io::{self, Write};
use std::path::Path;
use tokio::fs;

/// `chrono` format of the run timestamp embedded in every file name.
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const PROBE_FILE_NAME: &str = ".health_news_probe";

/// Timestamp shared by every file written during one run.
pub fn run_timestamp(now: DateTime<Local>) -> String {
    now.format(RUN_TIMESTAMP_FORMAT).to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to a char
/// boundary) with the number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Render an error followed by each of its sources, `outer: inner: root`.
///
/// A source whose text the outer message already ends with is not repeated.
pub fn error_chain(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.ends_with(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and deletes a probe file.
/// Runs before logging is installed, so it reports only through its result.
///
/// # Errors
///
/// Returns the underlying I/O error if the directory cannot be created or
/// the probe cannot be written (permission denied, read-only filesystem, ...).
pub async fn ensure_writable_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path).await?;

    let probe_path = path.join(PROBE_FILE_NAME);
    {
        let mut probe = stdfs::File::create(&probe_path)?;
        probe.write_all(b"test")?;
    }
    stdfs::remove_file(&probe_path)?;
    Ok(())
}
