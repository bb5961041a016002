//! Markdown report files.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::Utc;

/// Writes `contents` to `<dir>/report-<unix-millis>.md`, creating `dir` if
/// needed, and returns the written path.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub(crate) fn write_report(dir: &Path, contents: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create report directory {}", dir.display()))?;

    let path = dir.join(report_file_name(Utc::now().timestamp_millis()));
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write report {}", path.display()))?;

    tracing::info!(path = %path.display(), "report written");
    Ok(path)
}

fn report_file_name(millis: i64) -> String {
    format!("report-{millis}.md")
}
