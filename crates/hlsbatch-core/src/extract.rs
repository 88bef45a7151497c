//! Manifest link extraction from text files.
//!
//! Input files are free-form notes (copied request lines, shell history, etc.).
//! The first line carrying the manifest marker and ending in an absolute
//! http(s) URL wins; nothing after it is looked at.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// URL scheme prefixes accepted for the trailing token.
const URL_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Returns the manifest link carried by a single line, if any.
///
/// The line must contain `marker`; its last whitespace-delimited token must
/// start with an http(s) scheme and parse as an absolute URL.
pub fn link_in_line<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let line = line.trim();
    if !line.contains(marker) {
        return None;
    }
    let token = line.split_whitespace().last()?;
    if !URL_PREFIXES.iter().any(|p| token.starts_with(p)) {
        return None;
    }
    url::Url::parse(token).ok()?;
    Some(token)
}

/// Scans `path` line by line and returns the first manifest link found.
///
/// Lines with the marker but no URL-shaped trailing token are skipped.
/// Read or decode failures are errors, not "no link".
pub fn extract_manifest_link(path: &Path, marker: &str) -> Result<Option<String>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("read {}", path.display()))?;
        if let Some(link) = link_in_line(&line, marker) {
            tracing::debug!(path = %path.display(), url = link, "manifest link found");
            return Ok(Some(link.to_string()));
        }
    }
    Ok(None)
}
