//! Media fetcher seam: metadata probe and download.
//!
//! The orchestrator only depends on the [`MediaFetcher`] trait. The production
//! implementation drives the `yt-dlp` executable; tests substitute a fake.

mod parse;
mod ytdlp;

use std::path::PathBuf;
use thiserror::Error;

pub use parse::parse_probe_output;
pub use ytdlp::YtDlp;

/// One encoded rendition of a stream as reported by the probe.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub format_id: String,
    /// Vertical resolution in pixels, when the source reports one.
    pub height: Option<u32>,
    pub ext: Option<String>,
    pub protocol: Option<String>,
    /// Total bitrate in kbit/s.
    pub tbr: Option<f64>,
}

impl Variant {
    pub fn new(format_id: impl Into<String>, height: Option<u32>) -> Self {
        Self {
            format_id: format_id.into(),
            height,
            ext: None,
            protocol: None,
            tbr: None,
        }
    }
}

/// Options handed to the downloader for one fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    /// Format selector: a variant id or a generic selector such as `best`.
    pub format: String,
    /// Fetch only the single item, never expand playlists.
    pub no_playlist: bool,
    /// Where the downloader writes the result.
    pub output: PathBuf,
}

/// Errors reported by a [`MediaFetcher`].
///
/// Only [`FetchError::Download`] is an expected per-job failure; the other
/// kinds mean the fetcher itself is unusable.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The downloader ran and reported a failure for this URL.
    #[error("{0}")]
    Download(String),
    /// The downloader could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// Probe output could not be understood.
    #[error("unreadable probe output: {0}")]
    Probe(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_download(&self) -> bool {
        matches!(self, FetchError::Download(_))
    }
}

/// Capability interface over an external media downloader.
pub trait MediaFetcher {
    /// Metadata-only lookup of the variants available at `url`. Transfers no media.
    fn probe(&self, url: &str) -> Result<Vec<Variant>, FetchError>;

    /// Downloads `url` according to `opts`.
    fn fetch(&self, url: &str, opts: &FetchOptions) -> Result<(), FetchError>;
}

impl<T: MediaFetcher + ?Sized> MediaFetcher for &T {
    fn probe(&self, url: &str) -> Result<Vec<Variant>, FetchError> {
        (**self).probe(url)
    }

    fn fetch(&self, url: &str, opts: &FetchOptions) -> Result<(), FetchError> {
        (**self).fetch(url, opts)
    }
}
