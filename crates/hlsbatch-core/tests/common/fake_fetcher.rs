//! Scripted in-process fetcher for integration tests.
//!
//! Per URL it returns a fixed list of variants and either writes the output
//! file (success) or fails with the configured error. Every call is recorded.

use hlsbatch_core::fetcher::{FetchError, FetchOptions, MediaFetcher, Variant};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;

#[derive(Debug, Clone)]
pub enum Script {
    Ok(Vec<Variant>),
    ProbeFails(String),
    FetchFails(Vec<Variant>, String),
    /// The downloader binary is missing.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Probe(String),
    Fetch(String, FetchOptions),
}

#[derive(Default)]
pub struct FakeFetcher {
    scripts: HashMap<String, Script>,
    pub calls: RefCell<Vec<Call>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, url: &str, script: Script) -> Self {
        self.scripts.insert(url.to_string(), script);
        self
    }

    pub fn fetches(&self) -> Vec<(String, FetchOptions)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Fetch(url, opts) => Some((url.clone(), opts.clone())),
                Call::Probe(_) => None,
            })
            .collect()
    }

    pub fn probe_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Probe(_)))
            .count()
    }

    fn lookup(&self, url: &str) -> Script {
        self.scripts
            .get(url)
            .cloned()
            .unwrap_or_else(|| Script::Ok(Vec::new()))
    }
}

fn unavailable() -> FetchError {
    FetchError::Spawn {
        program: "yt-dlp".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
    }
}

impl MediaFetcher for FakeFetcher {
    fn probe(&self, url: &str) -> Result<Vec<Variant>, FetchError> {
        self.calls.borrow_mut().push(Call::Probe(url.to_string()));
        match self.lookup(url) {
            Script::Ok(v) | Script::FetchFails(v, _) => Ok(v),
            Script::ProbeFails(msg) => Err(FetchError::Download(msg)),
            Script::Unavailable => Err(unavailable()),
        }
    }

    fn fetch(&self, url: &str, opts: &FetchOptions) -> Result<(), FetchError> {
        self.calls
            .borrow_mut()
            .push(Call::Fetch(url.to_string(), opts.clone()));
        match self.lookup(url) {
            Script::Ok(_) => {
                fs::write(&opts.output, format!("{url} as {}", opts.format))
                    .map_err(|e| FetchError::Download(e.to_string()))?;
                Ok(())
            }
            Script::FetchFails(_, msg) | Script::ProbeFails(msg) => Err(FetchError::Download(msg)),
            Script::Unavailable => Err(unavailable()),
        }
    }
}
