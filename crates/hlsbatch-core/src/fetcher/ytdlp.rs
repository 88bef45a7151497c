//! [`MediaFetcher`] backed by the `yt-dlp` executable.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use super::{parse, FetchError, FetchOptions, MediaFetcher, Variant};

/// Runs `yt-dlp` as a blocking subprocess for both probe and fetch.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: String,
}

impl YtDlp {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self) -> Command {
        Command::new(&self.program)
    }

    fn spawn_error(&self, source: std::io::Error) -> FetchError {
        FetchError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

/// yt-dlp treats `-o` as a template; a literal `%` must be doubled.
pub(crate) fn output_template(path: &Path) -> OsString {
    let raw = path.as_os_str();
    match raw.to_str() {
        Some(s) if s.contains('%') => OsString::from(s.replace('%', "%%")),
        _ => raw.to_os_string(),
    }
}

pub(crate) fn probe_args(url: &str) -> Vec<OsString> {
    ["-J", "--no-playlist", "--no-warnings", url]
        .iter()
        .map(OsString::from)
        .collect()
}

pub(crate) fn fetch_args(url: &str, opts: &FetchOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-f".into(), opts.format.clone().into()];
    if opts.no_playlist {
        args.push("--no-playlist".into());
    }
    args.push("-o".into());
    args.push(output_template(&opts.output));
    args.push(url.into());
    args
}

/// Last non-empty stderr line, which is where yt-dlp puts its `ERROR:` message.
fn stderr_tail(stderr: &[u8]) -> Option<String> {
    String::from_utf8_lossy(stderr)
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(String::from)
}

impl MediaFetcher for YtDlp {
    fn probe(&self, url: &str) -> Result<Vec<Variant>, FetchError> {
        tracing::debug!(program = %self.program, url, "probing formats");
        let output = self
            .command()
            .args(probe_args(url))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            let message = stderr_tail(&output.stderr)
                .unwrap_or_else(|| format!("{} exited with {}", self.program, output.status));
            return Err(FetchError::Download(message));
        }

        let variants = parse::parse_probe_output(&output.stdout)?;
        tracing::debug!(url, count = variants.len(), "probe finished");
        Ok(variants)
    }

    fn fetch(&self, url: &str, opts: &FetchOptions) -> Result<(), FetchError> {
        tracing::info!(
            program = %self.program,
            url,
            format = %opts.format,
            output = %opts.output.display(),
            "starting fetch"
        );
        // stdout/stderr are inherited so the operator sees yt-dlp's own progress.
        let status = self
            .command()
            .args(fetch_args(url, opts))
            .stdin(Stdio::null())
            .status()
            .map_err(|e| self.spawn_error(e))?;

        if !status.success() {
            return Err(FetchError::Download(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}
