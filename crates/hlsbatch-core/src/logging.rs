//! Run log for hlsbatch.
//!
//! Operator messages go to stdout from the CLI; this log keeps the structured
//! record (which file, which URL, which format, what yt-dlp said) across runs.
//! It is appended to `~/.local/state/hlsbatch/hlsbatch.log`, with stderr as the
//! fallback when the state dir is not writable.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset: job-level detail from our crates, info from the rest.
const DEFAULT_FILTER: &str = "info,hlsbatch=debug,hlsbatch_core=debug";

/// One handle per event; an event that cannot get a file handle lands on stderr.
enum RunLogSink {
    File(fs::File),
    Stderr,
}

impl io::Write for RunLogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            RunLogSink::File(f) => f.write(buf),
            RunLogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            RunLogSink::File(f) => f.flush(),
            RunLogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

/// Shares the opened run log across events.
struct RunLog(fs::File);

impl<'a> MakeWriter<'a> for RunLog {
    type Writer = RunLogSink;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => RunLogSink::File(f),
            Err(_) => RunLogSink::Stderr,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn install(writer: BoxMakeWriter) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();
}

/// Where the run log lives.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hlsbatch")?;
    Ok(xdg_dirs.get_state_home().join("hlsbatch.log"))
}

/// Opens the run log for appending and installs it as the global subscriber.
///
/// Errors (no HOME, unwritable state dir) are returned before anything is
/// installed, so the caller can still use [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    install(BoxMakeWriter::new(RunLog(file)));
    tracing::info!("hlsbatch run log at {}", path.display());
    Ok(())
}

/// Logs to stderr instead of the run log file.
pub fn init_logging_stderr() {
    install(BoxMakeWriter::new(io::stderr));
}
