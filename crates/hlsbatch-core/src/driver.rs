//! Directory driver: find input files and process them one after another.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::fetcher::MediaFetcher;
use crate::job::{self, JobEvent, JobOutcome, JobSettings};

/// Counts of job outcomes for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub downloaded: usize,
    pub no_link: usize,
    pub already_present: usize,
    pub planned: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &JobOutcome) {
        self.processed += 1;
        match outcome {
            JobOutcome::Downloaded { .. } => self.downloaded += 1,
            JobOutcome::NoLink => self.no_link += 1,
            JobOutcome::AlreadyExists { .. } => self.already_present += 1,
            JobOutcome::Planned { .. } => self.planned += 1,
            JobOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Lists regular files directly inside `dir` whose name ends with `suffix`, sorted by name.
pub fn discover_inputs(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))?;
    let mut inputs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read directory {}", dir.display()))?;
        let name = entry.file_name();
        if !name.to_string_lossy().ends_with(suffix) {
            continue;
        }
        let path = entry.path();
        // Follows symlinks, so a link to a regular file counts.
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "skipping non-file entry");
            continue;
        }
        inputs.push(path);
    }
    inputs.sort();
    Ok(inputs)
}

/// Processes every input file in `dir`, writing outputs next to them.
///
/// Jobs run sequentially. A caught download failure does not stop later jobs;
/// any other error ends the run.
pub fn run_directory<F>(
    dir: &Path,
    settings: &JobSettings,
    fetcher: &F,
    report: &mut dyn FnMut(&JobEvent<'_>),
) -> Result<RunSummary>
where
    F: MediaFetcher + ?Sized,
{
    let inputs = discover_inputs(dir, &settings.input_suffix)?;
    tracing::info!(dir = %dir.display(), count = inputs.len(), "discovered input files");

    let mut summary = RunSummary::default();
    for input in &inputs {
        report(&JobEvent::Processing { input });
        let outcome = job::process_file(input, dir, settings, fetcher, report)?;
        summary.record(&outcome);
    }

    tracing::info!(?summary, "run finished");
    Ok(summary)
}
