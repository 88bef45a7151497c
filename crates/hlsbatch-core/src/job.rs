//! Per-file download orchestration.
//!
//! One input file becomes one [`Job`]: extract the manifest link, derive the
//! output name, skip if the output is already there, then probe and fetch.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::HlsBatchConfig;
use crate::extract;
use crate::fetcher::{FetchError, FetchOptions, MediaFetcher, Variant};
use crate::naming;

/// Settings for one run, derived from the config file plus CLI overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSettings {
    pub input_suffix: String,
    pub manifest_marker: String,
    pub output_extension: String,
    pub target_height: u32,
    pub default_format: String,
    /// Extract and name only; never probe or fetch.
    pub dry_run: bool,
}

impl JobSettings {
    pub fn from_config(cfg: &HlsBatchConfig) -> Self {
        Self {
            input_suffix: cfg.input_suffix.clone(),
            manifest_marker: cfg.manifest_marker.clone(),
            output_extension: cfg.output_extension.clone(),
            target_height: cfg.target_height,
            default_format: cfg.default_format.clone(),
            dry_run: false,
        }
    }
}

impl Default for JobSettings {
    fn default() -> Self {
        Self::from_config(&HlsBatchConfig::default())
    }
}

/// One input file and what was derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub input_path: PathBuf,
    pub url: Option<String>,
    pub output_name: String,
}

impl Job {
    /// Reads `input` and derives its link and output name.
    pub fn prepare(input: &Path, settings: &JobSettings) -> Result<Self> {
        let url = extract::extract_manifest_link(input, &settings.manifest_marker)?;
        let file_name = input
            .file_name()
            .with_context(|| format!("input has no file name: {}", input.display()))?
            .to_string_lossy();
        let output_name = naming::output_filename(&file_name, &settings.output_extension);
        Ok(Self {
            input_path: input.to_path_buf(),
            url,
            output_name,
        })
    }
}

/// Which format the fetch will ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatChoice {
    /// A variant at the target height, selected by id.
    Variant(String),
    /// No variant at the target height; the default selector is used.
    Fallback,
}

/// Picks the first variant whose height equals `target_height`.
pub fn select_format(variants: &[Variant], target_height: u32) -> FormatChoice {
    variants
        .iter()
        .find(|v| v.height == Some(target_height))
        .map(|v| FormatChoice::Variant(v.format_id.clone()))
        .unwrap_or(FormatChoice::Fallback)
}

/// Progress notifications emitted while processing. The CLI turns these into
/// operator messages.
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent<'a> {
    Processing {
        input: &'a Path,
    },
    NoLink {
        input: &'a Path,
    },
    AlreadyExists {
        output_name: &'a str,
    },
    Planned {
        url: &'a str,
        output_name: &'a str,
    },
    FormatSelected {
        output_name: &'a str,
        target_height: u32,
        choice: &'a FormatChoice,
    },
    Downloaded {
        output_name: &'a str,
    },
    Failed {
        url: &'a str,
        reason: &'a str,
    },
}

/// Final state of one job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    NoLink,
    AlreadyExists { output: PathBuf },
    Planned { url: String, output: PathBuf },
    Downloaded { output: PathBuf, choice: FormatChoice },
    Failed { url: String, reason: String },
}

/// Processes one input file, writing the result into `out_dir`.
///
/// Download failures reported by the fetcher are caught and returned as
/// [`JobOutcome::Failed`]. Any other error is returned as `Err`.
pub fn process_file<F>(
    input: &Path,
    out_dir: &Path,
    settings: &JobSettings,
    fetcher: &F,
    report: &mut dyn FnMut(&JobEvent<'_>),
) -> Result<JobOutcome>
where
    F: MediaFetcher + ?Sized,
{
    let job = Job::prepare(input, settings)?;

    let Some(url) = job.url.as_deref() else {
        tracing::info!(input = %input.display(), "no manifest link; skipping");
        report(&JobEvent::NoLink { input });
        return Ok(JobOutcome::NoLink);
    };

    let output = out_dir.join(&job.output_name);
    if output.exists() {
        tracing::info!(output = %output.display(), "output already exists; skipping");
        report(&JobEvent::AlreadyExists {
            output_name: &job.output_name,
        });
        return Ok(JobOutcome::AlreadyExists { output });
    }

    if settings.dry_run {
        report(&JobEvent::Planned {
            url,
            output_name: &job.output_name,
        });
        return Ok(JobOutcome::Planned {
            url: url.to_string(),
            output,
        });
    }

    let mut opts = FetchOptions {
        format: settings.default_format.clone(),
        no_playlist: true,
        output: output.clone(),
    };

    match probe_and_fetch(fetcher, url, &mut opts, &job.output_name, settings, report) {
        Ok(choice) => {
            tracing::info!(url, output = %output.display(), "download finished");
            report(&JobEvent::Downloaded {
                output_name: &job.output_name,
            });
            Ok(JobOutcome::Downloaded { output, choice })
        }
        Err(e) if e.is_download() => {
            let reason = e.to_string();
            tracing::warn!(url, %reason, "download failed");
            report(&JobEvent::Failed {
                url,
                reason: &reason,
            });
            Ok(JobOutcome::Failed {
                url: url.to_string(),
                reason,
            })
        }
        Err(e) => Err(e).with_context(|| format!("fetching {url}")),
    }
}

fn probe_and_fetch<F>(
    fetcher: &F,
    url: &str,
    opts: &mut FetchOptions,
    output_name: &str,
    settings: &JobSettings,
    report: &mut dyn FnMut(&JobEvent<'_>),
) -> Result<FormatChoice, FetchError>
where
    F: MediaFetcher + ?Sized,
{
    let variants = fetcher.probe(url)?;
    let choice = select_format(&variants, settings.target_height);
    match &choice {
        FormatChoice::Variant(id) => {
            if let Some(v) = variants.iter().find(|v| &v.format_id == id) {
                tracing::debug!(
                    url,
                    format = %v.format_id,
                    ext = v.ext.as_deref().unwrap_or("?"),
                    protocol = v.protocol.as_deref().unwrap_or("?"),
                    tbr = v.tbr.unwrap_or_default(),
                    "format selected"
                );
            }
            opts.format = id.clone();
        }
        FormatChoice::Fallback => {
            tracing::debug!(
                url,
                format = %opts.format,
                variants = variants.len(),
                "no variant at target height; using default format"
            );
        }
    }
    report(&JobEvent::FormatSelected {
        output_name,
        target_height: settings.target_height,
        choice: &choice,
    });
    fetcher.fetch(url, opts)?;
    Ok(choice)
}
