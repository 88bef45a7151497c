//! CLI for hlsbatch.

mod report;

use anyhow::{Context, Result};
use clap::Parser;
use hlsbatch_core::config::{self, HlsBatchConfig};
use hlsbatch_core::driver;
use hlsbatch_core::fetcher::YtDlp;
use hlsbatch_core::job::JobSettings;
use std::path::PathBuf;

/// Fetch the HLS stream referenced by each `.txt` file in a directory.
#[derive(Debug, Parser)]
#[command(name = "hlsbatch")]
#[command(about = "hlsbatch: download the HLS stream linked from each .txt file", long_about = None)]
pub struct Cli {
    /// Directory to scan (defaults to the current directory).
    pub dir: Option<PathBuf>,

    /// Only report what would be downloaded; never run yt-dlp.
    #[arg(long)]
    pub dry_run: bool,

    /// Preferred vertical resolution (overrides config).
    #[arg(long, value_name = "N")]
    pub target_height: Option<u32>,

    /// yt-dlp executable to run (overrides config).
    #[arg(long = "yt-dlp", value_name = "PATH")]
    pub ytdlp: Option<String>,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded config.
    pub fn apply(&self, mut cfg: HlsBatchConfig) -> HlsBatchConfig {
        if let Some(height) = self.target_height {
            cfg.target_height = height;
        }
        if let Some(bin) = &self.ytdlp {
            cfg.ytdlp_bin = bin.clone();
        }
        cfg
    }
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let cfg = cli.apply(config::load_or_default()?);
    tracing::debug!("effective config: {:?}", cfg);

    let dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("resolve current directory")?,
    };

    let mut settings = JobSettings::from_config(&cfg);
    settings.dry_run = cli.dry_run;
    let fetcher = YtDlp::new(cfg.ytdlp_bin.as_str());
    tracing::info!(
        dir = %dir.display(),
        program = fetcher.program(),
        dry_run = settings.dry_run,
        "starting run"
    );

    let summary = driver::run_directory(&dir, &settings, &fetcher, &mut report::print_event)?;
    println!("{}", report::summary_line(&dir, &summary));
    Ok(())
}

#[cfg(test)]
mod tests;
