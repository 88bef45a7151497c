//! Operator-facing messages for job events.

use hlsbatch_core::driver::RunSummary;
use hlsbatch_core::job::{FormatChoice, JobEvent};
use std::path::Path;

pub(crate) fn format_event(event: &JobEvent<'_>) -> String {
    match event {
        JobEvent::Processing { input } => format!("Processing {}...", input.display()),
        JobEvent::NoLink { input } => format!(
            "No valid manifest link found in {}. Skipping file.",
            input.display()
        ),
        JobEvent::AlreadyExists { output_name } => {
            format!("{output_name} already exists. Skipping download.")
        }
        JobEvent::Planned { url, output_name } => {
            format!("Would download {url} to {output_name}.")
        }
        JobEvent::FormatSelected {
            output_name,
            target_height,
            choice,
        } => match choice {
            FormatChoice::Variant(_) => format!(
                "{target_height}p format found. Downloading {output_name} in {target_height}p..."
            ),
            FormatChoice::Fallback => format!(
                "No {target_height}p format available for {output_name}. Downloading best available format..."
            ),
        },
        JobEvent::Downloaded { output_name } => format!("Saved {output_name}."),
        JobEvent::Failed { url, reason } => format!("Error downloading {url}: {reason}"),
    }
}

pub(crate) fn print_event(event: &JobEvent<'_>) {
    println!("{}", format_event(event));
}

pub(crate) fn summary_line(dir: &Path, summary: &RunSummary) -> String {
    if summary.processed == 0 {
        return format!("No input files found in {}.", dir.display());
    }
    let mut line = format!(
        "Processed {} file(s): {} downloaded, {} already present, {} without link, {} failed",
        summary.processed,
        summary.downloaded,
        summary.already_present,
        summary.no_link,
        summary.failed
    );
    if summary.planned > 0 {
        line.push_str(&format!(", {} planned (dry run)", summary.planned));
    }
    line.push('.');
    line
}
