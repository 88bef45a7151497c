use super::report::{format_event, summary_line};
use super::*;
use clap::Parser;
use hlsbatch_core::driver::RunSummary;
use hlsbatch_core::job::{FormatChoice, JobEvent};
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_no_args() {
    let cli = parse(&["hlsbatch"]);
    assert!(cli.dir.is_none());
    assert!(!cli.dry_run);
    assert!(cli.target_height.is_none());
    assert!(cli.ytdlp.is_none());
}

#[test]
fn cli_parse_dir_and_flags() {
    let cli = parse(&[
        "hlsbatch",
        "/srv/links",
        "--dry-run",
        "--target-height",
        "1080",
        "--yt-dlp",
        "/opt/yt-dlp",
    ]);
    assert_eq!(cli.dir.as_deref(), Some(Path::new("/srv/links")));
    assert!(cli.dry_run);
    assert_eq!(cli.target_height, Some(1080));
    assert_eq!(cli.ytdlp.as_deref(), Some("/opt/yt-dlp"));
}

#[test]
fn cli_parse_rejects_bad_height() {
    assert!(Cli::try_parse_from(["hlsbatch", "--target-height", "tall"]).is_err());
}

#[test]
fn overrides_apply_on_top_of_config() {
    let cli = parse(&["hlsbatch", "--target-height", "480"]);
    let cfg = cli.apply(HlsBatchConfig::default());
    assert_eq!(cfg.target_height, 480);
    assert_eq!(cfg.ytdlp_bin, "yt-dlp");

    let untouched = parse(&["hlsbatch"]).apply(HlsBatchConfig::default());
    assert_eq!(untouched, HlsBatchConfig::default());
}

#[test]
fn event_messages() {
    assert_eq!(
        format_event(&JobEvent::AlreadyExists {
            output_name: "clip.mp4"
        }),
        "clip.mp4 already exists. Skipping download."
    );
    assert_eq!(
        format_event(&JobEvent::FormatSelected {
            output_name: "clip.mp4",
            target_height: 720,
            choice: &FormatChoice::Variant("hls-720".to_string()),
        }),
        "720p format found. Downloading clip.mp4 in 720p..."
    );
    assert_eq!(
        format_event(&JobEvent::FormatSelected {
            output_name: "clip.mp4",
            target_height: 720,
            choice: &FormatChoice::Fallback,
        }),
        "No 720p format available for clip.mp4. Downloading best available format..."
    );
    assert_eq!(
        format_event(&JobEvent::Failed {
            url: "https://example.com/s.m3u8",
            reason: "HTTP Error 404"
        }),
        "Error downloading https://example.com/s.m3u8: HTTP Error 404"
    );
}

#[test]
fn summary_lines() {
    let dir = Path::new("/srv/links");
    assert_eq!(
        summary_line(dir, &RunSummary::default()),
        "No input files found in /srv/links."
    );
    let summary = RunSummary {
        processed: 3,
        downloaded: 1,
        already_present: 1,
        failed: 1,
        ..RunSummary::default()
    };
    assert_eq!(
        summary_line(dir, &summary),
        "Processed 3 file(s): 1 downloaded, 1 already present, 0 without link, 1 failed."
    );
}
