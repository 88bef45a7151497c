use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/hlsbatch/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HlsBatchConfig {
    /// Suffix an entry's name must end with to be treated as an input file.
    pub input_suffix: String,
    /// Substring that marks a line as carrying a manifest link.
    pub manifest_marker: String,
    /// Extension (without the dot) appended to output filenames.
    pub output_extension: String,
    /// Preferred vertical resolution; a variant at exactly this height is chosen by id.
    pub target_height: u32,
    /// yt-dlp format selector used when no variant matches `target_height`.
    pub default_format: String,
    /// yt-dlp executable, either a bare name resolved via PATH or an absolute path.
    pub ytdlp_bin: String,
}

impl Default for HlsBatchConfig {
    fn default() -> Self {
        Self {
            input_suffix: ".txt".to_string(),
            manifest_marker: ".m3u8".to_string(),
            output_extension: "mp4".to_string(),
            target_height: 720,
            default_format: "best".to_string(),
            ytdlp_bin: "yt-dlp".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hlsbatch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HlsBatchConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as [`load_or_init`] but against an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<HlsBatchConfig> {
    if !path.exists() {
        let default_cfg = HlsBatchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: HlsBatchConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

/// Like [`load_or_init`], but an unusable config location (e.g. read-only HOME)
/// yields the built-in defaults. A config file that exists but does not parse
/// is still an error.
pub fn load_or_default() -> Result<HlsBatchConfig> {
    fallback_unless_malformed(load_or_init())
}

/// Same as [`load_or_default`] but against an explicit path.
pub fn load_or_default_at(path: &Path) -> Result<HlsBatchConfig> {
    fallback_unless_malformed(load_or_init_at(path))
}

fn fallback_unless_malformed(loaded: Result<HlsBatchConfig>) -> Result<HlsBatchConfig> {
    match loaded {
        Ok(cfg) => Ok(cfg),
        Err(err) if err.chain().any(|c| c.is::<toml::de::Error>()) => Err(err),
        Err(err) => {
            tracing::warn!("config unavailable ({:#}); using defaults", err);
            Ok(HlsBatchConfig::default())
        }
    }
}
