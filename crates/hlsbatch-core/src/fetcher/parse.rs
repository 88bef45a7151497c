//! Parse `yt-dlp -J` output into variants.

use serde::Deserialize;

use super::{FetchError, Variant};

#[derive(Debug, Deserialize)]
struct ProbePayload {
    #[serde(default)]
    formats: Option<Vec<RawFormat>>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    format_id: Option<String>,
    height: Option<u32>,
    ext: Option<String>,
    protocol: Option<String>,
    tbr: Option<f64>,
}

/// Parse the JSON document printed by `yt-dlp -J` and return its formats in order.
///
/// A missing `formats` array yields no variants; entries without an id are dropped.
pub fn parse_probe_output(stdout: &[u8]) -> Result<Vec<Variant>, FetchError> {
    let payload: ProbePayload = serde_json::from_slice(stdout)?;
    let variants = payload
        .formats
        .unwrap_or_default()
        .into_iter()
        .filter_map(|f| {
            let format_id = f.format_id?.trim().to_string();
            if format_id.is_empty() {
                return None;
            }
            Some(Variant {
                format_id,
                height: f.height,
                ext: f.ext,
                protocol: f.protocol,
                tbr: f.tbr,
            })
        })
        .collect();
    Ok(variants)
}
