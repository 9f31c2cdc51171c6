//! Saving and sharing a generated chart.
//!
//! Image bytes are written exactly as received; nothing here decodes or
//! re-encodes pixels.

use anyhow::{anyhow, Context, Result};
use base64::Engine as _;
use shared::chart::ChartResult;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

pub fn download_file_name(chart_type: &str, millis: i64) -> String {
    let safe: String = chart_type
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("diagram-{}-{}.png", safe, millis)
}

/// Decode a `data:<media>;base64,<payload>` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| anyhow!("not a data URI"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| anyhow!("data URI has no payload"))?;
    if !header.ends_with(";base64") {
        return Err(anyhow!("only base64 data URIs are supported"));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .context("invalid base64 image data")
}

/// Raw bytes behind a chart's image URI.
pub async fn chart_bytes(image: &str) -> Result<Vec<u8>> {
    if image.starts_with("data:") {
        decode_data_uri(image)
    } else {
        Ok(providers::endpoint::fetch_bytes(image).await?)
    }
}

/// Where downloads land: the user's download folder, else home, else cwd.
pub fn download_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| {
            dirs.download_dir()
                .map(Path::to_path_buf)
                .or_else(|| Some(dirs.home_dir().to_path_buf()))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Write the chart image into `dir` and return the file path.
pub async fn save_chart(chart: &ChartResult, dir: &Path, millis: i64) -> Result<PathBuf> {
    let bytes = chart_bytes(&chart.image).await?;
    fs::create_dir_all(dir)?;
    let path = dir.join(download_file_name(&chart.chart_type, millis));
    fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    Twitter,
    Facebook,
    LinkedIn,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 3] = [ShareTarget::Twitter, ShareTarget::Facebook, ShareTarget::LinkedIn];

    pub fn label(&self) -> &'static str {
        match self {
            ShareTarget::Twitter => "Twitter",
            ShareTarget::Facebook => "Facebook",
            ShareTarget::LinkedIn => "LinkedIn",
        }
    }

    /// Intent URL for sharing `page_url`.
    pub fn intent_url(&self, chart_type: &str, page_url: &str) -> Result<Url> {
        let url = match self {
            ShareTarget::Twitter => {
                let text = format!(
                    "I created this {} diagram with Plott. #DataVisualization",
                    chart_type
                );
                Url::parse_with_params(
                    "https://twitter.com/intent/tweet",
                    &[("text", text.as_str()), ("url", page_url)],
                )?
            }
            ShareTarget::Facebook => Url::parse_with_params(
                "https://www.facebook.com/sharer/sharer.php",
                &[("u", page_url)],
            )?,
            ShareTarget::LinkedIn => Url::parse_with_params(
                "https://www.linkedin.com/sharing/share-offsite/",
                &[("url", page_url)],
            )?,
        };
        Ok(url)
    }

    /// Open the intent URL in the default browser.
    pub fn open(&self, chart_type: &str, page_url: &str) -> Result<()> {
        let url = self.intent_url(chart_type, page_url)?;
        open::that(url.as_str()).with_context(|| format!("opening {}", url))?;
        Ok(())
    }
}
