//! Generation results as the rest of the app sees them.
//!
//! Whatever shape a service answered with, a [`ChartResult`] always carries an
//! image URI that can be rendered or saved directly.

use serde::{Deserialize, Serialize};

/// Explanation used when the service does not send one.
pub const DEFAULT_EXPLANATION: &str = "Diagram created based on your prompt.";

/// Media type assumed for raw embedded image bytes
pub const EMBEDDED_MEDIA_TYPE: &str = "image/png";

/// Where a chart image lives before it is turned into a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Absolute `http(s)` URL, or an already-built `data:` URI
    Remote(String),
    /// Base64-encoded raster bytes without any scheme prefix
    Embedded(String),
}

impl ImageSource {
    pub fn classify(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http") || raw.starts_with("data:") {
            ImageSource::Remote(raw.to_string())
        } else {
            ImageSource::Embedded(raw.to_string())
        }
    }

    pub fn into_uri(self) -> String {
        match self {
            ImageSource::Remote(url) => url,
            ImageSource::Embedded(b64) => format!("data:{};base64,{}", EMBEDDED_MEDIA_TYPE, b64),
        }
    }
}

/// Turn a service-provided `image` field into a renderable URI.
pub fn image_uri(raw: &str) -> String {
    ImageSource::classify(raw).into_uri()
}

/// One chart option returned for a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartResult {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub reason: String,
    /// Always a remote URL or a `data:` URI
    pub image: String,
}

impl ChartResult {
    pub fn new(chart_type: impl Into<String>, reason: impl Into<String>, image: &str) -> Self {
        Self {
            chart_type: chart_type.into(),
            reason: reason.into(),
            image: image_uri(image),
        }
    }

    pub fn is_embedded(&self) -> bool {
        self.image.starts_with("data:")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub charts: Vec<ChartResult>,
    pub explanation: String,
}

impl GenerationResult {
    pub fn new(charts: Vec<ChartResult>, explanation: Option<String>) -> Self {
        let explanation = explanation
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string());
        Self {
            charts,
            explanation,
        }
    }

    /// The chart selected by default after a submission.
    pub fn first_chart(&self) -> Option<&ChartResult> {
        self.charts.first()
    }
}
