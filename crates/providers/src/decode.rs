//! Response decoding for the generation and enhancement endpoints.
//!
//! Each body is matched against a fixed, ordered list of known shapes. Anything
//! that matches none of them is rejected as malformed rather than partially
//! accepted.

use serde::Deserialize;
use serde_json::Value;
use shared::chart::{ChartResult, GenerationResult};
use shared::error::ClientError;

/// Chart entry as sent over the wire. Services disagree on the name of the
/// discriminator field: `chart_type` wins unless it is blank, then `type`.
#[derive(Debug, Deserialize)]
struct WireChart {
    #[serde(default)]
    chart_type: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    reason: String,
    image: String,
}

impl WireChart {
    fn into_chart(self) -> Option<ChartResult> {
        let chart_type = self
            .chart_type
            .filter(|t| !t.trim().is_empty())
            .or(self.kind)?;
        Some(ChartResult::new(chart_type, self.reason, &self.image))
    }
}

#[derive(Debug, Deserialize)]
struct WireGeneration {
    charts: Vec<WireChart>,
    #[serde(default)]
    explanation: Option<String>,
}

/// Enhancement bodies: a bare JSON string, or an object carrying the text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireEnhancement {
    Bare(String),
    Fields {
        #[serde(default)]
        enhanced_prompt: Option<Value>,
        #[serde(default)]
        result: Option<Value>,
    },
}

fn non_blank(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

impl WireEnhancement {
    fn text(self) -> Option<String> {
        match self {
            WireEnhancement::Bare(s) => Some(s).filter(|s| !s.trim().is_empty()),
            WireEnhancement::Fields {
                enhanced_prompt,
                result,
            } => non_blank(enhanced_prompt.as_ref()).or_else(|| non_blank(result.as_ref())),
        }
    }
}

pub fn decode_generation(endpoint: &str, body: &str) -> Result<GenerationResult, ClientError> {
    let wire: WireGeneration =
        serde_json::from_str(body).map_err(|e| ClientError::MalformedResponse {
            endpoint: endpoint.to_string(),
            message: format!("not a generation result: {}", e),
        })?;

    let charts = wire
        .charts
        .into_iter()
        .map(WireChart::into_chart)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| ClientError::MalformedResponse {
            endpoint: endpoint.to_string(),
            message: "chart entry has no type".to_string(),
        })?;
    Ok(GenerationResult::new(charts, wire.explanation))
}

/// Extract enhanced prompt text. A body that is not JSON at all is treated as
/// a bare string payload.
pub fn decode_enhancement(endpoint: &str, body: &str) -> Result<String, ClientError> {
    let wire = match serde_json::from_str::<WireEnhancement>(body) {
        Ok(wire) => wire,
        Err(_) if serde_json::from_str::<Value>(body).is_err() => {
            WireEnhancement::Bare(body.to_string())
        }
        Err(e) => {
            return Err(ClientError::MalformedResponse {
                endpoint: endpoint.to_string(),
                message: format!("not an enhancement result: {}", e),
            })
        }
    };

    wire.text().ok_or_else(|| ClientError::MalformedResponse {
        endpoint: endpoint.to_string(),
        message: "Received invalid response from server".to_string(),
    })
}

/// Pull the `message` (preferred) or `error` field out of an error body.
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    non_blank(value.get("message")).or_else(|| non_blank(value.get("error")))
}
