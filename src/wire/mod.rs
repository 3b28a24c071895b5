use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

pub const INVALID_STRUCTURE_MESSAGE: &str = "AI returned an invalid data structure.";

/// ========================================
/// Generation payload
/// ========================================

/// One completed generation. The three fields are only ever applied together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub summary: String,
    pub plan_steps: Vec<String>,
    pub html: String,
}

fn fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^```json\s*|```\s*$").expect("static regex"))
}

/// Remove an accidental ```json ... ``` wrapper around the model output.
pub fn strip_code_fences(raw: &str) -> String {
    fence().replace_all(raw.trim(), "").into_owned()
}

/// Parse the model's text into a `GenerationResult`.
///
/// Malformed JSON is reported as the underlying serde error so the caller can
/// log it. A well-formed object with the wrong shape is `PayloadError::Shape`,
/// shown to the user as [`INVALID_STRUCTURE_MESSAGE`].
pub fn parse_site_payload(raw: &str) -> Result<GenerationResult, PayloadError> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(&cleaned).map_err(PayloadError::Json)?;

    let code = value.get("code").and_then(Value::as_str);
    let summary = value.get("summary").and_then(Value::as_str);
    let steps = value.get("thinkingProcess").and_then(Value::as_array);

    match (code, summary, steps) {
        (Some(code), Some(summary), Some(steps)) => {
            let plan_steps = steps
                .iter()
                .map(|s| match s {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            Ok(GenerationResult {
                summary: summary.to_string(),
                plan_steps,
                html: code.to_string(),
            })
        }
        _ => Err(PayloadError::Shape),
    }
}

#[derive(Debug)]
pub enum PayloadError {
    Json(serde_json::Error),
    Shape,
}

/// ========================================
/// Deployment request/response
/// ========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployFile {
    pub file: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    /// Always serialized as `null`: a static file, no framework preset.
    pub framework: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRequest {
    pub name: String,
    pub files: Vec<DeployFile>,
    pub project_settings: ProjectSettings,
    pub target: String,
}

impl DeploymentRequest {
    pub fn single_page(name: String, html: &str) -> Self {
        Self {
            name,
            files: vec![DeployFile { file: "index.html".into(), data: html.to_string() }],
            project_settings: ProjectSettings { framework: None },
            target: "production".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeploymentResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub error: Option<ProviderError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderError {
    #[serde(default)]
    pub message: Option<String>,
}
