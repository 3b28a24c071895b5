use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::{finish, SiteGenerator};
use crate::errors::Result;
use crate::prompt;
use crate::wire::GenerationResult;

pub struct GeminiProvider {
    model: String,
    api_key: String,
    api_base: String,
    client: Client,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiProvider {
    pub fn new(model: String, api_key: String, api_base: String) -> Self {
        Self { model, api_key, api_base, client: Client::new() }
    }

    fn request_body(user_prompt: &str) -> Value {
        json!({
            "systemInstruction": { "parts": [{ "text": prompt::system_instruction() }] },
            "contents": [{ "role": "user", "parts": [{ "text": user_prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": prompt::gemini_response_schema()
            }
        })
    }

    async fn request_text(&self, prompt: &str) -> anyhow::Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        );
        debug!(%url, "POST");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(prompt))
            .send()
            .await
            .context("gemini request failed")?;

        let status = resp.status();
        let text = resp.text().await.context("gemini read body failed")?;
        if !status.is_success() {
            return Err(anyhow!("Gemini API error ({status}): {text}"));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("gemini response parse error: {e}"))?;

        let content: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .ok_or_else(|| anyhow!("gemini: no candidates in response"))?;

        if content.trim().is_empty() {
            return Err(anyhow!("gemini: empty content"));
        }
        Ok(content)
    }
}

#[async_trait]
impl SiteGenerator for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        info!(model = %self.model, "generating site with gemini");
        finish("gemini", self.request_text(prompt).await)
    }
}
