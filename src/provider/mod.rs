use async_trait::async_trait;
use std::sync::Arc;
use tracing::error;

use crate::cli::ProviderKind;
use crate::config::{Config, Credentials};
use crate::errors::{Result, UnderdogError};
use crate::wire::{parse_site_payload, GenerationResult, PayloadError, INVALID_STRUCTURE_MESSAGE};

pub mod gemini;
pub mod openai;

/// Shown for every generation failure other than a bad payload shape, so the
/// UI message does not depend on what actually broke.
pub const GENERATION_FAILED_MESSAGE: &str = "The AI failed to generate valid code. This can happen with very complex prompts. Please try rephrasing your request.";

/// One prompt in, one complete site out. A single attempt per call.
#[async_trait]
pub trait SiteGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult>;
}

pub type DynGenerator = Arc<dyn SiteGenerator>;

pub fn make_provider(kind: &ProviderKind, cfg: &Config, creds: &Credentials) -> DynGenerator {
    let model = cfg.model_name();
    match kind {
        ProviderKind::Gemini => Arc::new(gemini::GeminiProvider::new(
            model,
            creds.ai_api_key.clone(),
            cfg.gemini_api_base.clone(),
        )),
        ProviderKind::OpenAI => Arc::new(openai::OpenAIProvider::new(
            model,
            creds.ai_api_key.clone(),
            cfg.openai_api_base.clone(),
        )),
    }
}

/// Turn a backend's raw text (or its failure) into the crate-level outcome.
pub(crate) fn finish(backend: &str, outcome: anyhow::Result<String>) -> Result<GenerationResult> {
    let raw = outcome.map_err(|e| {
        error!(backend, error = ?e, "generation request failed");
        UnderdogError::Generation(GENERATION_FAILED_MESSAGE.to_string())
    })?;

    match parse_site_payload(&raw) {
        Ok(site) => Ok(site),
        Err(PayloadError::Shape) => {
            error!(backend, "model output does not match the site schema");
            Err(UnderdogError::Generation(INVALID_STRUCTURE_MESSAGE.to_string()))
        }
        Err(PayloadError::Json(e)) => {
            error!(backend, error = %e, "model output is not valid JSON");
            Err(UnderdogError::Generation(GENERATION_FAILED_MESSAGE.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn transport_failures_collapse_to_the_fixed_message() {
        let err = finish("test", Err(anyhow!("connection reset by peer"))).unwrap_err();
        assert_eq!(err, UnderdogError::Generation(GENERATION_FAILED_MESSAGE.into()));
        assert!(!err.to_string().contains("connection reset"));
    }

    #[test]
    fn malformed_json_collapses_to_the_fixed_message() {
        let err = finish("test", Ok("<html>not json</html>".into())).unwrap_err();
        assert_eq!(err, UnderdogError::Generation(GENERATION_FAILED_MESSAGE.into()));
    }

    #[test]
    fn shape_mismatch_keeps_its_own_message() {
        let err = finish("test", Ok(r#"{"summary":"S","code":"x"}"#.into())).unwrap_err();
        assert_eq!(err, UnderdogError::Generation(INVALID_STRUCTURE_MESSAGE.into()));
    }

    #[test]
    fn factory_picks_the_backend() {
        let cfg = Config::default();
        let creds = Credentials { ai_api_key: "k".into(), vercel_token: None };
        let _gemini = make_provider(&ProviderKind::Gemini, &cfg, &creds);
        let _openai = make_provider(&ProviderKind::OpenAI, &cfg, &creds);
    }
}
