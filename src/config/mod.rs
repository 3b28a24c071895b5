use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::ProviderKind;
use crate::errors::{Result, UnderdogError};

pub const DEFAULT_CONFIG_FILE: &str = "underdog.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderKind,
    pub model: Option<String>,
    pub gemini_api_base: String,
    pub openai_api_base: String,
    pub vercel_deployments_url: String,
    pub host: String,
    pub port: u16,
    pub root: String,
    pub save_artifacts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Gemini,
            model: None,
            gemini_api_base: "https://generativelanguage.googleapis.com".into(),
            openai_api_base: "https://api.openai.com".into(),
            vercel_deployments_url: "https://api.vercel.com/v13/deployments".into(),
            host: "127.0.0.1".into(),
            port: 5173,
            root: ".".into(),
            save_artifacts: false,
        }
    }
}

impl Config {
    /// Read `path` if given, else `underdog.toml` when it exists, else defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(p) => Path::new(p).to_path_buf(),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default.to_path_buf()
            }
        };
        let text = fs::read_to_string(&path)
            .map_err(|e| UnderdogError::Config(e.to_string()))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| UnderdogError::Config(format!("invalid config: {e}")))
    }

    pub fn model_name(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }
}

/// Secrets are only ever read from the process environment.
#[derive(Clone, Default)]
pub struct Credentials {
    pub ai_api_key: String,
    pub vercel_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("ai_api_key", &"<redacted>")
            .field("vercel_token", &self.vercel_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Credentials {
    pub fn from_env(provider: &ProviderKind) -> Result<Self> {
        Self::from_lookup(provider, |k| std::env::var(k).ok())
    }

    /// A missing AI key is fatal; the hosting token is optional until a deploy.
    pub fn from_lookup<F>(provider: &ProviderKind, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
        let ai_api_key = provider
            .key_vars()
            .iter()
            .find_map(|k| non_empty(*k))
            .ok_or_else(|| {
                UnderdogError::Config(format!(
                    "{} environment variable not set",
                    provider.key_vars().join(" or ")
                ))
            })?;
        Ok(Self {
            ai_api_key,
            vercel_token: non_empty("VERCEL_ACCESS_TOKEN"),
        })
    }
}
