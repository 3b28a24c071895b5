use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::errors::{Result, UnderdogError};
use crate::naming;
use crate::wire::{DeploymentRequest, DeploymentResponse};

pub const NO_URL_MESSAGE: &str = "Deployment succeeded, but no URL was returned.";
pub const MISSING_TOKEN_MESSAGE: &str = "VERCEL_ACCESS_TOKEN is not configured.";

/// Publishes one HTML document and returns the live `https://` address.
#[async_trait]
pub trait Deployer: Send + Sync {
    async fn deploy(&self, html: &str, prompt: &str) -> Result<String>;
}

pub type DynDeployer = Arc<dyn Deployer>;

pub struct VercelDeployer {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl VercelDeployer {
    pub fn new(api_url: String, token: Option<String>) -> Self {
        Self { client: Client::new(), api_url, token }
    }
}

/// Map a finished HTTP exchange onto the live URL or the user-facing message.
pub fn interpret_response(status: u16, body: &str) -> Result<String> {
    let parsed = serde_json::from_str::<DeploymentResponse>(body);
    let ok = (200..300).contains(&status);

    if !ok {
        let message = parsed
            .ok()
            .and_then(|r| r.error)
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP error! Status: {status}"));
        return Err(UnderdogError::Deployment(message));
    }

    let parsed = parsed.map_err(|e| {
        UnderdogError::Deployment(format!("Could not read the deployment response: {e}"))
    })?;
    match parsed.url.filter(|u| !u.is_empty()) {
        Some(host) => Ok(format!("https://{host}")),
        None => Err(UnderdogError::Deployment(NO_URL_MESSAGE.to_string())),
    }
}

#[async_trait]
impl Deployer for VercelDeployer {
    async fn deploy(&self, html: &str, prompt: &str) -> Result<String> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| UnderdogError::Deployment(MISSING_TOKEN_MESSAGE.to_string()))?;

        let body = DeploymentRequest::single_page(naming::project_name(prompt), html);
        info!(project = %body.name, bytes = html.len(), "deploying site");
        debug!(url = %self.api_url, "POST");

        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "deployment request failed");
                UnderdogError::Deployment(format!("Deployment request failed: {e}"))
            })?;

        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(|e| {
            UnderdogError::Deployment(format!("Could not read the deployment response: {e}"))
        })?;

        let outcome = interpret_response(status, &text);
        match &outcome {
            Ok(url) => info!(%url, "deployment live"),
            Err(e) => error!(status, error = %e, "deployment rejected"),
        }
        outcome
    }
}
