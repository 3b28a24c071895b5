use parking_lot::Mutex;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::deploy::DynDeployer;
use crate::errors::Result;
use crate::log;
use crate::provider::DynGenerator;
use crate::state::{reduce, AppState, Event, ViewMode};

pub const DOWNLOAD_FILENAME: &str = "index.html";
pub const DOWNLOAD_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// The current document packaged as a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

/// Owns the single view state and the two clients.
///
/// The lock is only held while a transition is applied, never across a
/// network call, so generation and deployment can be in flight together.
pub struct Controller {
    state: Mutex<AppState>,
    generator: DynGenerator,
    deployer: DynDeployer,
    artifacts_root: Option<PathBuf>,
}

impl Controller {
    pub fn new(generator: DynGenerator, deployer: DynDeployer) -> Self {
        Self {
            state: Mutex::new(AppState::default()),
            generator,
            deployer,
            artifacts_root: None,
        }
    }

    pub fn with_artifacts(mut self, root: PathBuf) -> Self {
        self.artifacts_root = Some(root);
        self
    }

    pub fn snapshot(&self) -> AppState {
        self.state.lock().clone()
    }

    fn apply(&self, event: Event) -> Result<AppState> {
        let mut guard = self.state.lock();
        let next = reduce(&guard, event)?;
        *guard = next.clone();
        Ok(next)
    }

    pub fn set_prompt(&self, prompt: String) -> Result<AppState> {
        self.apply(Event::SetPrompt(prompt))
    }

    pub fn set_view(&self, mode: ViewMode) -> Result<AppState> {
        self.apply(Event::SetView(mode))
    }

    /// Enter the generating state and hand back the prompt to send.
    pub fn begin_generate(&self) -> Result<String> {
        let started = self.apply(Event::GenerateStart)?;
        info!(chars = started.prompt.len(), "generation started");
        Ok(started.prompt)
    }

    pub async fn finish_generate(&self, prompt: String) -> Result<AppState> {
        let outcome = self.generator.generate(&prompt).await;
        self.record("generate", || match &outcome {
            Ok(site) => json!({ "prompt": prompt, "result": site }),
            Err(e) => json!({ "prompt": prompt, "error": e.to_string() }),
        })
        .await;
        let event = match outcome {
            Ok(site) => {
                info!(steps = site.plan_steps.len(), bytes = site.html.len(), "generation finished");
                Event::GenerateSuccess(site)
            }
            Err(e) => {
                warn!(error = %e, "generation failed");
                Event::GenerateFailure(e.to_string())
            }
        };
        self.apply(event)
    }

    pub async fn generate(&self) -> Result<AppState> {
        let prompt = self.begin_generate()?;
        self.finish_generate(prompt).await
    }

    /// Start a generation in the background; rejects only when already busy.
    pub fn spawn_generate(self: &Arc<Self>) -> Result<()> {
        let prompt = self.begin_generate()?;
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let _ = this.finish_generate(prompt).await;
        });
        Ok(())
    }

    /// Enter the deploying state; returns the code and prompt as they are now.
    pub fn begin_deploy(&self) -> Result<(String, String)> {
        let started = self.apply(Event::DeployStart)?;
        info!(bytes = started.code.len(), "deployment started");
        Ok((started.code, started.prompt))
    }

    pub async fn finish_deploy(&self, code: String, prompt: String) -> Result<AppState> {
        let outcome = self.deployer.deploy(&code, &prompt).await;
        self.record("deploy", || match &outcome {
            Ok(url) => json!({ "prompt": prompt, "url": url }),
            Err(e) => json!({ "prompt": prompt, "error": e.to_string() }),
        })
        .await;
        let event = match outcome {
            Ok(url) => Event::DeploySuccess(url),
            Err(e) => {
                warn!(error = %e, "deployment failed");
                Event::DeployFailure(e.to_string())
            }
        };
        self.apply(event)
    }

    pub async fn deploy(&self) -> Result<AppState> {
        let (code, prompt) = self.begin_deploy()?;
        self.finish_deploy(code, prompt).await
    }

    pub fn spawn_deploy(self: &Arc<Self>) -> Result<()> {
        let (code, prompt) = self.begin_deploy()?;
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let _ = this.finish_deploy(code, prompt).await;
        });
        Ok(())
    }

    pub fn download(&self) -> Result<Download> {
        let state = self.apply(Event::Download)?;
        Ok(Download {
            filename: DOWNLOAD_FILENAME,
            content_type: DOWNLOAD_CONTENT_TYPE,
            body: state.code,
        })
    }

    /// File writes run on the blocking pool; the caller waits so the artifact
    /// exists before the transition is applied.
    async fn record<F>(&self, stage: &'static str, payload: F)
    where
        F: FnOnce() -> serde_json::Value,
    {
        let Some(root) = self.artifacts_root.clone() else { return };
        let payload = payload();
        let saved =
            tokio::task::spawn_blocking(move || log::save_stage(&root, Uuid::new_v4(), stage, payload)).await;
        match saved {
            Ok(Ok(path)) => info!(path = %path.display(), "{stage} artifact saved"),
            Ok(Err(e)) => warn!(error = %e, "could not save {stage} artifact"),
            Err(e) => warn!(error = %e, "{stage} artifact task failed"),
        }
    }
}
