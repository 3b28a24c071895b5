//! View state and the pure transition function that drives it.
//!
//! Every user action and every completed network call becomes an [`Event`];
//! [`reduce`] returns the next [`AppState`] without touching the old one.

use serde::{Deserialize, Serialize};

use crate::errors::{Axis, Result, UnderdogError};
use crate::prompt::{INITIAL_PROMPT, INITIAL_SUMMARY, PLACEHOLDER_DOCUMENT, PLANNING_STATUS};
use crate::wire::GenerationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Code,
    #[default]
    Preview,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Code => "code",
            ViewMode::Preview => "preview",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "code" => Some(ViewMode::Code),
            "preview" => Some(ViewMode::Preview),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppState {
    pub prompt: String,
    pub code: String,
    pub summary: Option<String>,
    pub plan_steps: Vec<String>,
    pub is_generating: bool,
    pub error: Option<String>,
    pub is_deploying: bool,
    pub deployment_url: Option<String>,
    pub deployment_error: Option<String>,
    pub view_mode: ViewMode,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            prompt: INITIAL_PROMPT.to_string(),
            code: PLACEHOLDER_DOCUMENT.to_string(),
            summary: Some(INITIAL_SUMMARY.to_string()),
            plan_steps: Vec::new(),
            is_generating: false,
            error: None,
            is_deploying: false,
            deployment_url: None,
            deployment_error: None,
            view_mode: ViewMode::Preview,
        }
    }
}

impl AppState {
    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.is_generating || self.is_deploying
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SetPrompt(String),
    SetView(ViewMode),
    GenerateStart,
    GenerateSuccess(GenerationResult),
    GenerateFailure(String),
    DeployStart,
    DeploySuccess(String),
    DeployFailure(String),
    Download,
}

pub fn reduce(state: &AppState, event: Event) -> Result<AppState> {
    let mut next = state.clone();
    match event {
        Event::SetPrompt(prompt) => next.prompt = prompt,
        Event::SetView(mode) => next.view_mode = mode,

        Event::GenerateStart => {
            if state.is_generating {
                return Err(UnderdogError::Busy(Axis::Generation));
            }
            next.is_generating = true;
            next.error = None;
            next.summary = Some(PLANNING_STATUS.to_string());
            next.plan_steps.clear();
            next.deployment_url = None;
            next.deployment_error = None;
            next.code.clear();
        }
        Event::GenerateSuccess(site) => {
            next.is_generating = false;
            next.summary = Some(site.summary);
            next.plan_steps = site.plan_steps;
            next.code = site.html;
            next.view_mode = ViewMode::Preview;
        }
        Event::GenerateFailure(message) => {
            next.is_generating = false;
            next.error = Some(format!("Failed to generate code: {message}"));
            next.code = PLACEHOLDER_DOCUMENT.to_string();
            next.summary = None;
            next.plan_steps.clear();
            next.view_mode = ViewMode::Code;
        }

        Event::DeployStart => {
            if state.is_deploying {
                return Err(UnderdogError::Busy(Axis::Deployment));
            }
            if !state.has_code() {
                return Err(UnderdogError::NoCode);
            }
            next.is_deploying = true;
            next.deployment_url = None;
            next.deployment_error = None;
        }
        Event::DeploySuccess(url) => {
            next.is_deploying = false;
            next.deployment_url = Some(url);
        }
        Event::DeployFailure(message) => {
            next.is_deploying = false;
            next.deployment_error = Some(message);
        }

        // The export itself is a side effect of the caller.
        Event::Download => {
            if !state.has_code() {
                return Err(UnderdogError::NoCode);
            }
        }
    }
    Ok(next)
}
