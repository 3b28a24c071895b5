use askama::Template;
use askama_derive_axum::IntoResponse as AskamaIntoResponse;

use crate::state::{AppState, ViewMode};

const CODE_FALLBACK: &str = "Click 'Generate Project' to see the code here.";

/// The whole UI: prompt, thinking and output panels rendered from one snapshot.
#[derive(Template, AskamaIntoResponse)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub prompt: String,
    pub error: Option<String>,
    pub busy: bool,
    pub is_generating: bool,
    pub is_deploying: bool,
    pub summary: Option<String>,
    pub plan_steps: Vec<String>,
    pub show_code: bool,
    pub code: String,
    pub code_listing: String,
    pub actions_disabled: bool,
    pub deployment_url: Option<String>,
    pub deployment_error: Option<String>,
}

impl From<&AppState> for IndexTemplate {
    fn from(state: &AppState) -> Self {
        let code_listing = if state.has_code() {
            state.code.clone()
        } else {
            CODE_FALLBACK.to_string()
        };
        Self {
            prompt: state.prompt.clone(),
            error: state.error.clone(),
            busy: state.is_busy(),
            is_generating: state.is_generating,
            is_deploying: state.is_deploying,
            summary: state.summary.clone(),
            plan_steps: state.plan_steps.clone(),
            show_code: state.view_mode == ViewMode::Code,
            code: state.code.clone(),
            code_listing,
            actions_disabled: !state.has_code() || state.is_busy(),
            deployment_url: state.deployment_url.clone(),
            deployment_error: state.deployment_error.clone(),
        }
    }
}
