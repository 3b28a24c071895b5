use axum::{
    extract::{Form, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::controller::Controller;
use crate::state::ViewMode;

pub mod render;

pub type SharedController = Arc<Controller>;

#[derive(Debug, Deserialize)]
pub struct PromptForm {
    pub prompt: String,
}

pub fn build_router(controller: SharedController) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/state", get(state_json))
        .route("/prompt", post(set_prompt))
        .route("/generate", post(generate))
        .route("/deploy", post(deploy))
        .route("/view/{mode}", post(set_view))
        .route("/download", get(download))
        .with_state(controller)
}

pub async fn serve(controller: SharedController, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, build_router(controller))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

fn back_home() -> Redirect {
    Redirect::to("/")
}

async fn index(State(ctl): State<SharedController>) -> render::IndexTemplate {
    render::IndexTemplate::from(&ctl.snapshot())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn state_json(State(ctl): State<SharedController>) -> Json<crate::state::AppState> {
    Json(ctl.snapshot())
}

async fn set_prompt(State(ctl): State<SharedController>, Form(form): Form<PromptForm>) -> Redirect {
    if let Err(e) = ctl.set_prompt(form.prompt) {
        warn!(error = %e, "prompt not updated");
    }
    back_home()
}

async fn generate(State(ctl): State<SharedController>, Form(form): Form<PromptForm>) -> Redirect {
    if ctl.snapshot().is_generating {
        warn!("generate ignored, one is already running");
        return back_home();
    }
    let applied = ctl.set_prompt(form.prompt).and_then(|_| ctl.spawn_generate());
    if let Err(e) = applied {
        warn!(error = %e, "generate ignored");
    }
    back_home()
}

async fn deploy(State(ctl): State<SharedController>) -> Redirect {
    if let Err(e) = ctl.spawn_deploy() {
        warn!(error = %e, "deploy ignored");
    }
    back_home()
}

async fn set_view(State(ctl): State<SharedController>, Path(mode): Path<String>) -> Response {
    let Some(mode) = ViewMode::parse(&mode) else {
        return (StatusCode::NOT_FOUND, "unknown view").into_response();
    };
    if let Err(e) = ctl.set_view(mode) {
        warn!(error = %e, "view not changed");
    }
    back_home().into_response()
}

async fn download(State(ctl): State<SharedController>) -> Response {
    match ctl.download() {
        Ok(file) => (
            [
                (header::CONTENT_TYPE, file.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file.filename),
                ),
            ],
            file.body,
        )
            .into_response(),
        Err(e) => (StatusCode::CONFLICT, e.to_string()).into_response(),
    }
}
