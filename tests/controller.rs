use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use underdog::controller::{Controller, DOWNLOAD_CONTENT_TYPE, DOWNLOAD_FILENAME};
use underdog::deploy::Deployer;
use underdog::errors::{Axis, Result, UnderdogError};
use underdog::prompt::PLACEHOLDER_DOCUMENT;
use underdog::provider::{SiteGenerator, GENERATION_FAILED_MESSAGE};
use underdog::state::ViewMode;
use underdog::wire::GenerationResult;

/// Returns a fixed outcome, optionally waiting for `gate` first.
struct FakeGenerator {
    outcome: Result<GenerationResult>,
    gate: Option<Arc<Notify>>,
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl SiteGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        self.prompts.lock().push(prompt.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcome.clone()
    }
}

/// Hands out a different site on each call.
struct ScriptedGenerator {
    sites: Mutex<VecDeque<GenerationResult>>,
}

#[async_trait]
impl SiteGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<GenerationResult> {
        self.sites
            .lock()
            .pop_front()
            .ok_or_else(|| UnderdogError::Generation("script exhausted".into()))
    }
}

struct FakeDeployer {
    outcome: Result<String>,
    gate: Option<Arc<Notify>>,
    received: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Deployer for FakeDeployer {
    async fn deploy(&self, html: &str, prompt: &str) -> Result<String> {
        self.received.lock().push((html.to_string(), prompt.to_string()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcome.clone()
    }
}

fn site(tag: &str) -> GenerationResult {
    GenerationResult {
        summary: format!("{tag} summary"),
        plan_steps: vec![format!("{tag} step 1"), format!("{tag} step 2")],
        html: format!("<html>{tag}</html>"),
    }
}

fn generator(outcome: Result<GenerationResult>, gate: Option<Arc<Notify>>) -> Arc<FakeGenerator> {
    Arc::new(FakeGenerator { outcome, gate, prompts: Mutex::new(Vec::new()) })
}

fn deployer(outcome: Result<String>, gate: Option<Arc<Notify>>) -> Arc<FakeDeployer> {
    Arc::new(FakeDeployer { outcome, gate, received: Mutex::new(Vec::new()) })
}

async fn wait_until<F: Fn() -> bool>(cond: F) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached");
}

#[tokio::test]
async fn successful_generation_lands_in_preview() {
    let fake = generator(Ok(site("cafe")), None);
    let ctl = Controller::new(fake.clone(), deployer(Ok("https://x".into()), None));
    ctl.set_prompt("a cafe".into()).unwrap();
    ctl.set_view(ViewMode::Code).unwrap();

    let state = ctl.generate().await.unwrap();
    assert_eq!(state.view_mode, ViewMode::Preview);
    assert_eq!(state.code, "<html>cafe</html>");
    assert_eq!(state.summary.as_deref(), Some("cafe summary"));
    assert_eq!(state.plan_steps.len(), 2);
    assert!(!state.is_generating);
    assert_eq!(fake.prompts.lock().as_slice(), ["a cafe".to_string()]);
}

#[tokio::test]
async fn failed_generation_lands_in_code_with_placeholder() {
    let fake = generator(Err(UnderdogError::Generation(GENERATION_FAILED_MESSAGE.into())), None);
    let ctl = Controller::new(fake, deployer(Ok("https://x".into()), None));

    let state = ctl.generate().await.unwrap();
    assert_eq!(state.view_mode, ViewMode::Code);
    assert_eq!(state.code, PLACEHOLDER_DOCUMENT);
    assert!(state.summary.is_none());
    assert!(state.plan_steps.is_empty());
    assert_eq!(
        state.error.as_deref(),
        Some(format!("Failed to generate code: {GENERATION_FAILED_MESSAGE}").as_str())
    );
}

#[tokio::test]
async fn second_generate_while_running_is_busy() {
    let gate = Arc::new(Notify::new());
    let ctl = Arc::new(Controller::new(
        generator(Ok(site("a")), Some(gate.clone())),
        deployer(Ok("https://x".into()), None),
    ));

    ctl.spawn_generate().unwrap();
    assert!(ctl.snapshot().is_generating);
    assert_eq!(ctl.spawn_generate(), Err(UnderdogError::Busy(Axis::Generation)));
    // Nothing generated yet, so nothing to deploy either.
    assert_eq!(ctl.spawn_deploy(), Err(UnderdogError::NoCode));

    gate.notify_one();
    wait_until(|| !ctl.snapshot().is_generating).await;
    assert_eq!(ctl.snapshot().code, "<html>a</html>");
}

#[tokio::test]
async fn deploy_success_and_failure_leave_code_alone() {
    let ok = deployer(Ok("https://cafe.vercel.app".into()), None);
    let ctl = Controller::new(generator(Ok(site("cafe")), None), ok.clone());
    ctl.set_prompt("a cafe".into()).unwrap();
    ctl.generate().await.unwrap();

    let state = ctl.deploy().await.unwrap();
    assert_eq!(state.deployment_url.as_deref(), Some("https://cafe.vercel.app"));
    assert!(!state.is_deploying);
    assert_eq!(
        ok.received.lock().as_slice(),
        [("<html>cafe</html>".to_string(), "a cafe".to_string())]
    );

    let failing = deployer(Err(UnderdogError::Deployment("Name taken".into())), None);
    let ctl = Controller::new(generator(Ok(site("cafe")), None), failing);
    ctl.generate().await.unwrap();
    let state = ctl.deploy().await.unwrap();
    assert_eq!(state.deployment_error.as_deref(), Some("Name taken"));
    assert_eq!(state.code, "<html>cafe</html>");
    assert!(state.error.is_none());
}

#[tokio::test]
async fn deploy_uses_the_snapshot_taken_when_it_started() {
    let deploy_gate = Arc::new(Notify::new());
    let dep = deployer(Ok("https://first.vercel.app".into()), Some(deploy_gate.clone()));
    let ctl = Arc::new(Controller::new(generator(Ok(site("first")), None), dep.clone()));
    ctl.set_prompt("first prompt".into()).unwrap();
    ctl.generate().await.unwrap();

    ctl.spawn_deploy().unwrap();
    assert_eq!(ctl.spawn_deploy(), Err(UnderdogError::Busy(Axis::Deployment)));
    wait_until(|| !dep.received.lock().is_empty()).await;

    // A prompt edit while the deployment is in flight does not change what ships.
    ctl.set_prompt("second prompt".into()).unwrap();
    deploy_gate.notify_one();
    wait_until(|| !ctl.snapshot().is_deploying).await;

    assert_eq!(
        dep.received.lock().as_slice(),
        [("<html>first</html>".to_string(), "first prompt".to_string())]
    );
    assert_eq!(ctl.snapshot().deployment_url.as_deref(), Some("https://first.vercel.app"));
}

#[tokio::test]
async fn generation_finishing_mid_deploy_does_not_change_what_ships() {
    let deploy_gate = Arc::new(Notify::new());
    let dep = deployer(Ok("https://first.vercel.app".into()), Some(deploy_gate.clone()));
    let scripted = Arc::new(ScriptedGenerator {
        sites: Mutex::new(VecDeque::from([site("first"), site("second")])),
    });
    let ctl = Arc::new(Controller::new(scripted, dep.clone()));
    ctl.set_prompt("first prompt".into()).unwrap();
    ctl.generate().await.unwrap();

    ctl.spawn_deploy().unwrap();
    wait_until(|| !dep.received.lock().is_empty()).await;

    ctl.set_prompt("second prompt".into()).unwrap();
    let regenerated = ctl.generate().await.unwrap();
    assert_eq!(regenerated.code, "<html>second</html>");
    assert!(regenerated.is_deploying);

    deploy_gate.notify_one();
    wait_until(|| !ctl.snapshot().is_deploying).await;

    assert_eq!(
        dep.received.lock().as_slice(),
        [("<html>first</html>".to_string(), "first prompt".to_string())]
    );
    let state = ctl.snapshot();
    assert_eq!(state.code, "<html>second</html>");
    // The late deployment still reports its own URL.
    assert_eq!(state.deployment_url.as_deref(), Some("https://first.vercel.app"));
}

#[tokio::test]
async fn download_exports_current_code() {
    let ctl = Controller::new(generator(Ok(site("shop")), None), deployer(Ok("https://x".into()), None));
    let before = ctl.download().unwrap();
    assert_eq!(before.body, PLACEHOLDER_DOCUMENT);

    ctl.generate().await.unwrap();
    let snapshot = ctl.snapshot();
    let file = ctl.download().unwrap();
    assert_eq!(file.filename, DOWNLOAD_FILENAME);
    assert_eq!(file.content_type, DOWNLOAD_CONTENT_TYPE);
    assert_eq!(file.body, "<html>shop</html>");
    assert_eq!(ctl.snapshot(), snapshot);
}

#[tokio::test]
async fn artifacts_are_written_when_enabled() {
    let tmp = tempfile::tempdir().unwrap();
    let ctl = Controller::new(generator(Ok(site("art")), None), deployer(Ok("https://x".into()), None))
        .with_artifacts(tmp.path().to_path_buf());
    ctl.generate().await.unwrap();

    let tx_root = tmp.path().join(".underdog").join("tx");
    let entries: Vec<_> = std::fs::read_dir(&tx_root).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let dir = entries.into_iter().next().unwrap().unwrap().path();
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("generate.json")).unwrap()).unwrap();
    assert_eq!(saved["payload"]["result"]["html"], "<html>art</html>");
}
