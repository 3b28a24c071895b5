use anyhow::Context;
use clap::Parser;
use fs_err as fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use underdog::cli::{Args, Command};
use underdog::config::{Config, Credentials};
use underdog::controller::Controller;
use underdog::deploy::{Deployer, DynDeployer, VercelDeployer};
use underdog::{log, provider, ux, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log::init_tracing(args.debug);

    let mut cfg = Config::load(args.config.as_deref())?;
    if let Some(kind) = args.provider.clone() {
        cfg.provider = kind;
    }
    if let Some(model) = args.model.clone() {
        cfg.model = Some(model);
    }
    cfg.save_artifacts |= args.save_artifacts;

    // No key, no app.
    let creds = Credentials::from_env(&cfg.provider)?;
    if creds.vercel_token.is_none() {
        info!("VERCEL_ACCESS_TOKEN not set, deployments will fail until it is");
    }

    let generator = provider::make_provider(&cfg.provider, &cfg, &creds);
    let deployer: DynDeployer = Arc::new(VercelDeployer::new(
        cfg.vercel_deployments_url.clone(),
        creds.vercel_token.clone(),
    ));
    let mut controller = Controller::new(generator, deployer.clone());
    if cfg.save_artifacts {
        controller = controller.with_artifacts(PathBuf::from(&cfg.root));
    }
    let controller = Arc::new(controller);

    let command = args.command.clone().unwrap_or(Command::Serve { host: None, port: None });
    match command {
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| cfg.host.clone());
            let port = port.unwrap_or(cfg.port);
            info!(provider = ?cfg.provider, model = %cfg.model_name(), "starting UI");
            web::serve(controller, &host, port).await?;
        }

        Command::Generate { prompt, out, deploy } => {
            controller.set_prompt(prompt)?;
            let pb = ux::spinner(underdog::prompt::PLANNING_STATUS);
            let state = controller.generate().await?;
            pb.finish_and_clear();

            if let Some(err) = &state.error {
                ux::show_error("Generation failed", err);
                std::process::exit(1);
            }
            ux::show_plan(&state);
            fs::write(&out, &state.code).with_context(|| format!("writing {out}"))?;
            ux::show_saved(&out, state.code.len());

            if deploy {
                let pb = ux::spinner("Deploying...");
                let state = controller.deploy().await?;
                pb.finish_and_clear();
                match (&state.deployment_url, &state.deployment_error) {
                    (Some(url), _) => ux::show_deployed(url),
                    (None, Some(err)) => {
                        ux::show_error("Deployment Failed", err);
                        std::process::exit(1);
                    }
                    (None, None) => {}
                }
            }
        }

        Command::Deploy { file, prompt } => {
            let html = fs::read_to_string(&file).with_context(|| format!("reading {file}"))?;
            let pb = ux::spinner("Deploying...");
            let outcome = deployer.deploy(&html, &prompt).await;
            pb.finish_and_clear();
            match outcome {
                Ok(url) => ux::show_deployed(&url),
                Err(e) => {
                    ux::show_error("Deployment Failed", &e.to_string());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
