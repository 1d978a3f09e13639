mod api;
mod config;
mod session;

use canvas::engine::Engine;
use canvas::render::HeadlessRenderer;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::api::{ApiClient, ApiError};
use crate::config::{Cli, Command, ConfigError, SessionConfig};
use crate::session::SessionError;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("failed to render json: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = ApiClient::new(&cli.rest_url);

    match cli.command {
        Command::Projects => {
            for project in api.list_projects().await? {
                println!("{}\t{}", project.uid, project.name);
            }
            Ok(())
        }
        Command::Create => {
            let project = api.create_project().await?;
            println!("{}", project.uid);
            Ok(())
        }
        Command::Objects { project } => {
            let objects = api.fetch_objects(&project).await?;
            println!("{}", serde_json::to_string_pretty(&frames::ObjectList { objects })?);
            Ok(())
        }
        Command::Run(args) => {
            let config = SessionConfig::from_args(&cli.rest_url, &cli.ws_url, &args)?;
            run(&api, &config).await
        }
    }
}

async fn run(api: &ApiClient, config: &SessionConfig) -> Result<(), AppError> {
    let objects = api.fetch_objects(&config.project).await?;
    tracing::info!(project = %config.project, objects = objects.len(), "project loaded");

    let mut engine = Engine::new(HeadlessRenderer::new(), config.capability);
    engine.on_resize(config.viewport.0, config.viewport.1);
    engine.core.playback = canvas::playback::Playback::new(config.step);
    engine.load_objects(objects);

    let summary = session::run(config, &mut engine).await?;
    tracing::info!(
        ticks = summary.ticks,
        frames = summary.frames_applied,
        skipped = summary.updates_skipped,
        received = summary.sync.frames_received,
        reports = summary.sync.reports_sent,
        dropped = summary.sync.dropped,
        completed = summary.completed,
        "session finished"
    );

    if config.save {
        api.save_objects(&config.project, engine.core.save_objects()).await?;
        tracing::info!(project = %config.project, "poses saved");
    }
    Ok(())
}
