//! Subcommand handlers for AutoFrame.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use autoframe_config::Config;
use autoframe_core::{FrameStatus, Orchestrator, PipelineSettings};
use autoframe_host_memory::MemoryHost;
use autoframe_predictor_http::HttpPredictor;
use autoframe_protocols::{PanelMessage, PluginMessage};

use crate::cli::Commands;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Dispatch a parsed subcommand.
pub(crate) async fn run(command: Commands, config: &Config) -> CommandResult {
    match command {
        Commands::Export {
            document,
            output,
            save,
        } => export(&document, output, save, config).await,
        Commands::Resize {
            document,
            width,
            height,
            frames,
            endpoint,
            save,
        } => resize(&document, width, height, frames, endpoint, save, config).await,
        Commands::Panel {
            document,
            endpoint,
            save,
        } => panel(&document, endpoint, save, config).await,
    }
}

fn build(
    document: &Path,
    endpoint: Option<String>,
    config: &Config,
) -> Result<(Arc<MemoryHost>, Orchestrator), Box<dyn std::error::Error>> {
    let host = Arc::new(MemoryHost::load(document)?);
    info!("Loaded document: {}", document.display());

    let mut predictor_config = config.predictor.clone();
    if let Some(endpoint) = endpoint {
        predictor_config.endpoint = endpoint;
    }
    let predictor = Arc::new(HttpPredictor::from_config(&predictor_config)?);
    info!("Prediction endpoint: {}", predictor.endpoint());

    let orchestrator = Orchestrator::new(host.clone(), predictor, PipelineSettings::from(config));
    Ok((host, orchestrator))
}

fn save_document(host: &MemoryHost, save: Option<PathBuf>) -> CommandResult {
    if let Some(path) = save {
        host.save(&path)?;
        info!("Saved document to {}", path.display());
    }
    Ok(())
}

async fn export(
    document: &Path,
    output: Option<PathBuf>,
    save: Option<PathBuf>,
    config: &Config,
) -> CommandResult {
    let (host, orchestrator) = build(document, None, config)?;
    let bundle = orchestrator.export().await?;
    let json = bundle.to_json()?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            info!("Export written to {}", path.display());
        }
        None => println!("{}", json),
    }

    save_document(&host, save)
}

async fn resize(
    document: &Path,
    width: f64,
    height: f64,
    frames: Vec<String>,
    endpoint: Option<String>,
    save: Option<PathBuf>,
    config: &Config,
) -> CommandResult {
    let (host, orchestrator) = build(document, endpoint, config)?;
    if !frames.is_empty() {
        host.set_selection(frames);
    }

    let report = orchestrator.resize_selection(width, height).await?;

    for outcome in &report.frames {
        match &outcome.status {
            FrameStatus::Applied { clone_id, applied } => {
                println!(
                    "{}: applied {} element(s) to {}",
                    outcome.frame_name,
                    applied.len(),
                    clone_id
                );
            }
            FrameStatus::Partial {
                clone_id,
                applied,
                skipped,
            } => {
                println!(
                    "{}: applied {} element(s) to {}, skipped {}",
                    outcome.frame_name,
                    applied.len(),
                    clone_id,
                    skipped.len()
                );
            }
            FrameStatus::Failed { error } => {
                println!("{}: failed: {}", outcome.frame_name, error);
            }
        }
    }

    save_document(&host, save)?;

    if report.failed_count() > 0 {
        return Err(format!("{} frame(s) failed", report.failed_count()).into());
    }
    Ok(())
}

async fn panel(
    document: &Path,
    endpoint: Option<String>,
    save: Option<PathBuf>,
    config: &Config,
) -> CommandResult {
    let (host, orchestrator) = build(document, endpoint, config)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let message: PanelMessage = match serde_json::from_str(&line) {
            Ok(message) => message,
            Err(e) => {
                warn!("Ignoring malformed panel message: {}", e);
                continue;
            }
        };

        for reply in orchestrator.handle_message(message).await {
            stdout.write_all(encode_reply(&reply)?.as_bytes()).await?;
        }
        stdout.flush().await?;
    }

    save_document(&host, save)
}

fn encode_reply(reply: &PluginMessage) -> Result<String, serde_json::Error> {
    let mut line = serde_json::to_string(reply)?;
    line.push('\n');
    Ok(line)
}
