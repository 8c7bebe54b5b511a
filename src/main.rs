use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lesson_rename::RenameEngine;
use lesson_rename::config::{self, RenameConfig};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(renamed) => {
            info!("Done, {} videos renamed", renamed);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<usize> {
    config::load_env_file()?;
    let config = RenameConfig::from_env().context("invalid configuration")?;

    info!(
        "Renaming lessons in {} using {}",
        config.videos_folder.display(),
        config.names_file().display()
    );

    let engine = RenameEngine::new(config)?;
    let summary = engine.run().await?;
    summary.log();

    let renamed = summary.into_result().context("batch rename failed")?;
    Ok(renamed)
}
