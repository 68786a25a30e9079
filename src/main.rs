mod actors;
mod app_system;
mod catalog;
mod clients;
mod config;
mod domain;
mod messages;
mod shell;

#[cfg(test)]
mod mock_framework;

use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info};

use crate::app_system::{setup_tracing, InventorySystem};
use crate::config::{AppConfig, CliArgs};
use crate::shell::Shell;

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = AppConfig::from_args(CliArgs::parse());
    setup_tracing(&config.log_filter);

    info!(channel_capacity = config.channel_capacity, "Starting inventory tracker");

    let system = InventorySystem::new(config.channel_capacity);

    if config.sample_data {
        system
            .load_sample_data()
            .await
            .map_err(|e| e.to_string())?;
    }

    let mut shell = Shell::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        system.inventory_client.clone(),
    );
    let outcome = shell.run().await;
    drop(shell);

    if let Err(e) = &outcome {
        error!(error = %e, "Menu loop failed");
    }

    system.shutdown().await?;
    outcome.map_err(|e| e.to_string())
}
