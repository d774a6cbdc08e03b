//! Shopfloor CLI application
//!
//! Command-line interface and MCP server for tracking products through
//! their manufacturing steps.

mod args;
mod cli;
mod mcp;
mod renderer;

use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{log_events, run_stdio_server, ShopfloorMcpServer};
use renderer::TerminalRenderer;
use shopfloor_core::{params::ListProducts, BroadcastEmitter, WorkshopBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let emitter = Arc::new(BroadcastEmitter::default());
    let workshop = WorkshopBuilder::new()
        .with_database_path(database_file)
        .with_emitter(emitter.clone())
        .build()
        .await
        .context("Failed to initialize workshop")?;

    info!("Shopfloor started with {}", workshop.database_path().display());

    let cli = match command {
        Some(Serve) => {
            info!("Starting Shopfloor MCP server");
            tokio::spawn(log_events(emitter.subscribe()));
            run_stdio_server(ShopfloorMcpServer::new(workshop))
                .await
                .context("MCP server failed")?;
            return Ok(ExitCode::SUCCESS);
        }
        _ => Cli::new(workshop, TerminalRenderer::new(!no_color)),
    };

    let result = match command {
        Some(Product { command }) => cli.handle_product_command(command).await,
        Some(Step { command }) => cli.handle_step_command(command).await,
        Some(History) => cli.history().await,
        Some(Serve) | None => cli.list_products(&ListProducts::default()).await,
    };

    cli.finish(result).context("Failed to write output")
}
