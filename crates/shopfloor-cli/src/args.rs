use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ProductCommands, StepCommands};

/// Track products through their manufacturing steps
///
/// Every product owns an ordered list of steps. Completing a step starts the
/// next pending one; completing the last one finalizes the product. Run
/// without a command to list products, or use `serve` to expose the same
/// operations as an MCP (Model Context Protocol) server over stdio.
#[derive(Parser)]
#[command(version, about, name = "sf")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/shopfloor/shopfloor.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage products
    #[command(alias = "p")]
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Manage the steps of a product
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Show finalized products, most recent first
    #[command(alias = "h")]
    History,
    /// Start the MCP server
    Serve,
}
