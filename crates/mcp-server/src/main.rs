//! Modus Migration MCP Server
//!
//! Serves Modus 1.0 -> 2.0 (and MUI -> Modus) component data, markup analysis and tag
//! rewriting to AI agents over MCP stdio.
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "modus-migrate": {
//!       "command": "modus-migrate-mcp",
//!       "args": ["--root", "/path/to/install"]
//!     }
//!   }
//! }
//! ```
//!
//! The install root holds `data/` and `md_prompts/`; see `runtime_env` for the
//! environment overrides.

use anyhow::{Context, Result};
use clap::Parser;
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use std::path::PathBuf;

mod runtime_env;
#[cfg(test)]
mod test_support;
mod tools;

use runtime_env::{CliOverrides, ServerConfig};
use tools::MigrationService;

#[derive(Parser)]
#[command(name = "modus-migrate-mcp")]
#[command(about = "MCP server for Modus component migration", long_about = None)]
#[command(version)]
struct Cli {
    /// Install root containing `data/` and `md_prompts/`
    #[arg(long)]
    root: Option<PathBuf>,

    /// Path to a modus-migrate.toml config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the tool inventory as JSON and exit
    #[arg(long)]
    print_tools: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_tools {
        let inventory = tools::catalog::tool_inventory_json(env!("CARGO_PKG_VERSION"));
        println!(
            "{}",
            serde_json::to_string_pretty(&inventory).context("serialize tool inventory")?
        );
        return Ok(());
    }

    // Logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = ServerConfig::resolve(&CliOverrides {
        root: cli.root,
        config: cli.config,
    })
    .context("resolve server configuration")?;

    log::info!("Starting Modus migration MCP server");

    let service = MigrationService::new(config);
    let server = service.serve(stdio()).await?;
    server.waiting().await?;

    log::info!("Modus migration MCP server stopped");
    Ok(())
}
