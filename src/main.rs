//! Binary entry point for orgmcp.
//!
//! This binary provides the CLI interface for the org knowledge-base
//! MCP server.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr/print_stdout in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow unnecessary_wraps for consistent command function signatures
#![allow(clippy::unnecessary_wraps)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use orgmcp::config::OrgConfig;
use orgmcp::mcp::McpServer;
use orgmcp::org::{ResourceAddress, build_catalog, load_documents, resolve};
use std::path::Path;
use std::process::ExitCode;

/// Orgmcp - an MCP server for an org-mode knowledge base.
#[derive(Parser)]
#[command(name = "orgmcp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "ORGMCP_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdio.
    Serve,

    /// Validate the configuration and list the expanded org files.
    Check,

    /// List all addressable resources.
    Resources,

    /// Print the rendered content of one resource address.
    Cat {
        /// The resource address, e.g. `org://category/work` or `all`.
        address: String,
    },
}

/// Main entry point.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Initializes tracing to stderr (stdout carries protocol frames).
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads configuration from the given path or the default locations.
fn load_config(path: Option<&str>) -> Result<OrgConfig, Box<dyn std::error::Error>> {
    if let Some(config_path) = path {
        return OrgConfig::load_from_file(Path::new(config_path)).map_err(Into::into);
    }

    OrgConfig::load_default().map_err(Into::into)
}

/// Runs the selected command.
async fn run_command(
    command: Commands,
    config: &OrgConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve => cmd_serve(config).await,
        Commands::Check => cmd_check(config),
        Commands::Resources => cmd_resources(config).await,
        Commands::Cat { address } => cmd_cat(config, &address).await,
    }
}

/// Serve command.
async fn cmd_serve(config: &OrgConfig) -> Result<(), Box<dyn std::error::Error>> {
    let paths = config.expand_paths()?;
    let server = McpServer::new(paths);
    server.start().await.map_err(Into::into)
}

/// Check command.
fn cmd_check(config: &OrgConfig) -> Result<(), Box<dyn std::error::Error>> {
    let paths = config.expand_paths()?;

    println!("Configuration OK: {} org file(s)", paths.len());
    for path in &paths {
        println!("  {}", path.display());
    }

    Ok(())
}

/// Resources command.
async fn cmd_resources(config: &OrgConfig) -> Result<(), Box<dyn std::error::Error>> {
    let paths = config.expand_paths()?;
    let documents = load_documents(&paths).await?;

    for entry in build_catalog(&documents) {
        println!("{:<50} {}", entry.address.uri(), entry.description);
    }

    Ok(())
}

/// Cat command.
async fn cmd_cat(config: &OrgConfig, address: &str) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = ResourceAddress::parse(address)?;
    let paths = config.expand_paths()?;
    let documents = load_documents(&paths).await?;

    println!("{}", resolve(&parsed, &documents)?);
    Ok(())
}
