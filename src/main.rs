//! ui-docs-mcp: component documentation for AI assistants
//!
//! `build` extracts the component catalog from a source tree. `serve` exposes
//! it over MCP.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use ui_docs_mcp::config::{self, Config};
use ui_docs_mcp::docs::pipeline::{write_catalog, CatalogBuilder};
use ui_docs_mcp::docs::ComponentRegistry;
use ui_docs_mcp::error::ConfigError;
use ui_docs_mcp::mcp::McpServer;

/// Component documentation extractor and MCP server.
///
/// Builds a JSON catalog of a React component library and serves it to AI
/// assistants over MCP.
#[derive(Parser, Debug)]
#[command(name = "ui-docs-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the component catalog and write it to disk
    Build {
        /// Project root (overrides the configuration file)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Output file (overrides the configuration file)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Serve the catalog over MCP (HTTP + server-sent events)
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Catalog file (overrides the configuration file)
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Applies subcommand flags over the loaded configuration and re-validates.
fn apply_overrides(cfg: &mut Config, command: &Command) -> Result<(), ConfigError> {
    match command {
        Command::Build { root, output } => {
            if let Some(root) = root {
                cfg.project_root.clone_from(root);
            }
            if let Some(output) = output {
                cfg.catalog_path.clone_from(output);
            }
        }
        Command::Serve {
            host,
            port,
            catalog,
        } => {
            if let Some(host) = host {
                cfg.server.host.clone_from(host);
            }
            if let Some(port) = port {
                cfg.server.port = *port;
            }
            if let Some(catalog) = catalog {
                cfg.catalog_path.clone_from(catalog);
            }
        }
    }
    cfg.validate()
}

/// Runs the extraction pipeline and writes the catalog.
fn run_build(cfg: &Config) -> ExitCode {
    let builder = CatalogBuilder::from_config(cfg);
    let catalog = match builder.build() {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, "Catalog build failed");
            return ExitCode::FAILURE;
        }
    };

    let output = cfg.resolved_catalog_path();
    if let Err(e) = write_catalog(&catalog, &output) {
        error!(error = %e, "Failed to write catalog");
        return ExitCode::FAILURE;
    }

    eprintln!(
        "Documented {} components in {}",
        catalog.total_components,
        output.display()
    );
    ExitCode::SUCCESS
}

/// Loads the catalog and runs the MCP server until shutdown.
fn run_serve(cfg: Config) -> ExitCode {
    let registry = ComponentRegistry::new(cfg.resolved_catalog_path());
    if let Err(e) = registry.load() {
        error!(error = %e, "Failed to load component catalog");
        return ExitCode::FAILURE;
    }

    let server = McpServer::new(Arc::new(registry), cfg.server);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to create Tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(server.run()) {
        Ok(()) => {
            info!("Server shut down gracefully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, address = %server.addr(), "Server error");
            ExitCode::FAILURE
        }
    }
}

/// Entry point for the ui-docs-mcp tool.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let mut cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting ui-docs-mcp");

    if let Err(e) = apply_overrides(&mut cfg, &args.command) {
        error!(error = %e, "Invalid command-line override");
        return ExitCode::FAILURE;
    }

    match args.command {
        Command::Build { .. } => run_build(&cfg),
        Command::Serve { .. } => run_serve(cfg),
    }
}
