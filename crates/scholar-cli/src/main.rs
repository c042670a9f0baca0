//! Scholar CLI - academic research tool-server suite
//!
//! Usage:
//!   scholar serve orchestrator   Serve the workflow orchestrator
//!   scholar serve initiator      Serve the research design server
//!   scholar serve wrangler       Serve the data processing server
//!   scholar serve codegen        Serve the code generation server
//!   scholar serve executor       Serve the code execution server
//!   scholar serve writer         Serve the report writer server
//!
//! Every server speaks one JSON request per line on stdin and answers on
//! stdout; logs go to stderr so the protocol channel stays clean.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use scholar_core::ScholarConfig;
use scholar_protocol::StdioServer;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "scholar")]
#[command(author, version, about = "Academic research tool-server suite")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding scholar.toml (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve one of the tool servers over stdin/stdout
    Serve {
        /// Which server to run
        component: Component,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Component {
    Orchestrator,
    Initiator,
    Wrangler,
    Codegen,
    Executor,
    Writer,
}

impl Component {
    fn name(&self) -> &'static str {
        match self {
            Self::Orchestrator => "orchestrator",
            Self::Initiator => "initiator",
            Self::Wrangler => "wrangler",
            Self::Codegen => "codegen",
            Self::Executor => "executor",
            Self::Writer => "writer",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_dir = cli
        .config_dir
        .unwrap_or_else(|| PathBuf::from("."));
    let config = ScholarConfig::load_or_default(&config_dir)
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Serve { component } => {
            info!(component = component.name(), "starting tool server");
            let registry = match component {
                Component::Orchestrator => scholar_orchestrator::registry(config)?,
                Component::Initiator => scholar_initiator::registry()?,
                Component::Wrangler => scholar_wrangler::registry(config)?,
                Component::Codegen => scholar_codegen::registry()?,
                Component::Executor => scholar_executor::registry(config)?,
                Component::Writer => scholar_writer::registry(config)?,
            };
            StdioServer::new(component.name(), registry)
                .run()
                .await
                .context("tool server failed")?;
        }
    }

    Ok(())
}
