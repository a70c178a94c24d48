//! Aula CLI - command-line client for the academic-management backend

mod commands;
mod config;

use anyhow::Result;
use aula_core::tracing::{InstrumentationConfig, LogFileConfig, init_tracing};
use clap::{Parser, ValueEnum};
use commands::Commands;
use std::path::PathBuf;
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "aula")]
#[command(about = "Command-line client for the Aula academic-management backend")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Directory holding the session, configuration and logs
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (defaults to <data-dir>/aula.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = config::resolve_data_dir(cli.data_dir);

    let mut instrumentation = InstrumentationConfig::with_level(cli.log_level.as_str());
    if !cli.no_file_log {
        instrumentation =
            instrumentation.log_to_file(LogFileConfig::new(data_dir.join("logs"), "aula"));
    }
    init_tracing(&instrumentation)?;

    debug!(data_dir = %data_dir.display(), "Starting Aula CLI");

    match cli.command.execute(data_dir, cli.config).await {
        Ok(()) => {
            debug!("Command completed successfully");
        }
        Err(e) => {
            error!("Command failed: {e:#}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}
