// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Warden CLI
//!
//! The `warden` binary enforces team ownership on newly created Datadog
//! resources: it scans the audit log for dashboards and monitors created in
//! the trailing window, attributes each one to a team, and upserts a
//! restriction policy granting that team editor access.
//!
//! ## Commands
//!
//! - `warden sweep dashboards|monitors|all` - Run the enforcement pipelines once
//! - `warden config show|check|generate` - Configuration management
//!
//! One invocation is one pass; run it from cron, a scheduled Lambda, or any
//! other external scheduler on a short interval. Failures are logged, never
//! raised: the process exits normally either way.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod settings;

use commands::{ConfigCommand, SweepCommand};

/// Warden - team ownership enforcement for Datadog resources
#[derive(Parser)]
#[command(name = "warden")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "WARDEN_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "WARDEN_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the enforcement pipelines once
    #[command(name = "sweep")]
    Sweep {
        #[command(subcommand)]
        command: SweepCommand,

        /// Resolve and log, but write no restriction policies
        #[arg(long)]
        dry_run: bool,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; ignore a missing file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Sweep { command, dry_run } => {
            commands::sweep::handle_command(command, cli.config, dry_run).await
        }
        Commands::Config { command } => commands::config::handle_command(command, cli.config),
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
