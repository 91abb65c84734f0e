// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Sweep commands: run the enforcement pipelines once.
//!
//! One Datadog client is built per invocation and shared by every stage.
//! Pipelines are isolated from each other under `sweep all`, and failures
//! never escape as a process error: the scheduler that invokes Warden only
//! ever sees logs.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

use warden_core::application::{SweepReport, Sweeper};
use warden_core::domain::resource::ResourceKind;
use warden_core::infrastructure::DatadogClient;

use crate::settings::Settings;

#[derive(Subcommand)]
pub enum SweepCommand {
    /// Sweep dashboards created in the last minute
    Dashboards,
    /// Sweep monitors created in the last minute
    Monitors,
    /// Sweep both resource kinds
    All,
}

impl SweepCommand {
    fn kinds(&self) -> Vec<ResourceKind> {
        match self {
            SweepCommand::Dashboards => vec![ResourceKind::Dashboard],
            SweepCommand::Monitors => vec![ResourceKind::Monitor],
            SweepCommand::All => vec![ResourceKind::Dashboard, ResourceKind::Monitor],
        }
    }
}

pub async fn handle_command(
    command: SweepCommand,
    config: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    if let Err(err) = run(command, config, dry_run).await {
        error!("sweep aborted: {err:#}");
    }
    Ok(())
}

async fn run(command: SweepCommand, config: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let settings = Settings::load(config.as_deref())?;

    let client = Arc::new(DatadogClient::new(settings.datadog())?);
    let sweeper = Sweeper::new(
        client.clone(),
        client.clone(),
        client.clone(),
        client,
        settings.grants,
        dry_run,
    );

    for kind in command.kinds() {
        match sweeper.sweep(kind).await {
            Ok(report) => print_report(&report, dry_run),
            // a failed scan aborts this pipeline only; `all` keeps going
            Err(err) => error!(kind = %kind, "sweep failed: {err}"),
        }
    }

    Ok(())
}

fn print_report(report: &SweepReport, dry_run: bool) {
    let headline = format!("{}s", report.kind);
    let mode = if dry_run { " (dry run)".dimmed().to_string() } else { String::new() };

    println!(
        "{}{}: {} discovered, {} granted, {} skipped, {} failed",
        headline.bold(),
        mode,
        report.discovered,
        report.granted.len().to_string().green(),
        report.skipped.to_string().yellow(),
        report.failed.to_string().red(),
    );

    for id in &report.granted {
        println!("  {} {}:{}", "granted".green(), report.kind, id);
    }
}
