// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration commands: show, check, generate.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use crate::settings::{Settings, DEFAULT_CONFIG_FILE, TEMPLATE};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the resolved configuration with secrets redacted
    Show,
    /// Validate that a complete configuration can be resolved
    Check,
    /// Write a starter warden.yaml to the current directory
    Generate {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn handle_command(command: ConfigCommand, config: Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let settings = Settings::load(config.as_deref())?;
            println!("{settings}");
            Ok(())
        }
        ConfigCommand::Check => match Settings::load(config.as_deref()) {
            Ok(settings) => {
                println!(
                    "{} configuration resolved for site {}",
                    "ok:".green().bold(),
                    settings.site
                );
                Ok(())
            }
            Err(err) => {
                println!("{} {err:#}", "invalid:".red().bold());
                Ok(())
            }
        },
        ConfigCommand::Generate { force } => {
            let path = config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            if path.exists() && !force {
                bail!(
                    "{} already exists; pass --force to overwrite",
                    path.display()
                );
            }
            std::fs::write(&path, TEMPLATE)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} wrote {}", "ok:".green().bold(), path.display());
            Ok(())
        }
    }
}
