// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Configuration loading.
//!
//! Sources, later ones winning:
//!
//! 1. `warden.yaml` (the `--config` path, `WARDEN_CONFIG_PATH`, or
//!    `./warden.yaml` if present)
//! 2. Environment variables: `DD_SITE`, `DD_API_KEY`, `DD_APP_KEY`,
//!    `WARDEN_EDITOR_ROLE`, `WARDEN_VIEWER_ORG`
//!
//! Credentials must be present before any remote call; everything is
//! validated up front so the pipelines never observe a half-built
//! configuration.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use uuid::Uuid;

use warden_core::domain::policy::StandingGrants;
use warden_core::infrastructure::DatadogConfig;

pub const DEFAULT_SITE: &str = "datadoghq.eu";
pub const DEFAULT_CONFIG_FILE: &str = "warden.yaml";

/// Starter configuration written by `warden config generate`.
pub const TEMPLATE: &str = "\
# Warden configuration
#
# Credentials may also come from DD_API_KEY / DD_APP_KEY environment
# variables, which override values in this file.
site: datadoghq.eu
api_key: \"\"
app_key: \"\"
grants:
  # Role granted editor access alongside the owning team
  editor_role: 00000000-0000-0000-0000-000000000000
  # Organization granted viewer access
  viewer_org: 00000000-0000-0000-0000-000000000000
";

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub site: String,
    pub api_key: String,
    pub app_key: String,
    pub grants: StandingGrants,
}

impl Settings {
    /// Load from the given file (or the default discovery path) plus process
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?,
            ),
            None => match std::fs::read_to_string(DEFAULT_CONFIG_FILE) {
                Ok(contents) => Some(contents),
                Err(_) => None,
            },
        };

        Self::resolve(file.as_deref(), &|key| std::env::var(key).ok())
    }

    /// Pure resolution from an optional file body and an environment lookup.
    /// Split out so tests control both sources.
    pub fn resolve(file: Option<&str>, env: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let raw: RawSettings = match file {
            Some(contents) => {
                serde_yaml::from_str(contents).context("Failed to parse config file")?
            }
            None => RawSettings::default(),
        };

        let site = env("DD_SITE")
            .or(raw.site)
            .unwrap_or_else(|| DEFAULT_SITE.to_string());
        let api_key = env("DD_API_KEY")
            .or(raw.api_key)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow!("Missing Datadog API key (api_key / DD_API_KEY)"))?;
        let app_key = env("DD_APP_KEY")
            .or(raw.app_key)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow!("Missing Datadog application key (app_key / DD_APP_KEY)"))?;

        let raw_grants = raw.grants.unwrap_or_default();
        let editor_role = resolve_uuid(
            env("WARDEN_EDITOR_ROLE"),
            raw_grants.editor_role,
            "editor role (grants.editor_role / WARDEN_EDITOR_ROLE)",
        )?;
        let viewer_org = resolve_uuid(
            env("WARDEN_VIEWER_ORG"),
            raw_grants.viewer_org,
            "viewer org (grants.viewer_org / WARDEN_VIEWER_ORG)",
        )?;

        if site.is_empty() {
            return Err(anyhow!("Datadog site must not be empty"));
        }

        Ok(Self {
            site,
            api_key,
            app_key,
            grants: StandingGrants {
                editor_role,
                viewer_org,
            },
        })
    }

    pub fn datadog(&self) -> DatadogConfig {
        DatadogConfig {
            site: self.site.clone(),
            api_key: self.api_key.clone(),
            app_key: self.app_key.clone(),
        }
    }
}

/// Secrets are never printed whole.
impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "site:        {}", self.site)?;
        writeln!(f, "api_key:     {}", mask(&self.api_key))?;
        writeln!(f, "app_key:     {}", mask(&self.app_key))?;
        writeln!(f, "editor_role: {}", self.grants.editor_role)?;
        write!(f, "viewer_org:  {}", self.grants.viewer_org)
    }
}

fn mask(secret: &str) -> String {
    if secret.len() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", &secret[..4])
    }
}

fn resolve_uuid(env: Option<String>, file: Option<Uuid>, what: &str) -> Result<Uuid> {
    match env {
        Some(raw) => {
            Uuid::parse_str(&raw).with_context(|| format!("Invalid UUID for {what}: {raw}"))
        }
        None => file.ok_or_else(|| anyhow!("Missing {what}")),
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    site: Option<String>,
    api_key: Option<String>,
    app_key: Option<String>,
    grants: Option<RawGrants>,
}

#[derive(Debug, Default, Deserialize)]
struct RawGrants {
    editor_role: Option<Uuid>,
    viewer_org: Option<Uuid>,
}
