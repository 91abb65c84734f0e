// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Sweep Orchestration Use Case
//!
//! One sweep = one pass of the four-stage pipeline for one resource kind:
//!
//! 1. Change Detector, ids created in the trailing window
//! 2. Owner Resolver, creating user (dashboards) or `team` tag (monitors)
//! 3. Team Lookup, owner reference → canonical team id
//! 4. Permission Writer, restriction policy upsert
//!
//! # Error Handling
//!
//! Each resource is processed independently: a failure while handling one id
//! is logged and counted, and the loop moves on. Only a detector failure
//! aborts the sweep, there is nothing to iterate without the id list. No
//! stage is ever retried.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::application::change_detector::ChangeDetector;
use crate::application::owner_resolver::OwnerResolver;
use crate::application::permission_writer::PermissionWriter;
use crate::application::team_lookup::TeamLookup;
use crate::domain::gateway::{
    AuditTrail, GatewayError, MonitorCatalog, PolicyStore, TeamDirectory,
};
use crate::domain::policy::StandingGrants;
use crate::domain::resource::{ResourceId, ResourceKind};
use crate::domain::team::TeamId;

/// Outcome summary for one sweep, for operator-facing reports.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SweepReport {
    pub kind: ResourceKind,
    pub discovered: usize,
    pub granted: Vec<ResourceId>,
    pub skipped: usize,
    pub failed: usize,
}

impl SweepReport {
    fn empty(kind: ResourceKind) -> Self {
        Self {
            kind,
            discovered: 0,
            granted: Vec::new(),
            skipped: 0,
            failed: 0,
        }
    }
}

enum Outcome {
    Granted,
    Skipped,
}

/// Per-pipeline orchestrator. Holds one instance of each stage, all sharing
/// the same long-lived gateway handles for the lifetime of the invocation.
pub struct Sweeper {
    detector: ChangeDetector,
    resolver: OwnerResolver,
    lookup: TeamLookup,
    writer: PermissionWriter,
}

impl Sweeper {
    pub fn new(
        audit: Arc<dyn AuditTrail>,
        monitors: Arc<dyn MonitorCatalog>,
        teams: Arc<dyn TeamDirectory>,
        policies: Arc<dyn PolicyStore>,
        grants: StandingGrants,
        dry_run: bool,
    ) -> Self {
        Self {
            detector: ChangeDetector::new(audit.clone()),
            resolver: OwnerResolver::new(audit, monitors),
            lookup: TeamLookup::new(teams),
            writer: PermissionWriter::new(policies, grants, dry_run),
        }
    }

    /// Run one sweep for `kind`. Fails only when the initial audit scan does.
    pub async fn sweep(&self, kind: ResourceKind) -> Result<SweepReport, GatewayError> {
        let ids = self.detector.recently_created(kind).await?;

        let mut report = SweepReport::empty(kind);
        report.discovered = ids.len();

        if ids.is_empty() {
            info!(kind = %kind, "no resources created in the lookback window");
            return Ok(report);
        }

        for id in ids {
            match self.process(kind, &id).await {
                Ok(Outcome::Granted) => {
                    info!(kind = %kind, resource = %id, "permissions set");
                    report.granted.push(id);
                }
                Ok(Outcome::Skipped) => report.skipped += 1,
                Err(err) => {
                    error!(kind = %kind, resource = %id, error = %err, "failed to process resource");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    async fn process(&self, kind: ResourceKind, id: &ResourceId) -> Result<Outcome, GatewayError> {
        let Some(team) = self.owning_team(kind, id).await? else {
            return Ok(Outcome::Skipped);
        };
        self.writer.grant(kind, id, team).await?;
        Ok(Outcome::Granted)
    }

    async fn owning_team(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> Result<Option<TeamId>, GatewayError> {
        match kind {
            ResourceKind::Dashboard => {
                let Some(user) = self.resolver.creator(id).await? else {
                    warn!(resource = %id, "no creating user found, skipping");
                    return Ok(None);
                };
                let team = self.lookup.by_user(&user).await;
                if team.is_none() {
                    warn!(resource = %id, user = %user, "no team found for creating user, skipping");
                }
                Ok(team)
            }
            ResourceKind::Monitor => {
                let Some(name) = self.resolver.tagged_team(id).await? else {
                    warn!(resource = %id, "monitor carries no team tag, skipping");
                    return Ok(None);
                };
                let team = self.lookup.by_name(&name).await;
                if team.is_none() {
                    warn!(resource = %id, team = %name, "no team matched the tag value, skipping");
                }
                Ok(team)
            }
        }
    }
}
