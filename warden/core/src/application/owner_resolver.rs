// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Owner Attribution Use Case
//!
//! Determines which team reference should own a freshly created resource.
//! Two variants, selected by resource kind:
//!
//! - **Dashboards** have no ownership metadata of their own; the creating
//!   user is recovered by re-querying the audit log for the resource's
//!   creation event.
//! - **Monitors** carry a `team:<name>` tag set by convention; the tag value
//!   is the owning team's name.
//!
//! `None` means "no owner could be attributed" and the caller skips the
//! resource; it is never a failure.

use std::sync::Arc;

use crate::domain::gateway::{AuditTrail, GatewayError, MonitorCatalog};
use crate::domain::resource::{team_tag, ResourceId, ResourceKind};
use crate::domain::team::UserId;

pub struct OwnerResolver {
    audit: Arc<dyn AuditTrail>,
    monitors: Arc<dyn MonitorCatalog>,
}

impl OwnerResolver {
    pub fn new(audit: Arc<dyn AuditTrail>, monitors: Arc<dyn MonitorCatalog>) -> Self {
        Self { audit, monitors }
    }

    /// The user who created the dashboard, from its audit creation event.
    /// `None` when the window no longer holds the event or it carries no
    /// actor.
    pub async fn creator(&self, id: &ResourceId) -> Result<Option<UserId>, GatewayError> {
        let event = self
            .audit
            .creation_event(ResourceKind::Dashboard, id)
            .await?;
        Ok(event.and_then(|event| event.actor))
    }

    /// The team name from the monitor's `team` tag, if present.
    pub async fn tagged_team(&self, id: &ResourceId) -> Result<Option<String>, GatewayError> {
        let tags = self.monitors.monitor_tags(id).await?;
        Ok(team_tag(&tags).map(str::to_owned))
    }
}
