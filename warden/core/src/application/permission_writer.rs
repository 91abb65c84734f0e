// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Permission Writing Use Case
//!
//! Builds the two-binding restriction policy for a resolved (resource, team)
//! pair and upserts it. The upsert is a full replace on the remote side, so
//! repeating the write converges on the same policy. One remote call, no
//! local state.

use std::sync::Arc;
use tracing::info;

use crate::domain::gateway::{GatewayError, PolicyStore};
use crate::domain::policy::{RestrictionPolicy, StandingGrants};
use crate::domain::resource::{ResourceId, ResourceKind};
use crate::domain::team::TeamId;

pub struct PermissionWriter {
    policies: Arc<dyn PolicyStore>,
    grants: StandingGrants,
    dry_run: bool,
}

impl PermissionWriter {
    pub fn new(policies: Arc<dyn PolicyStore>, grants: StandingGrants, dry_run: bool) -> Self {
        Self {
            policies,
            grants,
            dry_run,
        }
    }

    /// Grant the team editor access on the resource (plus the standing role
    /// and org grants). Returns the policy that was written, or would have
    /// been under `--dry-run`.
    pub async fn grant(
        &self,
        kind: ResourceKind,
        resource: &ResourceId,
        team: TeamId,
    ) -> Result<RestrictionPolicy, GatewayError> {
        let policy = RestrictionPolicy::for_resource(kind, resource, team, &self.grants);

        if self.dry_run {
            info!(policy = %policy.id, team = %team, "dry run, skipping restriction policy upsert");
            return Ok(policy);
        }

        self.policies.upsert(&policy).await?;
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingStore {
        written: Mutex<Vec<RestrictionPolicy>>,
    }

    #[async_trait]
    impl PolicyStore for RecordingStore {
        async fn upsert(&self, policy: &RestrictionPolicy) -> Result<(), GatewayError> {
            self.written.lock().unwrap().push(policy.clone());
            Ok(())
        }
    }

    fn grants() -> StandingGrants {
        StandingGrants {
            editor_role: Uuid::new_v4(),
            viewer_org: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_grant_upserts_constructed_policy() {
        let store = Arc::new(RecordingStore::default());
        let writer = PermissionWriter::new(store.clone(), grants(), false);
        let team = TeamId(Uuid::new_v4());

        let policy = writer
            .grant(ResourceKind::Monitor, &ResourceId::from("7"), team)
            .await
            .unwrap();

        let written = store.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0], policy);
        assert_eq!(written[0].id, "monitor:7");
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let store = Arc::new(RecordingStore::default());
        let writer = PermissionWriter::new(store.clone(), grants(), true);

        let policy = writer
            .grant(
                ResourceKind::Dashboard,
                &ResourceId::from("dash-1"),
                TeamId(Uuid::new_v4()),
            )
            .await
            .unwrap();

        assert_eq!(policy.id, "dashboard:dash-1");
        assert!(store.written.lock().unwrap().is_empty());
    }
}
