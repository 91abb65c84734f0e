// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Remote Service Gateways
//!
//! Contracts for the four external services the sweep pipelines consume,
//! following the repository pattern: interface defined in the domain layer,
//! implemented in `crate::infrastructure::datadog`.
//!
//! | Trait | Remote service | Implementation |
//! |-------|----------------|----------------|
//! | `AuditTrail` | Audit-log event search | `DatadogClient` |
//! | `MonitorCatalog` | Monitor metadata fetch | `DatadogClient` |
//! | `TeamDirectory` | Team membership / keyword search | `DatadogClient` |
//! | `PolicyStore` | Restriction policy upsert | `DatadogClient` |
//!
//! Test suites substitute in-memory fakes; the application layer only ever
//! sees these traits.
//!
//! "Nothing there" is data, not an error: empty pages, missing creation
//! events, and empty membership lists come back as empty collections or
//! `None`. `GatewayError` is reserved for transport, authentication, and
//! decoding failures.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audit::{AuditEvent, AuditPage, PageRequest};
use crate::domain::policy::RestrictionPolicy;
use crate::domain::resource::{ResourceId, ResourceKind};
use crate::domain::team::{Team, TeamId, UserId};

/// Failure talking to a remote service. Tagged with the service name so log
/// lines carry enough context without a backtrace.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{service} request failed: {reason}")]
    Transport { service: &'static str, reason: String },

    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} response could not be decoded: {reason}")]
    Decode { service: &'static str, reason: String },
}

/// Audit-log search: creation events by kind, cursor paginated.
#[async_trait]
pub trait AuditTrail: Send + Sync {
    /// One page of creation events for `kind` within the trailing window,
    /// oldest first.
    async fn recent_creations(
        &self,
        kind: ResourceKind,
        page: PageRequest,
    ) -> Result<AuditPage, GatewayError>;

    /// The creation event for one specific resource, if the window still
    /// holds it.
    async fn creation_event(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> Result<Option<AuditEvent>, GatewayError>;
}

/// Monitor metadata fetch, reduced to the tag list the pipelines need.
#[async_trait]
pub trait MonitorCatalog: Send + Sync {
    async fn monitor_tags(&self, id: &ResourceId) -> Result<Vec<String>, GatewayError>;
}

/// Team directory: memberships by user and search by keyword.
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    /// Team ids the user belongs to, in directory order.
    async fn memberships(&self, user: &UserId) -> Result<Vec<TeamId>, GatewayError>;

    /// Teams matching a keyword, in directory order.
    async fn search(&self, keyword: &str) -> Result<Vec<Team>, GatewayError>;
}

/// Restriction policy upsert. Full replace: the submitted bindings become the
/// complete policy for the resource.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    async fn upsert(&self, policy: &RestrictionPolicy) -> Result<(), GatewayError>;
}
