// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain Layer
//!
//! Pure types for resources, teams, audit events, and restriction policies,
//! plus the gateway ports implemented in `crate::infrastructure`.

pub mod audit;
pub mod gateway;
pub mod policy;
pub mod resource;
pub mod team;

pub use audit::{AssetRef, AuditEvent, AuditPage, PageRequest};
pub use gateway::{AuditTrail, GatewayError, MonitorCatalog, PolicyStore, TeamDirectory};
pub use policy::{Principal, Relation, RestrictionPolicy, PolicyBinding, StandingGrants};
pub use resource::{ResourceId, ResourceKind};
pub use team::{Team, TeamId, UserId};
