// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Audit log event model and pagination primitives.
//!
//! The audit trail is the source of truth for "what was just created": each
//! creation leaves an event carrying the asset reference and the acting user.
//! Pagination is cursor-based; an absent `after` cursor is the only
//! termination signal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::resource::ResourceId;
use crate::domain::team::UserId;

/// One page worth of audit search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub cursor: Option<String>,
}

impl PageRequest {
    pub fn first(limit: usize) -> Self {
        Self { limit, cursor: None }
    }
}

/// One page of audit search results.
#[derive(Debug, Clone, Default)]
pub struct AuditPage {
    pub events: Vec<AuditEvent>,
    /// Cursor for the next page; `None` terminates pagination.
    pub after: Option<String>,
}

/// A single audit log record, reduced to what the pipelines consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub timestamp: Option<DateTime<Utc>>,
    pub asset: AssetRef,
    /// Acting user for creation events; absent for system-initiated changes.
    pub actor: Option<UserId>,
}

/// The asset a creation event refers to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRef {
    pub kind: Option<String>,
    pub id: ResourceId,
}
