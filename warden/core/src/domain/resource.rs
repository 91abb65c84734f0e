// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Resource identity: the two governed resource kinds and their opaque ids.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The resource kinds Warden governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Dashboard,
    Monitor,
}

impl ResourceKind {
    /// The `@evt.name` value the audit log records for creations of this kind.
    pub fn event_name(&self) -> &'static str {
        match self {
            ResourceKind::Dashboard => "Dashboard",
            ResourceKind::Monitor => "Monitor",
        }
    }

    /// The prefix used in restriction policy ids (`dashboard:<id>`).
    pub fn policy_prefix(&self) -> &'static str {
        match self {
            ResourceKind::Dashboard => "dashboard",
            ResourceKind::Monitor => "monitor",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.policy_prefix())
    }
}

/// Opaque resource identifier.
///
/// Dashboards carry string ids, monitors numeric ones; both normalize to the
/// string form and are otherwise uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Read the value of the `team` tag from a monitor's tag list.
///
/// Tags are `key:value` strings; entries without a colon are ignored. The
/// first `team` tag wins.
pub fn team_tag(tags: &[String]) -> Option<&str> {
    tags.iter()
        .filter_map(|tag| tag.split_once(':'))
        .find(|(key, _)| *key == "team")
        .map(|(_, value)| value)
}
