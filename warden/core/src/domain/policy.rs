// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Restriction policies: relation → principal-set bindings attached to a
//! single resource.
//!
//! Policy construction is pure and deterministic. The remote upsert has
//! full-replace semantics, so writing the same policy twice converges on the
//! same end state.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::resource::{ResourceId, ResourceKind};
use crate::domain::team::TeamId;

#[derive(Debug, Error)]
pub enum PrincipalError {
    #[error("Invalid principal reference: {0}")]
    InvalidReference(String),
}

/// The relations a binding can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Editor,
    Viewer,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Editor => "editor",
            Relation::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An identity that can hold a relation, rendered as `team:<uuid>`,
/// `role:<uuid>`, or `org:<uuid>` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Principal {
    Team(Uuid),
    Role(Uuid),
    Org(Uuid),
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Principal::Team(id) => write!(f, "team:{}", id),
            Principal::Role(id) => write!(f, "role:{}", id),
            Principal::Org(id) => write!(f, "org:{}", id),
        }
    }
}

impl FromStr for Principal {
    type Err = PrincipalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scope, id) = s
            .split_once(':')
            .ok_or_else(|| PrincipalError::InvalidReference(s.to_string()))?;
        let id = Uuid::parse_str(id)
            .map_err(|_| PrincipalError::InvalidReference(s.to_string()))?;
        match scope {
            "team" => Ok(Principal::Team(id)),
            "role" => Ok(Principal::Role(id)),
            "org" => Ok(Principal::Org(id)),
            _ => Err(PrincipalError::InvalidReference(s.to_string())),
        }
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// A (relation, principal set) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyBinding {
    pub relation: Relation,
    pub principals: Vec<Principal>,
}

/// The fixed principals granted on every policy Warden writes, alongside the
/// owning team: a platform role with editor access and the organization with
/// viewer access. Supplied by configuration, never hardcoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingGrants {
    pub editor_role: Uuid,
    pub viewer_org: Uuid,
}

/// An access-control list attached to one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionPolicy {
    /// `"<kind>:<resource-id>"`, the remote service's policy key.
    pub id: String,
    pub bindings: Vec<PolicyBinding>,
}

impl RestrictionPolicy {
    /// Build the policy Warden enforces on a newly created resource: the
    /// owning team and the standing role edit, the organization views.
    pub fn for_resource(
        kind: ResourceKind,
        resource: &ResourceId,
        team: TeamId,
        grants: &StandingGrants,
    ) -> Self {
        Self {
            id: format!("{}:{}", kind.policy_prefix(), resource),
            bindings: vec![
                PolicyBinding {
                    relation: Relation::Editor,
                    principals: vec![Principal::Team(team.0), Principal::Role(grants.editor_role)],
                },
                PolicyBinding {
                    relation: Relation::Viewer,
                    principals: vec![Principal::Org(grants.viewer_org)],
                },
            ],
        }
    }
}
