// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Team directory bindings.
//!
//! Memberships come from `GET /api/v2/users/{uuid}/memberships`; the team id
//! sits in each membership's `relationships.team.data.id`. Keyword search is
//! `GET /api/v2/team?filter[keyword]=…`. Both responses preserve the
//! directory's list order, no sorting is applied on top.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::domain::gateway::{GatewayError, TeamDirectory};
use crate::domain::team::{Team, TeamId, UserId};

use super::{send_json, DatadogClient};

const SERVICE: &str = "teams";

#[derive(Debug, Deserialize)]
struct MembershipsResponse {
    #[serde(default)]
    data: Vec<Membership>,
}

#[derive(Debug, Deserialize)]
struct Membership {
    relationships: Option<MembershipRelationships>,
}

#[derive(Debug, Deserialize)]
struct MembershipRelationships {
    team: Option<RelationshipData>,
}

#[derive(Debug, Deserialize)]
struct RelationshipData {
    data: Option<RelationshipRef>,
}

#[derive(Debug, Deserialize)]
struct RelationshipRef {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    data: Vec<TeamEnvelope>,
}

#[derive(Debug, Deserialize)]
struct TeamEnvelope {
    id: String,
    attributes: Option<TeamAttributes>,
}

#[derive(Debug, Deserialize)]
struct TeamAttributes {
    name: Option<String>,
    handle: Option<String>,
}

fn parse_team_id(raw: &str) -> Option<TeamId> {
    match Uuid::parse_str(raw) {
        Ok(id) => Some(TeamId(id)),
        Err(_) => {
            warn!(id = %raw, "directory returned a non-UUID team id, ignoring");
            None
        }
    }
}

#[async_trait]
impl TeamDirectory for DatadogClient {
    async fn memberships(&self, user: &UserId) -> Result<Vec<TeamId>, GatewayError> {
        let response: MembershipsResponse = send_json(
            SERVICE,
            self.get(&format!("/api/v2/users/{}/memberships", user)),
        )
        .await?;

        Ok(response
            .data
            .into_iter()
            .filter_map(|membership| {
                membership
                    .relationships?
                    .team?
                    .data?
                    .id
                    .as_deref()
                    .and_then(parse_team_id)
            })
            .collect())
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Team>, GatewayError> {
        let response: TeamsResponse = send_json(
            SERVICE,
            self.get("/api/v2/team")
                .query(&[("filter[keyword]", keyword)]),
        )
        .await?;

        Ok(response
            .data
            .into_iter()
            .filter_map(|envelope| {
                let id = parse_team_id(&envelope.id)?;
                let attributes = envelope.attributes;
                Some(Team {
                    id,
                    name: attributes.as_ref().and_then(|a| a.name.clone()),
                    handle: attributes.and_then(|a| a.handle),
                })
            })
            .collect())
    }
}
