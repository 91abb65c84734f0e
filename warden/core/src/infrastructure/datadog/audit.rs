// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Audit-log search binding (`POST /api/v2/audit/events/search`).
//!
//! Creation events are found with `@evt.name:<Kind> AND @action:created` over
//! the trailing one-minute window, GMT, timestamp-ascending. The interesting
//! payload sits two levels deep: `data[].attributes.attributes` is a free-form
//! map whose `asset` and `user` entries carry the resource and the actor.
//! Asset ids arrive as strings for dashboards and numbers for monitors; both
//! normalize to strings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::audit::{AssetRef, AuditEvent, AuditPage, PageRequest};
use crate::domain::gateway::{AuditTrail, GatewayError};
use crate::domain::resource::{ResourceId, ResourceKind};
use crate::domain::team::UserId;

use super::{send_json, DatadogClient};

const SERVICE: &str = "audit";
const SEARCH_PATH: &str = "/api/v2/audit/events/search";
const LOOKBACK: &str = "now-1m";
const NOW: &str = "now";
const TIMEZONE: &str = "GMT";
const SORT_ASCENDING: &str = "timestamp";

fn creation_query(kind: ResourceKind) -> String {
    format!("@evt.name:{} AND @action:created", kind.event_name())
}

fn creation_query_for(kind: ResourceKind, id: &ResourceId) -> String {
    format!("{} AND @asset.id:{}", creation_query(kind), id)
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    filter: SearchFilter<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<SearchOptions<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<SearchPage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SearchFilter<'a> {
    from: &'a str,
    query: &'a str,
    to: &'a str,
}

#[derive(Debug, Serialize)]
struct SearchOptions<'a> {
    time_offset: i64,
    timezone: &'a str,
}

#[derive(Debug, Serialize)]
struct SearchPage {
    limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<EventEnvelope>,
    meta: Option<ResponseMeta>,
}

impl SearchResponse {
    fn after(&self) -> Option<String> {
        self.meta
            .as_ref()
            .and_then(|meta| meta.page.as_ref())
            .and_then(|page| page.after.clone())
    }
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    attributes: Option<EventAttributes>,
}

#[derive(Debug, Deserialize)]
struct EventAttributes {
    timestamp: Option<DateTime<Utc>>,
    attributes: Option<EventDetail>,
}

#[derive(Debug, Deserialize)]
struct EventDetail {
    asset: Option<AssetDetail>,
    user: Option<UserDetail>,
}

#[derive(Debug, Deserialize)]
struct AssetDetail {
    id: Option<serde_json::Value>,
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserDetail {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMeta {
    page: Option<MetaPage>,
}

#[derive(Debug, Deserialize)]
struct MetaPage {
    after: Option<String>,
}

/// Asset ids are strings for dashboards and integers for monitors.
fn scalar_to_id(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn into_event(envelope: EventEnvelope) -> Option<AuditEvent> {
    let attributes = envelope.attributes?;
    let detail = attributes.attributes?;
    let asset = detail.asset?;
    let id = asset.id.as_ref().and_then(scalar_to_id)?;

    Some(AuditEvent {
        timestamp: attributes.timestamp,
        asset: AssetRef {
            kind: asset.kind,
            id: ResourceId::new(id),
        },
        actor: detail.user.and_then(|user| user.id).map(UserId::new),
    })
}

#[async_trait]
impl AuditTrail for DatadogClient {
    async fn recent_creations(
        &self,
        kind: ResourceKind,
        page: PageRequest,
    ) -> Result<AuditPage, GatewayError> {
        let query = creation_query(kind);
        let body = SearchRequest {
            filter: SearchFilter {
                from: LOOKBACK,
                query: &query,
                to: NOW,
            },
            options: Some(SearchOptions {
                time_offset: 0,
                timezone: TIMEZONE,
            }),
            page: Some(SearchPage {
                limit: page.limit,
                cursor: page.cursor,
            }),
            sort: Some(SORT_ASCENDING),
        };

        let response: SearchResponse =
            send_json(SERVICE, self.post(SEARCH_PATH).json(&body)).await?;

        let after = response.after();
        let events: Vec<AuditEvent> = response.data.into_iter().filter_map(into_event).collect();
        debug!(kind = %kind, events = events.len(), has_more = after.is_some(), "audit page fetched");

        Ok(AuditPage { events, after })
    }

    async fn creation_event(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> Result<Option<AuditEvent>, GatewayError> {
        let query = creation_query_for(kind, id);
        let body = SearchRequest {
            filter: SearchFilter {
                from: LOOKBACK,
                query: &query,
                to: NOW,
            },
            options: None,
            page: None,
            sort: None,
        };

        let response: SearchResponse =
            send_json(SERVICE, self.post(SEARCH_PATH).json(&body)).await?;

        Ok(response.data.into_iter().find_map(into_event))
    }
}
