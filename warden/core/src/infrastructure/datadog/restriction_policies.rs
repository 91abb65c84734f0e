// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Restriction policy binding (`POST /api/v2/restriction_policy/{id}`).
//!
//! The update endpoint has upsert semantics and replaces the resource's
//! policy wholesale with the submitted bindings.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::gateway::{GatewayError, PolicyStore};
use crate::domain::policy::{PolicyBinding, RestrictionPolicy};

use super::{send_ok, DatadogClient};

const SERVICE: &str = "restriction_policies";
const POLICY_TYPE: &str = "restriction_policy";

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    data: PolicyData<'a>,
}

#[derive(Debug, Serialize)]
struct PolicyData<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: PolicyAttributes<'a>,
}

#[derive(Debug, Serialize)]
struct PolicyAttributes<'a> {
    bindings: &'a [PolicyBinding],
}

#[async_trait]
impl PolicyStore for DatadogClient {
    async fn upsert(&self, policy: &RestrictionPolicy) -> Result<(), GatewayError> {
        let body = UpdateRequest {
            data: PolicyData {
                id: &policy.id,
                kind: POLICY_TYPE,
                attributes: PolicyAttributes {
                    bindings: &policy.bindings,
                },
            },
        };

        send_ok(
            SERVICE,
            self.post(&format!("/api/v2/restriction_policy/{}", policy.id))
                .json(&body),
        )
        .await
    }
}
