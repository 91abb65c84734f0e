// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Datadog REST Client
//!
//! One long-lived HTTP client handle implementing all four gateway ports for
//! the lifetime of an invocation. Credentials travel as the `DD-API-KEY` /
//! `DD-APPLICATION-KEY` headers on every request; the base URL derives from
//! the configured site (`https://api.datadoghq.eu`, …) and can be overridden
//! for tests.
//!
//! Endpoint bindings live in the sibling modules:
//!
//! - `audit`, `POST /api/v2/audit/events/search`
//! - `monitors`, `GET /api/v1/monitor/{id}`
//! - `teams`, `GET /api/v2/users/{uuid}/memberships`, `GET /api/v2/team`
//! - `restriction_policies`, `POST /api/v2/restriction_policy/{id}`
//!
//! No retries and no explicit timeouts; each call is attempted once and the
//! client's defaults apply.

mod audit;
mod monitors;
mod restriction_policies;
mod teams;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::domain::gateway::GatewayError;

/// Site and credentials for one Datadog organization. Built by the caller
/// from configuration and injected here, no ambient globals.
#[derive(Debug, Clone)]
pub struct DatadogConfig {
    /// Datadog site, e.g. `datadoghq.com` or `datadoghq.eu`.
    pub site: String,
    pub api_key: String,
    pub app_key: String,
}

impl DatadogConfig {
    /// API origin for the configured site.
    pub fn api_base(&self) -> String {
        format!("https://api.{}", self.site)
    }
}

#[derive(Debug, Clone)]
pub struct DatadogClient {
    http: Client,
    base_url: String,
    config: DatadogConfig,
}

impl DatadogClient {
    pub fn new(config: DatadogConfig) -> Result<Self, GatewayError> {
        let base_url = config.api_base();
        Self::with_base_url(config, base_url)
    }

    /// Create a client against an explicit origin instead of the site-derived
    /// one. Used by tests to point at a local mock server.
    pub fn with_base_url(
        config: DatadogConfig,
        base_url: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let http = Client::builder().build().map_err(|err| GatewayError::Transport {
            service: "datadog",
            reason: err.to_string(),
        })?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            config,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header("DD-API-KEY", &self.config.api_key)
            .header("DD-APPLICATION-KEY", &self.config.app_key)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }
}

/// Send a request, enforce a 2xx status, and decode the JSON body.
async fn send_json<T: DeserializeOwned>(
    service: &'static str,
    request: RequestBuilder,
) -> Result<T, GatewayError> {
    let response = checked_send(service, request).await?;
    response.json().await.map_err(|err| GatewayError::Decode {
        service,
        reason: err.to_string(),
    })
}

/// Send a request and enforce a 2xx status, discarding the body.
async fn send_ok(service: &'static str, request: RequestBuilder) -> Result<(), GatewayError> {
    checked_send(service, request).await.map(|_| ())
}

async fn checked_send(
    service: &'static str,
    request: RequestBuilder,
) -> Result<reqwest::Response, GatewayError> {
    let response = request.send().await.map_err(|err| GatewayError::Transport {
        service,
        reason: err.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::Status {
            service,
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

#[cfg(test)]
pub(crate) fn test_config() -> DatadogConfig {
    DatadogConfig {
        site: "datadoghq.eu".to_string(),
        api_key: "test-api-key".to_string(),
        app_key: "test-app-key".to_string(),
    }
}
