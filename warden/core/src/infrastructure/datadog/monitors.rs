// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Monitor metadata binding (`GET /api/v1/monitor/{id}`), reduced to the tag
//! list the monitor pipeline reads its `team` tag from.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::gateway::{GatewayError, MonitorCatalog};
use crate::domain::resource::ResourceId;

use super::{send_json, DatadogClient};

const SERVICE: &str = "monitors";

#[derive(Debug, Deserialize)]
struct MonitorResponse {
    #[serde(default)]
    tags: Vec<String>,
}

#[async_trait]
impl MonitorCatalog for DatadogClient {
    async fn monitor_tags(&self, id: &ResourceId) -> Result<Vec<String>, GatewayError> {
        let response: MonitorResponse =
            send_json(SERVICE, self.get(&format!("/api/v1/monitor/{}", id))).await?;
        Ok(response.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::datadog::test_config;
    use serde_json::json;

    #[tokio::test]
    async fn test_monitor_tags_decoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/monitor/5512345")
            .with_body(
                json!({
                    "id": 5512345,
                    "name": "cpu high",
                    "tags": ["env:prod", "team:payments"],
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = DatadogClient::with_base_url(test_config(), server.url()).unwrap();
        let tags = client.monitor_tags(&ResourceId::from("5512345")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(tags, vec!["env:prod".to_string(), "team:payments".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_tags_field_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/monitor/1")
            .with_body(json!({"id": 1, "name": "untagged"}).to_string())
            .create_async()
            .await;

        let client = DatadogClient::with_base_url(test_config(), server.url()).unwrap();
        let tags = client.monitor_tags(&ResourceId::from("1")).await.unwrap();
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_monitor_is_a_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/monitor/404404")
            .with_status(404)
            .with_body(r#"{"errors": ["Monitor not found"]}"#)
            .create_async()
            .await;

        let client = DatadogClient::with_base_url(test_config(), server.url()).unwrap();
        let err = client
            .monitor_tags(&ResourceId::from("404404"))
            .await
            .unwrap_err();

        match err {
            GatewayError::Status { status, .. } => assert_eq!(status, 404),
            other => panic!("unexpected error: {other}"),
        }
    }
}
