// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Change Detection Use Case
//!
//! Application service that answers "which resources of this kind were
//! created in the last minute?" by walking the audit log's cursor-paginated
//! search results.
//!
//! # Flow
//!
//! 1. Request a page of creation events (limit 10, oldest first)
//! 2. Accumulate asset ids, skipping events with no usable id
//! 3. Follow the `after` cursor until the service stops returning one
//!
//! A page smaller than the limit is normal, not a truncation error. A cursor
//! equal to the one just used would loop forever; the detector logs a warning
//! and stops instead.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::audit::PageRequest;
use crate::domain::gateway::{AuditTrail, GatewayError};
use crate::domain::resource::{ResourceId, ResourceKind};

/// Audit search page size, matching the service's documented maximum burst
/// the pipelines are expected to absorb per page.
pub const PAGE_LIMIT: usize = 10;

/// Change Detector service.
pub struct ChangeDetector {
    audit: Arc<dyn AuditTrail>,
    page_limit: usize,
}

impl ChangeDetector {
    pub fn new(audit: Arc<dyn AuditTrail>) -> Self {
        Self {
            audit,
            page_limit: PAGE_LIMIT,
        }
    }

    /// Ids of resources of `kind` created within the trailing window, oldest
    /// first. Empty when nothing was created.
    pub async fn recently_created(
        &self,
        kind: ResourceKind,
    ) -> Result<Vec<ResourceId>, GatewayError> {
        let mut ids = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .audit
                .recent_creations(
                    kind,
                    PageRequest {
                        limit: self.page_limit,
                        cursor: cursor.clone(),
                    },
                )
                .await?;

            for event in page.events {
                if event.asset.id.is_empty() {
                    warn!(kind = %kind, "creation event carries no asset id, skipping");
                    continue;
                }
                ids.push(event.asset.id);
            }

            match page.after {
                None => break,
                Some(next) => {
                    if cursor.as_deref() == Some(next.as_str()) {
                        warn!(kind = %kind, "audit page cursor repeated, stopping pagination");
                        break;
                    }
                    debug!(kind = %kind, cursor = %next, "following audit page cursor");
                    cursor = Some(next);
                }
            }
        }

        Ok(ids)
    }
}
