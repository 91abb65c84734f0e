// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Team Identity Lookup Use Case
//!
//! Translates an owner reference (user id or team name) into a canonical team
//! id via the directory service. First match wins; the directory's list order
//! is preserved as-is and carries no documented guarantee.
//!
//! Directory failures are logged and degrade to `None`, a team that cannot
//! be resolved right now is a skip, not an aborted sweep.

use std::sync::Arc;
use tracing::warn;

use crate::domain::gateway::TeamDirectory;
use crate::domain::team::{TeamId, UserId};

pub struct TeamLookup {
    teams: Arc<dyn TeamDirectory>,
}

impl TeamLookup {
    pub fn new(teams: Arc<dyn TeamDirectory>) -> Self {
        Self { teams }
    }

    /// First team the user is a member of, or `None` when the user belongs to
    /// no team or the directory call fails.
    pub async fn by_user(&self, user: &UserId) -> Option<TeamId> {
        match self.teams.memberships(user).await {
            Ok(teams) => teams.into_iter().next(),
            Err(err) => {
                warn!(user = %user, error = %err, "team membership lookup failed");
                None
            }
        }
    }

    /// First team matching the keyword, or `None` on no match or directory
    /// failure.
    pub async fn by_name(&self, name: &str) -> Option<TeamId> {
        match self.teams.search(name).await {
            Ok(teams) => teams.into_iter().next().map(|team| team.id),
            Err(err) => {
                warn!(team = %name, error = %err, "team search failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateway::GatewayError;
    use crate::domain::team::Team;
    use async_trait::async_trait;
    use uuid::Uuid;

    enum Directory {
        Members(Vec<TeamId>),
        Teams(Vec<Team>),
        Broken,
    }

    #[async_trait]
    impl TeamDirectory for Directory {
        async fn memberships(&self, _user: &UserId) -> Result<Vec<TeamId>, GatewayError> {
            match self {
                Directory::Members(teams) => Ok(teams.clone()),
                Directory::Teams(_) => Ok(Vec::new()),
                Directory::Broken => Err(GatewayError::Status {
                    service: "teams",
                    status: 503,
                    body: "maintenance".to_string(),
                }),
            }
        }

        async fn search(&self, _keyword: &str) -> Result<Vec<Team>, GatewayError> {
            match self {
                Directory::Teams(teams) => Ok(teams.clone()),
                Directory::Members(_) => Ok(Vec::new()),
                Directory::Broken => Err(GatewayError::Status {
                    service: "teams",
                    status: 503,
                    body: "maintenance".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_first_membership_wins() {
        let first = TeamId(Uuid::new_v4());
        let second = TeamId(Uuid::new_v4());
        let lookup = TeamLookup::new(Arc::new(Directory::Members(vec![first, second])));

        assert_eq!(lookup.by_user(&UserId::new("u1")).await, Some(first));
    }

    #[tokio::test]
    async fn test_no_membership_is_none() {
        let lookup = TeamLookup::new(Arc::new(Directory::Members(vec![])));
        assert_eq!(lookup.by_user(&UserId::new("u1")).await, None);
    }

    #[tokio::test]
    async fn test_first_search_match_wins() {
        let first = TeamId(Uuid::new_v4());
        let lookup = TeamLookup::new(Arc::new(Directory::Teams(vec![
            Team {
                id: first,
                name: Some("payments".to_string()),
                handle: None,
            },
            Team {
                id: TeamId(Uuid::new_v4()),
                name: Some("payments-oncall".to_string()),
                handle: None,
            },
        ])));

        assert_eq!(lookup.by_name("payments").await, Some(first));
    }

    #[tokio::test]
    async fn test_directory_failure_degrades_to_none() {
        let lookup = TeamLookup::new(Arc::new(Directory::Broken));
        assert_eq!(lookup.by_user(&UserId::new("u1")).await, None);
        assert_eq!(lookup.by_name("payments").await, None);
    }
}
