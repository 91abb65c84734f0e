// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! End-to-end sweep pipeline tests over in-memory gateway fakes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use warden_core::application::Sweeper;
use warden_core::domain::audit::{AssetRef, AuditEvent, AuditPage, PageRequest};
use warden_core::domain::gateway::{
    AuditTrail, GatewayError, MonitorCatalog, PolicyStore, TeamDirectory,
};
use warden_core::domain::policy::{Relation, RestrictionPolicy, StandingGrants};
use warden_core::domain::resource::{ResourceId, ResourceKind};
use warden_core::domain::team::{Team, TeamId, UserId};

fn event(id: &str, actor: Option<&str>) -> AuditEvent {
    AuditEvent {
        timestamp: None,
        asset: AssetRef {
            kind: None,
            id: ResourceId::from(id),
        },
        actor: actor.map(UserId::new),
    }
}

fn page(ids: &[&str], after: Option<&str>) -> AuditPage {
    AuditPage {
        events: ids.iter().map(|id| event(id, None)).collect(),
        after: after.map(str::to_string),
    }
}

/// Scripted audit trail: replays `pages` for the window scan and serves
/// creation events by resource id.
#[derive(Default)]
struct FakeAudit {
    pages: Mutex<Vec<AuditPage>>,
    creations: HashMap<String, AuditEvent>,
}

impl FakeAudit {
    fn with_pages(pages: Vec<AuditPage>) -> Self {
        Self {
            pages: Mutex::new(pages),
            creations: HashMap::new(),
        }
    }

    fn creation(mut self, id: &str, actor: &str) -> Self {
        self.creations.insert(id.to_string(), event(id, Some(actor)));
        self
    }
}

#[async_trait]
impl AuditTrail for FakeAudit {
    async fn recent_creations(
        &self,
        _kind: ResourceKind,
        _page: PageRequest,
    ) -> Result<AuditPage, GatewayError> {
        let mut pages = self.pages.lock().unwrap();
        if pages.is_empty() {
            Ok(AuditPage::default())
        } else {
            Ok(pages.remove(0))
        }
    }

    async fn creation_event(
        &self,
        _kind: ResourceKind,
        id: &ResourceId,
    ) -> Result<Option<AuditEvent>, GatewayError> {
        Ok(self.creations.get(id.as_str()).cloned())
    }
}

#[derive(Default)]
struct FakeMonitors {
    tags: HashMap<String, Vec<String>>,
    calls: AtomicUsize,
}

impl FakeMonitors {
    fn tagged(mut self, id: &str, tags: &[&str]) -> Self {
        self.tags
            .insert(id.to_string(), tags.iter().map(|t| t.to_string()).collect());
        self
    }
}

#[async_trait]
impl MonitorCatalog for FakeMonitors {
    async fn monitor_tags(&self, id: &ResourceId) -> Result<Vec<String>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tags.get(id.as_str()).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct FakeTeams {
    memberships: HashMap<String, Vec<TeamId>>,
    by_keyword: HashMap<String, Vec<Team>>,
    calls: AtomicUsize,
}

impl FakeTeams {
    fn member(mut self, user: &str, team: TeamId) -> Self {
        self.memberships.entry(user.to_string()).or_default().push(team);
        self
    }

    fn named(mut self, name: &str, team: TeamId) -> Self {
        self.by_keyword.entry(name.to_string()).or_default().push(Team {
            id: team,
            name: Some(name.to_string()),
            handle: None,
        });
        self
    }
}

#[async_trait]
impl TeamDirectory for FakeTeams {
    async fn memberships(&self, user: &UserId) -> Result<Vec<TeamId>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.memberships.get(user.as_str()).cloned().unwrap_or_default())
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Team>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.by_keyword.get(keyword).cloned().unwrap_or_default())
    }
}

/// Keyed policy store with full-replace semantics, optionally failing for
/// chosen policy ids.
#[derive(Default)]
struct FakePolicies {
    state: Mutex<HashMap<String, RestrictionPolicy>>,
    fail_for: Vec<String>,
    writes: AtomicUsize,
}

impl FakePolicies {
    fn failing_for(id: &str) -> Self {
        Self {
            fail_for: vec![id.to_string()],
            ..Self::default()
        }
    }
}

#[async_trait]
impl PolicyStore for FakePolicies {
    async fn upsert(&self, policy: &RestrictionPolicy) -> Result<(), GatewayError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_for.contains(&policy.id) {
            return Err(GatewayError::Status {
                service: "restriction_policies",
                status: 500,
                body: "boom".to_string(),
            });
        }
        self.state
            .lock()
            .unwrap()
            .insert(policy.id.clone(), policy.clone());
        Ok(())
    }
}

fn grants() -> StandingGrants {
    StandingGrants {
        editor_role: Uuid::parse_str("e5091040-1d03-11ef-9dbc-da7ad0900005").unwrap(),
        viewer_org: Uuid::parse_str("e4f8bb8c-1d03-11ef-9b95-da7ad0900005").unwrap(),
    }
}

fn sweeper(
    audit: Arc<FakeAudit>,
    monitors: Arc<FakeMonitors>,
    teams: Arc<FakeTeams>,
    policies: Arc<FakePolicies>,
) -> Sweeper {
    Sweeper::new(audit, monitors, teams, policies, grants(), false)
}

#[tokio::test]
async fn test_dashboard_sweep_grants_and_skips() {
    // dash-1's creator has a team, dash-2's does not: one policy written,
    // one skip. The worked example from the pipeline design.
    let team = TeamId(Uuid::new_v4());
    let audit = Arc::new(
        FakeAudit::with_pages(vec![page(&["dash-1", "dash-2"], None)])
            .creation("dash-1", "u1")
            .creation("dash-2", "u2"),
    );
    let teams = Arc::new(FakeTeams::default().member("u1", team));
    let policies = Arc::new(FakePolicies::default());

    let report = sweeper(audit, Arc::new(FakeMonitors::default()), teams, policies.clone())
        .sweep(ResourceKind::Dashboard)
        .await
        .unwrap();

    assert_eq!(report.discovered, 2);
    assert_eq!(report.granted, vec![ResourceId::from("dash-1")]);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);

    let state = policies.state.lock().unwrap();
    assert_eq!(state.len(), 1);
    let policy = &state["dashboard:dash-1"];
    assert_eq!(policy.bindings.len(), 2);
    assert_eq!(policy.bindings[0].relation, Relation::Editor);
    assert_eq!(policy.bindings[0].principals[0].to_string(), format!("team:{team}"));
}

#[tokio::test]
async fn test_empty_window_touches_no_downstream_stage() {
    let audit = Arc::new(FakeAudit::with_pages(vec![page(&[], None)]));
    let monitors = Arc::new(FakeMonitors::default());
    let teams = Arc::new(FakeTeams::default());
    let policies = Arc::new(FakePolicies::default());

    let report = sweeper(audit, monitors.clone(), teams.clone(), policies.clone())
        .sweep(ResourceKind::Monitor)
        .await
        .unwrap();

    assert_eq!(report.discovered, 0);
    assert_eq!(monitors.calls.load(Ordering::SeqCst), 0);
    assert_eq!(teams.calls.load(Ordering::SeqCst), 0);
    assert_eq!(policies.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unresolvable_owner_skips_without_team_lookup() {
    // no creation event recorded for dash-1: owner resolution yields None
    let audit = Arc::new(FakeAudit::with_pages(vec![page(&["dash-1"], None)]));
    let teams = Arc::new(FakeTeams::default());
    let policies = Arc::new(FakePolicies::default());

    let report = sweeper(audit, Arc::new(FakeMonitors::default()), teams.clone(), policies.clone())
        .sweep(ResourceKind::Dashboard)
        .await
        .unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(teams.calls.load(Ordering::SeqCst), 0);
    assert_eq!(policies.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unresolvable_team_skips_without_write() {
    let audit = Arc::new(
        FakeAudit::with_pages(vec![page(&["dash-1"], None)]).creation("dash-1", "u1"),
    );
    // u1 belongs to no team
    let policies = Arc::new(FakePolicies::default());

    let report = sweeper(
        audit,
        Arc::new(FakeMonitors::default()),
        Arc::new(FakeTeams::default()),
        policies.clone(),
    )
    .sweep(ResourceKind::Dashboard)
    .await
    .unwrap();

    assert_eq!(report.skipped, 1);
    assert!(report.granted.is_empty());
    assert_eq!(policies.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_monitor_sweep_resolves_team_by_tag() {
    let team = TeamId(Uuid::new_v4());
    let audit = Arc::new(FakeAudit::with_pages(vec![page(&["7001", "7002"], None)]));
    let monitors = Arc::new(
        FakeMonitors::default()
            .tagged("7001", &["env:prod", "team:payments"])
            .tagged("7002", &["env:prod"]),
    );
    let teams = Arc::new(FakeTeams::default().named("payments", team));
    let policies = Arc::new(FakePolicies::default());

    let report = sweeper(audit, monitors, teams, policies.clone())
        .sweep(ResourceKind::Monitor)
        .await
        .unwrap();

    assert_eq!(report.granted, vec![ResourceId::from("7001")]);
    assert_eq!(report.skipped, 1);

    let state = policies.state.lock().unwrap();
    assert!(state.contains_key("monitor:7001"));
    assert!(!state.contains_key("monitor:7002"));
}

#[tokio::test]
async fn test_write_failure_does_not_block_later_resources() {
    let team = TeamId(Uuid::new_v4());
    let audit = Arc::new(FakeAudit::with_pages(vec![page(&["7001", "7002"], None)]));
    let monitors = Arc::new(
        FakeMonitors::default()
            .tagged("7001", &["team:sre"])
            .tagged("7002", &["team:sre"]),
    );
    let teams = Arc::new(FakeTeams::default().named("sre", team));
    let policies = Arc::new(FakePolicies::failing_for("monitor:7001"));

    let report = sweeper(audit, monitors, teams, policies.clone())
        .sweep(ResourceKind::Monitor)
        .await
        .unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.granted, vec![ResourceId::from("7002")]);
    assert!(policies.state.lock().unwrap().contains_key("monitor:7002"));
}

#[tokio::test]
async fn test_sweep_is_idempotent_across_runs() {
    let team = TeamId(Uuid::new_v4());
    let policies = Arc::new(FakePolicies::default());

    for _ in 0..2 {
        let audit = Arc::new(
            FakeAudit::with_pages(vec![page(&["dash-1"], None)]).creation("dash-1", "u1"),
        );
        let teams = Arc::new(FakeTeams::default().member("u1", team));
        sweeper(audit, Arc::new(FakeMonitors::default()), teams, policies.clone())
            .sweep(ResourceKind::Dashboard)
            .await
            .unwrap();
    }

    // two writes, one converged end state
    assert_eq!(policies.writes.load(Ordering::SeqCst), 2);
    let state = policies.state.lock().unwrap();
    assert_eq!(state.len(), 1);
    assert_eq!(
        state["dashboard:dash-1"],
        RestrictionPolicy::for_resource(
            ResourceKind::Dashboard,
            &ResourceId::from("dash-1"),
            team,
            &grants(),
        )
    );
}

#[tokio::test]
async fn test_sweep_walks_every_audit_page() {
    let team = TeamId(Uuid::new_v4());
    let ids: Vec<String> = (0..12).map(|n| format!("70{n:02}")).collect();
    let first: Vec<&str> = ids[..10].iter().map(String::as_str).collect();
    let rest: Vec<&str> = ids[10..].iter().map(String::as_str).collect();

    let audit = Arc::new(FakeAudit::with_pages(vec![
        page(&first, Some("next")),
        page(&rest, None),
    ]));
    let mut monitors = FakeMonitors::default();
    for id in &ids {
        monitors = monitors.tagged(id, &["team:sre"]);
    }
    let teams = Arc::new(FakeTeams::default().named("sre", team));
    let policies = Arc::new(FakePolicies::default());

    let report = sweeper(audit, Arc::new(monitors), teams, policies.clone())
        .sweep(ResourceKind::Monitor)
        .await
        .unwrap();

    assert_eq!(report.discovered, 12);
    assert_eq!(report.granted.len(), 12);
    assert_eq!(policies.state.lock().unwrap().len(), 12);
}
