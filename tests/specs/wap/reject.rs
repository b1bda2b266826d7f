// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rejection specs
//!
//! A failing audit leaves main untouched and retains the audit branch
//! for inspection.

use crate::prelude::*;
use floe_core::{
    AuditCheck, AuditContext, AuditPolicy, AuditVerdict, PolicyError, Row, SequentialBranchNamer,
};
use floe_engine::{RunStatus, WapConfig, WapOrchestrator, WAP_ENABLED_PROP};

#[tokio::test]
async fn empty_payload_is_rejected() {
    let (catalog, table) = seeded_table();
    let wap = orchestrator(catalog.clone());

    let report = wap.append(&table, &[]).await.unwrap();

    assert_eq!(report.status, RunStatus::Rejected);
    assert!(!report.is_published());

    // Main is untouched.
    assert!(catalog.rows_on_branch(&table, "main").unwrap().is_empty());

    // The audit branch survives for inspection, holding the empty write.
    let retained = catalog.rows_on_branch(&table, &report.audit_branch).unwrap();
    assert!(retained.is_empty());
}

#[tokio::test]
async fn rejection_names_the_failed_check() {
    let (catalog, table) = seeded_table();
    let wap = orchestrator(catalog);

    let report = wap.append(&table, &[]).await.unwrap();

    let failed: Vec<_> = report
        .checks
        .iter()
        .filter(|c| !c.passed)
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(failed, vec!["non-empty"]);

    let detail = report
        .checks
        .iter()
        .find(|c| c.name == "non-empty")
        .and_then(|c| c.detail.as_deref())
        .unwrap();
    assert!(detail.contains("0 rows"));
}

#[tokio::test]
async fn wap_property_is_unset_after_a_rejection() {
    let (catalog, table) = seeded_table();
    let wap = orchestrator(catalog.clone());

    wap.append(&table, &[]).await.unwrap();

    assert_eq!(catalog.property(&table, WAP_ENABLED_PROP), None);
}

/// Rejects any row whose `age` falls below the floor.
struct AgeFloor(i64);

impl AuditPolicy for AgeFloor {
    fn evaluate(&self, _ctx: &AuditContext, audited: &[Row]) -> Result<AuditVerdict, PolicyError> {
        let mut verdict = AuditVerdict::new();
        let underage = audited
            .iter()
            .filter(|r| r.get("age").and_then(|v| v.as_i64()).unwrap_or(0) < self.0)
            .count();
        if underage == 0 {
            verdict.record(AuditCheck::passed("age-floor"));
        } else {
            verdict.record(AuditCheck::failed(
                "age-floor",
                format!("{underage} rows below age {}", self.0),
            ));
        }
        Ok(verdict)
    }
}

#[tokio::test]
async fn custom_policy_rejection_retains_the_written_rows() {
    let (catalog, table) = seeded_table();
    let wap = WapOrchestrator::with_parts(
        catalog.clone(),
        SequentialBranchNamer::new(),
        AgeFloor(25),
        WapConfig::default(),
    );

    // Charlie is 23, which trips the floor.
    let report = wap.append(&table, &people()).await.unwrap();

    assert_eq!(report.status, RunStatus::Rejected);
    assert!(catalog.rows_on_branch(&table, "main").unwrap().is_empty());
    assert_eq!(
        catalog.rows_on_branch(&table, &report.audit_branch).unwrap().len(),
        3
    );
}

#[tokio::test]
async fn retained_branch_does_not_block_the_next_run() {
    let (catalog, table) = seeded_table();
    let wap = orchestrator(catalog.clone());

    let rejected = wap.append(&table, &[]).await.unwrap();
    assert_eq!(rejected.status, RunStatus::Rejected);

    // A later run with real data still publishes.
    let published = wap.append(&table, &people()).await.unwrap();
    assert_eq!(published.status, RunStatus::Published);
    assert_eq!(catalog.rows_on_branch(&table, "main").unwrap().len(), 3);

    // The rejected branch is still there.
    assert!(catalog.branch_exists(&table, &rejected.audit_branch));
}
