// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog branching specs
//!
//! Exercises the catalog surface the orchestrator depends on, driven
//! through the `CatalogClient` trait rather than fake-only helpers.

use crate::prelude::*;
use floe_catalog::{CatalogClient, CatalogError, MemoryCatalog, WriteMode};
use floe_core::{
    AuditCheck, AuditContext, AuditPolicy, AuditVerdict, PolicyError, Row, RowCountPolicy,
    SequentialBranchNamer, TableRef,
};
use floe_engine::{RunStatus, WapConfig, WapError, WapOrchestrator};

#[tokio::test]
async fn a_branch_forks_from_the_base_branch_contents() {
    let (catalog, table) = seeded_table();
    catalog
        .write_rows(&table, "main", &people(), WriteMode::Append)
        .await
        .unwrap();

    catalog.create_branch(&table, "fork").await.unwrap();

    let forked = catalog.read_rows(&table, "fork").await.unwrap();
    assert_eq!(forked.len(), 3);
}

#[tokio::test]
async fn writes_to_a_branch_stay_off_the_base_branch() {
    let (catalog, table) = seeded_table();
    catalog.create_branch(&table, "fork").await.unwrap();

    catalog
        .write_rows(&table, "fork", &people(), WriteMode::Append)
        .await
        .unwrap();

    assert_eq!(catalog.read_rows(&table, "fork").await.unwrap().len(), 3);
    assert!(catalog.read_rows(&table, "main").await.unwrap().is_empty());
}

#[tokio::test]
async fn dropping_an_absent_branch_is_a_no_op() {
    let (catalog, table) = seeded_table();

    catalog.drop_branch(&table, "nope").await.unwrap();
    catalog.drop_branch(&table, "nope").await.unwrap();
}

#[tokio::test]
async fn unsetting_an_absent_property_is_a_no_op() {
    let (catalog, table) = seeded_table();

    catalog.unset_property(&table, "nope").await.unwrap();
}

#[tokio::test]
async fn fast_forward_requires_an_undiverged_target() {
    let (catalog, table) = seeded_table();
    catalog.create_branch(&table, "fork").await.unwrap();

    // Someone else lands rows on main after the fork.
    catalog.append_sync(&table, "main", &people()).unwrap();

    let err = catalog
        .fast_forward(&table, "main", "fork")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFastForward { .. }));
}

#[tokio::test]
async fn list_branches_is_sorted_by_name() {
    let (catalog, table) = seeded_table();
    catalog.create_branch(&table, "zeta").await.unwrap();
    catalog.create_branch(&table, "alpha").await.unwrap();

    let names: Vec<_> = catalog
        .list_branches(&table)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(names, vec!["alpha", "main", "zeta"]);
}

/// Passes everything, but sneaks an append onto the base branch while the
/// audit is running, simulating a concurrent writer.
struct ConcurrentWriter {
    catalog: MemoryCatalog,
    table: TableRef,
}

impl AuditPolicy for ConcurrentWriter {
    fn evaluate(&self, _ctx: &AuditContext, _audited: &[Row]) -> Result<AuditVerdict, PolicyError> {
        self.catalog
            .append_sync(&self.table, "main", &people())
            .map_err(|e| PolicyError::new(e.to_string()))?;
        let mut verdict = AuditVerdict::new();
        verdict.record(AuditCheck::passed("always-passes"));
        Ok(verdict)
    }
}

#[tokio::test]
async fn a_concurrent_writer_turns_the_publish_into_a_conflict() {
    let (catalog, table) = seeded_table();
    let wap = WapOrchestrator::with_parts(
        catalog.clone(),
        SequentialBranchNamer::new(),
        ConcurrentWriter {
            catalog: catalog.clone(),
            table: table.clone(),
        },
        WapConfig::default(),
    );

    let failure = wap.append(&table, &people()).await.unwrap_err();

    let branch = match failure.error {
        WapError::PublishConflict { base, branch } => {
            assert_eq!(base, "main");
            branch
        }
        other => panic!("expected publish conflict, got {other:?}"),
    };

    // The concurrent rows made it to main; the audited rows did not, and
    // still wait on the retained branch.
    assert_eq!(catalog.rows_on_branch(&table, "main").unwrap().len(), 3);
    assert_eq!(catalog.rows_on_branch(&table, &branch).unwrap().len(), 3);
}

#[tokio::test]
async fn a_custom_base_branch_is_honored_end_to_end() {
    let (catalog, table) = seeded_table();
    catalog.create_branch(&table, "staging").await.unwrap();

    let config = WapConfig {
        base_branch: "staging".to_string(),
        ..WapConfig::default()
    };
    let wap = WapOrchestrator::with_parts(
        catalog.clone(),
        SequentialBranchNamer::new(),
        RowCountPolicy,
        config,
    );

    let report = wap.append(&table, &people()).await.unwrap();

    assert_eq!(report.status, RunStatus::Published);
    assert_eq!(catalog.rows_on_branch(&table, "staging").unwrap().len(), 3);
    assert!(catalog.rows_on_branch(&table, "main").unwrap().is_empty());
}
