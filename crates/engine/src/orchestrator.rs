// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Write-Audit-Publish orchestrator
//!
//! Drives one run: enable the WAP property, write the payload to a fresh
//! audit branch, evaluate the audit policy, then either fast-forward the
//! base branch (publish) or leave the audit branch for inspection (reject).
//! The WAP property is unset on every exit path after it was set.

use crate::config::WapConfig;
use crate::error::{RunFailure, WapError};
use crate::run::{RunPhase, RunReport, RunStatus};
use chrono::Utc;
use floe_catalog::{CatalogClient, CatalogError, WriteMode};
use floe_core::{
    AuditContext, AuditPolicy, BranchNamer, RandomBranchNamer, Row, RowCountPolicy, TableRef,
};

/// Table property that marks WAP-mode writes as permitted. Observable as
/// set only while a run is in flight.
pub const WAP_ENABLED_PROP: &str = "write.wap.enabled";

/// Orchestrates WAP runs against one catalog.
///
/// Generic over the catalog client, the branch namer, and the audit policy;
/// all three are injected rather than read from shared session state.
pub struct WapOrchestrator<C, N, P> {
    catalog: C,
    namer: N,
    policy: P,
    config: WapConfig,
}

impl<C: CatalogClient> WapOrchestrator<C, RandomBranchNamer, RowCountPolicy> {
    /// Orchestrator with the default namer, default audit policy, and
    /// default configuration.
    pub fn new(catalog: C) -> Self {
        Self::with_parts(catalog, RandomBranchNamer, RowCountPolicy, WapConfig::default())
    }
}

impl<C, N, P> WapOrchestrator<C, N, P>
where
    C: CatalogClient,
    N: BranchNamer,
    P: AuditPolicy,
{
    pub fn with_parts(catalog: C, namer: N, policy: P, config: WapConfig) -> Self {
        Self {
            catalog,
            namer,
            policy,
            config,
        }
    }

    /// Run one write-audit-publish cycle for `rows`.
    ///
    /// Returns a report for both terminal outcomes (published or rejected);
    /// infrastructure, write, publish, and policy failures surface as
    /// `RunFailure` after cleanup has been attempted.
    pub async fn append(&self, table: &TableRef, rows: &[Row]) -> Result<RunReport, RunFailure> {
        let started_at = Utc::now();
        let span = tracing::info_span!("wap_run", table = %table, rows = rows.len());
        let _guard = span.enter();

        // Nothing to clean up if enabling the property fails.
        self.catalog
            .set_property(table, WAP_ENABLED_PROP, "true")
            .await
            .map_err(|e| RunFailure::new(WapError::Infrastructure(e)))?;
        self.transition(RunPhase::PropertyEnabled);

        let outcome = self.run_enabled(table, rows, started_at).await;

        // Cleanup runs on every exit path from here on. A cleanup failure
        // never masks an error already in flight.
        let cleanup_error = self
            .catalog
            .unset_property(table, WAP_ENABLED_PROP)
            .await
            .err();

        match (outcome, cleanup_error) {
            (Ok(report), None) => {
                tracing::info!(status = ?report.status, branch = %report.audit_branch, "run finished");
                Ok(report)
            }
            (Ok(report), Some(e)) => {
                tracing::error!(error = %e, "cleanup failed after a finished run");
                // The run's outcome rides along so callers can tell a
                // published-but-dirty table from a failed run.
                Err(RunFailure {
                    error: WapError::Infrastructure(e),
                    cleanup_error: None,
                    report: Some(report),
                })
            }
            (Err(error), cleanup_error) => {
                tracing::error!(error = %error, "run failed");
                Err(RunFailure {
                    error,
                    cleanup_error,
                    report: None,
                })
            }
        }
    }

    /// The body of a run, executed with the WAP property set.
    async fn run_enabled(
        &self,
        table: &TableRef,
        rows: &[Row],
        started_at: chrono::DateTime<Utc>,
    ) -> Result<RunReport, WapError> {
        // Informational only; a failure here never aborts the run.
        match self.catalog.list_branches(table).await {
            Ok(branches) => {
                let names: Vec<&str> = branches.iter().map(|b| b.name.as_str()).collect();
                tracing::debug!(refs = ?names, "existing refs");
            }
            Err(e) => tracing::warn!(error = %e, "could not list refs"),
        }

        let audit_branch = self.create_audit_branch(table).await?;
        self.transition(RunPhase::BranchReady);

        // Pre-write baseline for the policy: what the branch held before
        // the payload landed.
        let pre_write_row_count = self
            .catalog
            .read_rows(table, &audit_branch)
            .await
            .map_err(WapError::Infrastructure)?
            .len();

        if let Err(e) = self
            .catalog
            .write_rows(table, &audit_branch, rows, WriteMode::Append)
            .await
        {
            // The branch is retained for forensic inspection; it is never
            // auto-deleted after a failed write.
            return Err(WapError::Write {
                branch: audit_branch,
                source: e,
            });
        }
        self.transition(RunPhase::Written);

        let audited = self
            .catalog
            .read_rows(table, &audit_branch)
            .await
            .map_err(WapError::Infrastructure)?;
        let ctx = AuditContext {
            payload_row_count: rows.len(),
            pre_write_row_count,
        };
        let verdict = self.policy.evaluate(&ctx, &audited)?;
        self.transition(RunPhase::Audited);

        if !verdict.passed() {
            for failure in verdict.failures() {
                tracing::warn!(
                    check = %failure.name,
                    detail = failure.detail.as_deref().unwrap_or(""),
                    "audit check failed"
                );
            }
            tracing::info!(branch = %audit_branch, "audit failed, retaining branch");
            self.transition(RunPhase::Terminal);
            return Ok(RunReport {
                status: RunStatus::Rejected,
                audit_branch,
                checks: verdict.into_checks(),
                started_at,
            });
        }

        match self
            .catalog
            .fast_forward(table, &self.config.base_branch, &audit_branch)
            .await
        {
            Ok(()) => {}
            Err(CatalogError::NotFastForward { .. }) => {
                // The audit branch still holds unpublished, audited data;
                // keep it.
                return Err(WapError::PublishConflict {
                    base: self.config.base_branch.clone(),
                    branch: audit_branch,
                });
            }
            Err(e) => return Err(WapError::Infrastructure(e)),
        }

        // The branch served its purpose; the base branch now reflects it.
        self.catalog
            .drop_branch(table, &audit_branch)
            .await
            .map_err(WapError::Infrastructure)?;

        tracing::info!(branch = %audit_branch, base = %self.config.base_branch, "published");
        self.transition(RunPhase::Terminal);
        Ok(RunReport {
            status: RunStatus::Published,
            audit_branch,
            checks: verdict.into_checks(),
            started_at,
        })
    }

    /// Drop-then-create a fresh audit branch, regenerating the name on
    /// conflict up to the configured attempt budget.
    async fn create_audit_branch(&self, table: &TableRef) -> Result<String, WapError> {
        let mut attempt = 0;
        loop {
            let name = self.namer.generate(&self.config.branch_prefix);

            // Drop any stale branch from a previous failed run reusing the
            // same name.
            self.catalog
                .drop_branch(table, &name)
                .await
                .map_err(WapError::Infrastructure)?;

            match self.catalog.create_branch(table, &name).await {
                Ok(()) => return Ok(name),
                Err(CatalogError::BranchConflict(_)) if attempt + 1 < self.config.max_name_attempts => {
                    attempt += 1;
                    tracing::warn!(branch = %name, attempt, "branch name collision, regenerating");
                }
                Err(e) => return Err(WapError::Infrastructure(e)),
            }
        }
    }

    fn transition(&self, phase: RunPhase) {
        tracing::debug!(phase = phase.name(), "phase");
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
