// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audit policies and verdicts
//!
//! A policy is the pluggable business-rule seam of a WAP run: it sees the
//! rows read back from the audit branch and decides whether they may be
//! published. A failing verdict is a normal outcome, not an error; only a
//! policy that cannot evaluate at all returns `PolicyError`.

mod policy;
mod verdict;

pub use policy::{CompositePolicy, RowCountPolicy};
pub use verdict::{AuditCheck, AuditVerdict};

use crate::table::Row;
use thiserror::Error;

/// The audit policy itself failed to evaluate.
#[derive(Debug, Error)]
#[error("audit policy error: {0}")]
pub struct PolicyError(String);

impl PolicyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// What the orchestrator knows about a run when the policy evaluates it.
#[derive(Debug, Clone, Copy)]
pub struct AuditContext {
    /// Rows in the caller's payload.
    pub payload_row_count: usize,
    /// Rows already on the audit branch before the payload write.
    pub pre_write_row_count: usize,
}

impl AuditContext {
    /// Rows the audit branch should hold if exactly the payload landed.
    pub fn expected_total(&self) -> usize {
        self.pre_write_row_count + self.payload_row_count
    }
}

/// Business rules evaluated against data written to an audit branch.
///
/// Side-effect-free with respect to the table: a policy only reads. The
/// orchestrator calls `evaluate` exactly once per run, after the write and
/// before the publish decision, and never retries a failed audit.
pub trait AuditPolicy: Send + Sync {
    /// Judge the rows observed on the audit branch.
    fn evaluate(&self, ctx: &AuditContext, audited: &[Row]) -> Result<AuditVerdict, PolicyError>;
}
