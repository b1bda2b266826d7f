// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run outcomes and phases

use chrono::{DateTime, Utc};
use floe_core::AuditCheck;
use serde::{Deserialize, Serialize};

/// Terminal business outcome of a run. Rejection is a reported outcome,
/// not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// The audit passed and `main` was fast-forwarded to the audit branch.
    Published,
    /// The audit failed; `main` is untouched and the audit branch is
    /// retained for inspection.
    Rejected,
}

/// Phases a run moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    PropertyEnabled,
    BranchReady,
    Written,
    Audited,
    Terminal,
}

impl RunPhase {
    pub fn name(&self) -> &'static str {
        match self {
            RunPhase::Idle => "idle",
            RunPhase::PropertyEnabled => "property_enabled",
            RunPhase::BranchReady => "branch_ready",
            RunPhase::Written => "written",
            RunPhase::Audited => "audited",
            RunPhase::Terminal => "terminal",
        }
    }
}

/// Result of a completed run. Aborted runs surface a `RunFailure` instead.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    /// Name of the audit branch this run used. Present on rejection so an
    /// operator can find the retained data.
    pub audit_branch: String,
    /// Check results from the audit policy, in evaluation order.
    pub checks: Vec<AuditCheck>,
    pub started_at: DateTime<Utc>,
}

impl RunReport {
    pub fn is_published(&self) -> bool {
        self.status == RunStatus::Published
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
