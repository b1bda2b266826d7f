// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audit verdicts and named check results

use serde::{Deserialize, Serialize};

/// Outcome of a single named audit check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditCheck {
    pub name: String,
    pub passed: bool,
    /// Diagnostic detail, usually only present on failure.
    pub detail: Option<String>,
}

impl AuditCheck {
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            detail: None,
        }
    }

    pub fn failed(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            detail: Some(detail.into()),
        }
    }
}

/// Collected check results for one audit evaluation.
///
/// Derived fresh each run and never persisted by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditVerdict {
    checks: Vec<AuditCheck>,
}

impl AuditVerdict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_checks(checks: Vec<AuditCheck>) -> Self {
        Self { checks }
    }

    /// Append a check result.
    pub fn record(&mut self, check: AuditCheck) {
        self.checks.push(check);
    }

    /// True iff every check passed. An empty verdict passes: no rules,
    /// nothing to fail.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn checks(&self) -> &[AuditCheck] {
        &self.checks
    }

    pub fn into_checks(self) -> Vec<AuditCheck> {
        self.checks
    }

    /// The checks that failed, for reporting.
    pub fn failures(&self) -> impl Iterator<Item = &AuditCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

#[cfg(test)]
#[path = "verdict_tests.rs"]
mod tests;
