// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in audit policies

use super::{AuditCheck, AuditContext, AuditPolicy, AuditVerdict, PolicyError};
use crate::table::Row;

/// Default policy: the audit branch must hold exactly the pre-write rows
/// plus the payload, and must not be empty. Both checks must pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowCountPolicy;

impl AuditPolicy for RowCountPolicy {
    fn evaluate(&self, ctx: &AuditContext, audited: &[Row]) -> Result<AuditVerdict, PolicyError> {
        let mut verdict = AuditVerdict::new();

        if audited.len() == ctx.expected_total() {
            verdict.record(AuditCheck::passed("row-count"));
        } else {
            verdict.record(AuditCheck::failed(
                "row-count",
                format!(
                    "expected {} rows on the audit branch, found {}",
                    ctx.expected_total(),
                    audited.len()
                ),
            ));
        }

        if audited.is_empty() {
            verdict.record(AuditCheck::failed("non-empty", "audit branch holds 0 rows"));
        } else {
            verdict.record(AuditCheck::passed("non-empty"));
        }

        Ok(verdict)
    }
}

/// Runs an ordered list of policies and concatenates their checks, so
/// additional business rules compose without touching orchestrator logic.
#[derive(Default)]
pub struct CompositePolicy {
    policies: Vec<Box<dyn AuditPolicy>>,
}

impl CompositePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, policy: impl AuditPolicy + 'static) -> Self {
        self.policies.push(Box::new(policy));
        self
    }
}

impl AuditPolicy for CompositePolicy {
    fn evaluate(&self, ctx: &AuditContext, audited: &[Row]) -> Result<AuditVerdict, PolicyError> {
        let mut verdict = AuditVerdict::new();
        for policy in &self.policies {
            for check in policy.evaluate(ctx, audited)?.into_checks() {
                verdict.record(check);
            }
        }
        Ok(verdict)
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
