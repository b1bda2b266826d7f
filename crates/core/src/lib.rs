// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! floe-core: domain types for Write-Audit-Publish orchestration
//!
//! This crate provides:
//! - Table identity and opaque row payloads
//! - Branch name generation (random and deterministic)
//! - The audit policy seam: verdicts, named checks, a default policy,
//!   and composition

pub mod audit;
pub mod namer;
pub mod table;

// Re-exports
pub use audit::{
    AuditCheck, AuditContext, AuditPolicy, AuditVerdict, CompositePolicy, PolicyError,
    RowCountPolicy,
};
pub use namer::{BranchNamer, RandomBranchNamer, SequentialBranchNamer};
pub use table::{Row, TableRef, DEFAULT_BASE_BRANCH};
