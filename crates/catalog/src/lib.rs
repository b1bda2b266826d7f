// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! floe-catalog: capability interface over a branch-capable table catalog
//!
//! Every operation is a remote call that can fail. The trait is the seam the
//! orchestrator drives; `MemoryCatalog` (test support) implements it against
//! versioned in-memory state, and `TracedCatalog` wraps any implementation
//! with tracing.

mod traced;

pub use traced::TracedCatalog;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod memory;
#[cfg(any(test, feature = "test-support"))]
pub use memory::{CatalogCall, MemoryCatalog};

use async_trait::async_trait;
use floe_core::{Row, TableRef};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("branch already exists: {0}")]
    BranchConflict(String),
    #[error("branch not found: {0}")]
    BranchNotFound(String),
    #[error("table not found: {0}")]
    TableNotFound(TableRef),
    #[error("not a fast-forward: {target} has diverged since {source_branch} was created")]
    NotFastForward {
        target: String,
        source_branch: String,
    },
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("catalog request failed: {0}")]
    Transport(String),
}

/// A named ref and the table version it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchInfo {
    pub name: String,
    pub version: u64,
}

/// How rows land on a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Accumulate onto the branch's current version.
    Append,
    /// Replace the branch's row set.
    Overwrite,
}

/// Capability interface over a versioned, branch-capable table service.
#[async_trait]
pub trait CatalogClient: Clone + Send + Sync + 'static {
    /// Create `name` pointing at the base branch's current version.
    /// Fails with `BranchConflict` if the name already exists.
    async fn create_branch(&self, table: &TableRef, name: &str) -> Result<(), CatalogError>;

    /// Remove the ref. A no-op if the branch does not exist, so cleanup
    /// stays idempotent.
    async fn drop_branch(&self, table: &TableRef, name: &str) -> Result<(), CatalogError>;

    /// Write `rows` as a new version on `branch`.
    async fn write_rows(
        &self,
        table: &TableRef,
        branch: &str,
        rows: &[Row],
        mode: WriteMode,
    ) -> Result<(), CatalogError>;

    /// Snapshot of the rows on `branch` at call time.
    async fn read_rows(&self, table: &TableRef, branch: &str) -> Result<Vec<Row>, CatalogError>;

    /// Atomically advance `target` to `source`'s version. Succeeds only if
    /// `target` still sits at the version `source` was forked from; this is
    /// the single atomic publish instant.
    async fn fast_forward(
        &self,
        table: &TableRef,
        target: &str,
        source: &str,
    ) -> Result<(), CatalogError>;

    /// Set a table-level property.
    async fn set_property(
        &self,
        table: &TableRef,
        key: &str,
        value: &str,
    ) -> Result<(), CatalogError>;

    /// Unset a table-level property. A no-op if absent.
    async fn unset_property(&self, table: &TableRef, key: &str) -> Result<(), CatalogError>;

    /// Current branches. Informational only; never drives control flow.
    async fn list_branches(&self, table: &TableRef) -> Result<Vec<BranchInfo>, CatalogError>;
}
