// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced catalog wrapper for consistent observability

use super::{BranchInfo, CatalogClient, CatalogError, WriteMode};
use async_trait::async_trait;
use floe_core::{Row, TableRef};

/// Wrapper that adds tracing to any CatalogClient
#[derive(Clone)]
pub struct TracedCatalog<C> {
    inner: C,
}

impl<C> TracedCatalog<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: CatalogClient> CatalogClient for TracedCatalog<C> {
    async fn create_branch(&self, table: &TableRef, name: &str) -> Result<(), CatalogError> {
        let span = tracing::info_span!("catalog.create_branch", table = %table, name);
        let _guard = span.enter();

        tracing::info!("creating branch");
        let start = std::time::Instant::now();
        let result = self.inner.create_branch(table, name).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "branch created"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "create failed"
            ),
        }
        result
    }

    async fn drop_branch(&self, table: &TableRef, name: &str) -> Result<(), CatalogError> {
        let span = tracing::info_span!("catalog.drop_branch", table = %table, name);
        let _guard = span.enter();

        let result = self.inner.drop_branch(table, name).await;
        match &result {
            Ok(()) => tracing::info!("branch dropped"),
            Err(e) => tracing::error!(error = %e, "drop failed"),
        }
        result
    }

    async fn write_rows(
        &self,
        table: &TableRef,
        branch: &str,
        rows: &[Row],
        mode: WriteMode,
    ) -> Result<(), CatalogError> {
        let span = tracing::info_span!("catalog.write_rows", table = %table, branch);
        let _guard = span.enter();

        tracing::info!(rows = rows.len(), mode = ?mode, "writing");
        let start = std::time::Instant::now();
        let result = self.inner.write_rows(table, branch, rows, mode).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "rows written"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "write failed"
            ),
        }
        result
    }

    async fn read_rows(&self, table: &TableRef, branch: &str) -> Result<Vec<Row>, CatalogError> {
        let span = tracing::info_span!("catalog.read_rows", table = %table, branch);
        let _guard = span.enter();

        tracing::debug!("reading");
        let result = self.inner.read_rows(table, branch).await;
        match &result {
            Ok(rows) => tracing::debug!(rows = rows.len(), "read"),
            Err(e) => tracing::error!(error = %e, "read failed"),
        }
        result
    }

    async fn fast_forward(
        &self,
        table: &TableRef,
        target: &str,
        source: &str,
    ) -> Result<(), CatalogError> {
        let span = tracing::info_span!("catalog.fast_forward", table = %table, target, source);
        let _guard = span.enter();

        tracing::info!("fast-forwarding");
        let start = std::time::Instant::now();
        let result = self.inner.fast_forward(table, target, source).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "fast-forwarded"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "fast-forward failed"
            ),
        }
        result
    }

    async fn set_property(
        &self,
        table: &TableRef,
        key: &str,
        value: &str,
    ) -> Result<(), CatalogError> {
        let span = tracing::info_span!("catalog.set_property", table = %table, key);
        let _guard = span.enter();

        let result = self.inner.set_property(table, key, value).await;
        match &result {
            Ok(()) => tracing::info!(value, "property set"),
            Err(e) => tracing::error!(error = %e, "set failed"),
        }
        result
    }

    async fn unset_property(&self, table: &TableRef, key: &str) -> Result<(), CatalogError> {
        let span = tracing::info_span!("catalog.unset_property", table = %table, key);
        let _guard = span.enter();

        let result = self.inner.unset_property(table, key).await;
        match &result {
            Ok(()) => tracing::info!("property unset"),
            Err(e) => tracing::error!(error = %e, "unset failed"),
        }
        result
    }

    async fn list_branches(&self, table: &TableRef) -> Result<Vec<BranchInfo>, CatalogError> {
        let span = tracing::info_span!("catalog.list_branches", table = %table);
        let _guard = span.enter();

        let result = self.inner.list_branches(table).await;
        match &result {
            Ok(branches) => tracing::debug!(count = branches.len(), "listed"),
            Err(e) => tracing::error!(error = %e, "list failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
