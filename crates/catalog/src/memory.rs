// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory catalog for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{BranchInfo, CatalogClient, CatalogError, WriteMode};
use async_trait::async_trait;
use floe_core::{Row, TableRef, DEFAULT_BASE_BRANCH};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded catalog call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCall {
    CreateBranch {
        table: String,
        name: String,
    },
    DropBranch {
        table: String,
        name: String,
    },
    WriteRows {
        table: String,
        branch: String,
        rows: usize,
        mode: WriteMode,
    },
    ReadRows {
        table: String,
        branch: String,
    },
    FastForward {
        table: String,
        target: String,
        source: String,
    },
    SetProperty {
        table: String,
        key: String,
        value: String,
    },
    UnsetProperty {
        table: String,
        key: String,
    },
    ListBranches {
        table: String,
    },
}

/// A branch is a pointer to one version, remembering where it forked from.
#[derive(Debug, Clone, Copy)]
struct BranchState {
    version: usize,
    forked_from: usize,
}

#[derive(Default)]
struct TableState {
    /// Full row set per version, version 0 first.
    versions: Vec<Vec<Row>>,
    branches: HashMap<String, BranchState>,
    properties: HashMap<String, String>,
}

/// Shared state with configurable failure modes
#[derive(Default)]
struct MemoryState {
    tables: HashMap<TableRef, TableState>,
    calls: Vec<CatalogCall>,
    create_branch_conflicts: u32,
    write_fails: bool,
    fast_forward_conflicts: bool,
    property_fails: bool,
    unset_property_fails: bool,
}

/// In-memory versioned catalog with call recording for testing
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Seed a table with an empty version 0 and a `main` branch, the way
    /// out-of-band table setup would.
    pub fn create_table(&self, table: &TableRef) {
        let mut state = self.lock();
        let table_state = state.tables.entry(table.clone()).or_default();
        table_state.versions = vec![Vec::new()];
        table_state.branches.insert(
            DEFAULT_BASE_BRANCH.to_string(),
            BranchState {
                version: 0,
                forked_from: 0,
            },
        );
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<CatalogCall> {
        self.lock().calls.clone()
    }

    /// Clear recorded calls
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn branch_exists(&self, table: &TableRef, name: &str) -> bool {
        self.lock()
            .tables
            .get(table)
            .is_some_and(|t| t.branches.contains_key(name))
    }

    /// Version a branch currently points at.
    pub fn branch_version(&self, table: &TableRef, name: &str) -> Option<u64> {
        self.lock()
            .tables
            .get(table)?
            .branches
            .get(name)
            .map(|b| b.version as u64)
    }

    /// Rows visible on a branch, if table and branch exist.
    pub fn rows_on_branch(&self, table: &TableRef, name: &str) -> Option<Vec<Row>> {
        let state = self.lock();
        let table_state = state.tables.get(table)?;
        let branch = table_state.branches.get(name)?;
        table_state.versions.get(branch.version).cloned()
    }

    pub fn property(&self, table: &TableRef, key: &str) -> Option<String> {
        self.lock()
            .tables
            .get(table)?
            .properties
            .get(key)
            .cloned()
    }

    /// Append directly to a branch, bypassing the client surface and call
    /// recording. Lets tests interleave a concurrent writer mid-run.
    pub fn append_sync(
        &self,
        table: &TableRef,
        branch: &str,
        rows: &[Row],
    ) -> Result<(), CatalogError> {
        let mut state = self.lock();
        Self::write(&mut state, table, branch, rows, WriteMode::Append)
    }

    /// Configure the next `n` create_branch calls to report a conflict
    pub fn set_create_branch_conflicts(&self, n: u32) {
        self.lock().create_branch_conflicts = n;
    }

    /// Configure writes to fail for testing error paths
    pub fn set_write_fails(&self, fails: bool) {
        self.lock().write_fails = fails;
    }

    /// Configure fast-forwards to report divergence
    pub fn set_fast_forward_conflicts(&self, conflicts: bool) {
        self.lock().fast_forward_conflicts = conflicts;
    }

    /// Configure set_property to fail
    pub fn set_property_fails(&self, fails: bool) {
        self.lock().property_fails = fails;
    }

    /// Configure unset_property to fail
    pub fn set_unset_property_fails(&self, fails: bool) {
        self.lock().unset_property_fails = fails;
    }

    fn write(
        state: &mut MemoryState,
        table: &TableRef,
        branch: &str,
        rows: &[Row],
        mode: WriteMode,
    ) -> Result<(), CatalogError> {
        let table_state = state
            .tables
            .get_mut(table)
            .ok_or_else(|| CatalogError::TableNotFound(table.clone()))?;
        let current = *table_state
            .branches
            .get(branch)
            .ok_or_else(|| CatalogError::BranchNotFound(branch.to_string()))?;

        let new_rows = match mode {
            WriteMode::Append => {
                let mut base = table_state
                    .versions
                    .get(current.version)
                    .cloned()
                    .unwrap_or_default();
                base.extend(rows.iter().cloned());
                base
            }
            WriteMode::Overwrite => rows.to_vec(),
        };

        table_state.versions.push(new_rows);
        let new_version = table_state.versions.len() - 1;
        if let Some(b) = table_state.branches.get_mut(branch) {
            b.version = new_version;
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogClient for MemoryCatalog {
    async fn create_branch(&self, table: &TableRef, name: &str) -> Result<(), CatalogError> {
        let mut state = self.lock();
        state.calls.push(CatalogCall::CreateBranch {
            table: table.to_string(),
            name: name.to_string(),
        });

        if state.create_branch_conflicts > 0 {
            state.create_branch_conflicts -= 1;
            return Err(CatalogError::BranchConflict(name.to_string()));
        }

        let table_state = state
            .tables
            .get_mut(table)
            .ok_or_else(|| CatalogError::TableNotFound(table.clone()))?;
        if table_state.branches.contains_key(name) {
            return Err(CatalogError::BranchConflict(name.to_string()));
        }

        // New branches fork from the base branch's current version.
        let base = *table_state
            .branches
            .get(DEFAULT_BASE_BRANCH)
            .ok_or_else(|| CatalogError::BranchNotFound(DEFAULT_BASE_BRANCH.to_string()))?;
        table_state.branches.insert(
            name.to_string(),
            BranchState {
                version: base.version,
                forked_from: base.version,
            },
        );
        Ok(())
    }

    async fn drop_branch(&self, table: &TableRef, name: &str) -> Result<(), CatalogError> {
        let mut state = self.lock();
        state.calls.push(CatalogCall::DropBranch {
            table: table.to_string(),
            name: name.to_string(),
        });

        let table_state = state
            .tables
            .get_mut(table)
            .ok_or_else(|| CatalogError::TableNotFound(table.clone()))?;
        table_state.branches.remove(name);
        Ok(())
    }

    async fn write_rows(
        &self,
        table: &TableRef,
        branch: &str,
        rows: &[Row],
        mode: WriteMode,
    ) -> Result<(), CatalogError> {
        let mut state = self.lock();
        state.calls.push(CatalogCall::WriteRows {
            table: table.to_string(),
            branch: branch.to_string(),
            rows: rows.len(),
            mode,
        });

        if state.write_fails {
            return Err(CatalogError::WriteFailed("injected write failure".to_string()));
        }

        Self::write(&mut state, table, branch, rows, mode)
    }

    async fn read_rows(&self, table: &TableRef, branch: &str) -> Result<Vec<Row>, CatalogError> {
        let mut state = self.lock();
        state.calls.push(CatalogCall::ReadRows {
            table: table.to_string(),
            branch: branch.to_string(),
        });

        let table_state = state
            .tables
            .get(table)
            .ok_or_else(|| CatalogError::TableNotFound(table.clone()))?;
        let current = table_state
            .branches
            .get(branch)
            .ok_or_else(|| CatalogError::BranchNotFound(branch.to_string()))?;
        Ok(table_state
            .versions
            .get(current.version)
            .cloned()
            .unwrap_or_default())
    }

    async fn fast_forward(
        &self,
        table: &TableRef,
        target: &str,
        source: &str,
    ) -> Result<(), CatalogError> {
        let mut state = self.lock();
        state.calls.push(CatalogCall::FastForward {
            table: table.to_string(),
            target: target.to_string(),
            source: source.to_string(),
        });

        if state.fast_forward_conflicts {
            return Err(CatalogError::NotFastForward {
                target: target.to_string(),
                source_branch: source.to_string(),
            });
        }

        let table_state = state
            .tables
            .get_mut(table)
            .ok_or_else(|| CatalogError::TableNotFound(table.clone()))?;
        let source_state = *table_state
            .branches
            .get(source)
            .ok_or_else(|| CatalogError::BranchNotFound(source.to_string()))?;
        let target_state = *table_state
            .branches
            .get(target)
            .ok_or_else(|| CatalogError::BranchNotFound(target.to_string()))?;

        // True fast-forward only: the target must not have advanced since
        // the source forked from it.
        if target_state.version != source_state.forked_from {
            return Err(CatalogError::NotFastForward {
                target: target.to_string(),
                source_branch: source.to_string(),
            });
        }

        if let Some(t) = table_state.branches.get_mut(target) {
            t.version = source_state.version;
        }
        Ok(())
    }

    async fn set_property(
        &self,
        table: &TableRef,
        key: &str,
        value: &str,
    ) -> Result<(), CatalogError> {
        let mut state = self.lock();
        state.calls.push(CatalogCall::SetProperty {
            table: table.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        });

        if state.property_fails {
            return Err(CatalogError::Transport("injected property failure".to_string()));
        }

        let table_state = state
            .tables
            .get_mut(table)
            .ok_or_else(|| CatalogError::TableNotFound(table.clone()))?;
        table_state
            .properties
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn unset_property(&self, table: &TableRef, key: &str) -> Result<(), CatalogError> {
        let mut state = self.lock();
        state.calls.push(CatalogCall::UnsetProperty {
            table: table.to_string(),
            key: key.to_string(),
        });

        if state.unset_property_fails {
            return Err(CatalogError::Transport("injected property failure".to_string()));
        }

        let table_state = state
            .tables
            .get_mut(table)
            .ok_or_else(|| CatalogError::TableNotFound(table.clone()))?;
        table_state.properties.remove(key);
        Ok(())
    }

    async fn list_branches(&self, table: &TableRef) -> Result<Vec<BranchInfo>, CatalogError> {
        let mut state = self.lock();
        state.calls.push(CatalogCall::ListBranches {
            table: table.to_string(),
        });

        let table_state = state
            .tables
            .get(table)
            .ok_or_else(|| CatalogError::TableNotFound(table.clone()))?;
        let mut branches: Vec<BranchInfo> = table_state
            .branches
            .iter()
            .map(|(name, b)| BranchInfo {
                name: name.clone(),
                version: b.version as u64,
            })
            .collect();
        branches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(branches)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
