// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audit branch name generation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Length of the hexadecimal suffix appended to generated names.
const SUFFIX_LEN: usize = 6;

/// Generates collision-resistant, human-traceable branch names.
///
/// Collision probability is negligible but not zero; callers treat a
/// `BranchConflict` on create as retryable and regenerate.
pub trait BranchNamer: Clone + Send + Sync {
    fn generate(&self, prefix: &str) -> String;
}

/// Random namer for production use: `{prefix}_{6 hex chars}` from a v4 UUID.
#[derive(Clone, Default)]
pub struct RandomBranchNamer;

impl BranchNamer for RandomBranchNamer {
    fn generate(&self, prefix: &str) -> String {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        format!("{}_{}", prefix, &hex[..SUFFIX_LEN])
    }
}

/// Deterministic namer for testing: a shared counter rendered as a
/// fixed-width hex suffix. Clones share the counter.
#[derive(Clone)]
pub struct SequentialBranchNamer {
    counter: Arc<AtomicU64>,
}

impl SequentialBranchNamer {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start the counter at a known seed for reproducible names.
    pub fn starting_at(seed: u64) -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(seed)),
        }
    }
}

impl Default for SequentialBranchNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchNamer for SequentialBranchNamer {
    fn generate(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}_{:06x}", prefix, n)
    }
}

#[cfg(test)]
#[path = "namer_tests.rs"]
mod tests;
