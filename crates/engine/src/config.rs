// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run configuration

use floe_core::DEFAULT_BASE_BRANCH;
use serde::{Deserialize, Serialize};

/// Orchestration settings for WAP runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WapConfig {
    /// The reader-visible branch runs publish to.
    pub base_branch: String,
    /// Prefix for generated audit branch names.
    pub branch_prefix: String,
    /// How many branch names to try when creates keep reporting conflicts.
    pub max_name_attempts: u32,
}

impl Default for WapConfig {
    fn default() -> Self {
        Self {
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            branch_prefix: "audit".to_string(),
            max_name_attempts: 3,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
