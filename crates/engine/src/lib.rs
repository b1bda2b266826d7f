// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! floe-engine: the Write-Audit-Publish orchestrator
//!
//! One `append` call is one run: enable WAP mode, write the payload to a
//! fresh audit branch, evaluate the audit policy against what landed, then
//! publish by atomic fast-forward or reject and retain the branch. The WAP
//! property is restored on every exit path.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod run;

// Re-exports
pub use config::WapConfig;
pub use error::{RunFailure, WapError};
pub use orchestrator::{WapOrchestrator, WAP_ENABLED_PROP};
pub use run::{RunPhase, RunReport, RunStatus};
