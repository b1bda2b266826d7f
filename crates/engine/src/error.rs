// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for WAP runs

use crate::run::RunReport;
use floe_catalog::CatalogError;
use floe_core::PolicyError;
use thiserror::Error;

/// Failures that abort a run
#[derive(Debug, Error)]
pub enum WapError {
    /// Property or branch management failed for reasons unrelated to the
    /// audit outcome.
    #[error("audit infrastructure error: {0}")]
    Infrastructure(#[from] CatalogError),
    /// The payload write to the audit branch failed. The branch is retained
    /// for inspection.
    #[error("write to audit branch {branch} failed: {source}")]
    Write {
        branch: String,
        source: CatalogError,
    },
    /// The base branch diverged between branch creation and publish. The
    /// audit branch still holds the unpublished, audited data.
    #[error("publish conflict: {base} diverged from audit branch {branch}")]
    PublishConflict { base: String, branch: String },
    /// The audit policy itself failed to evaluate.
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// A failed run: the primary error, plus any cleanup failure.
///
/// Cleanup (unsetting the WAP property) runs on every exit path; when it
/// fails while another error is already propagating, that failure is
/// attached here rather than masking the primary error.
#[derive(Debug)]
pub struct RunFailure {
    pub error: WapError,
    pub cleanup_error: Option<CatalogError>,
    /// The finished report when the run itself completed and only cleanup
    /// failed. Lets callers see that a publish actually happened.
    pub report: Option<RunReport>,
}

impl RunFailure {
    pub(crate) fn new(error: WapError) -> Self {
        Self {
            error,
            cleanup_error: None,
            report: None,
        }
    }
}

impl From<WapError> for RunFailure {
    fn from(error: WapError) -> Self {
        Self::new(error)
    }
}

impl std::fmt::Display for RunFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(cleanup) = &self.cleanup_error {
            write!(f, " (cleanup also failed: {})", cleanup)?;
        }
        Ok(())
    }
}

impl std::error::Error for RunFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
