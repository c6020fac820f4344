// src/report.rs

//! Run report: what was attempted, how each attempt ended, and the overall
//! outcome.
//!
//! A [`RunReport`] is built by [`crate::engine::RunCore`] and is read-only
//! afterwards. It serializes to JSON so CI tooling can pick it up via
//! `--report <PATH>`.

use std::path::Path;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::errors::Result;
use crate::suite::SuiteId;
use crate::types::{FailureKind, Termination};

/// Exit code used when the orchestrator itself was asked to stop.
///
/// Used whether SIGINT or SIGTERM triggered the stop.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Outcome of one attempted suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub suite_id: SuiteId,
    pub termination: Termination,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl ExecutionResult {
    pub fn new(suite_id: impl Into<SuiteId>, termination: Termination, duration: Duration) -> Self {
        Self {
            suite_id: suite_id.into(),
            termination,
            duration,
        }
    }

    pub fn is_success(&self) -> bool {
        self.termination.is_success()
    }
}

/// Overall result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    AllPassed,
    FailedAt {
        suite_id: SuiteId,
        code: i32,
        kind: FailureKind,
    },
    /// The orchestrator received a termination request. `suite_id` is the
    /// suite that was running at the time, if any.
    Interrupted { suite_id: Option<SuiteId> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub results: Vec<ExecutionResult>,
    pub outcome: Outcome,
}

impl RunReport {
    /// Process exit code for this report.
    pub fn exit_code(&self) -> i32 {
        match &self.outcome {
            Outcome::AllPassed => 0,
            Outcome::FailedAt { code, .. } => *code,
            Outcome::Interrupted { .. } => INTERRUPTED_EXIT_CODE,
        }
    }

    pub fn attempted(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn attempted_ids(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.suite_id.as_str()).collect()
    }

    pub fn total_duration(&self) -> Duration {
        self.results.iter().map(|r| r.duration).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

fn serialize_millis<S: Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
