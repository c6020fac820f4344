// src/engine/runtime.rs

use std::fmt;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::exec::{ShutdownListener, SuiteLauncher};
use crate::report::{ExecutionResult, RunReport};
use crate::suite::SuiteList;

use super::core::RunCore;
use super::{Decision, RunEvent};

/// Walks a [`SuiteList`] in order, one suite at a time, and delegates the
/// actual launching to a [`SuiteLauncher`].
///
/// This is a thin IO shell around [`RunCore`], which holds the fail-fast
/// semantics. The suite inventory is always passed in; the orchestrator
/// never loads it.
pub struct Orchestrator<L: SuiteLauncher> {
    launcher: L,
    shutdown: ShutdownListener,
}

impl<L: SuiteLauncher> fmt::Debug for Orchestrator<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("shutdown_requested", &self.shutdown.is_requested())
            .finish_non_exhaustive()
    }
}

impl<L: SuiteLauncher> Orchestrator<L> {
    pub fn new(launcher: L, shutdown: ShutdownListener) -> Self {
        Self { launcher, shutdown }
    }

    /// Run every suite in order, halting at the first failure.
    ///
    /// Each launch is awaited to completion before the next one starts.
    pub async fn run(&mut self, suites: &SuiteList) -> RunReport {
        info!(suites = suites.len(), "suite run started");

        let mut core = RunCore::new(suites.len());

        for suite in suites {
            if self.shutdown.is_requested() {
                warn!(next = %suite.id(), "shutdown requested; not starting further suites");
                core.step(RunEvent::ShutdownRequested);
                break;
            }

            let started = Instant::now();
            let attempt = self.launcher.launch(suite).await;
            let result = ExecutionResult::new(suite.id(), attempt.termination, started.elapsed());

            debug!(
                suite = %result.suite_id,
                termination = %result.termination,
                elapsed_ms = result.duration.as_millis() as u64,
                interrupted = attempt.interrupted,
                "suite finished"
            );

            let event = if attempt.interrupted {
                RunEvent::SuiteInterrupted(result)
            } else {
                RunEvent::SuiteFinished(result)
            };

            if core.step(event) == Decision::Halt {
                break;
            }
        }

        let report = core.finish();
        info!(
            attempted = report.attempted(),
            total = suites.len(),
            exit_code = report.exit_code(),
            "suite run finished"
        );
        report
    }
}
