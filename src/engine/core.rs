// src/engine/core.rs

//! Pure core of the fail-fast protocol.
//!
//! `RunCore` consumes [`RunEvent`]s and accumulates the [`RunReport`]. It
//! has no Tokio types, no processes and no IO, so the protocol can be unit
//! tested on its own.

use tracing::{debug, warn};

use crate::engine::{Decision, RunEvent};
use crate::report::{ExecutionResult, Outcome, RunReport};
use crate::types::Termination;

/// Decision rule: only `Exited(0)` lets the run continue.
pub fn decide(termination: &Termination) -> Decision {
    if termination.is_success() {
        Decision::Continue
    } else {
        Decision::Halt
    }
}

/// Incrementally built run state.
#[derive(Debug)]
pub struct RunCore {
    total: usize,
    results: Vec<ExecutionResult>,
    outcome: Option<Outcome>,
}

impl RunCore {
    /// `total` is the length of the suite list being run.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            results: Vec::with_capacity(total),
            outcome: None,
        }
    }

    pub fn is_halted(&self) -> bool {
        self.outcome.is_some()
    }

    /// Feed one event into the core.
    ///
    /// Once halted, further events are dropped so `results` stays a prefix
    /// ending at the first failure.
    pub fn step(&mut self, event: RunEvent) -> Decision {
        if self.is_halted() {
            warn!(?event, "event received after run halted; ignoring");
            return Decision::Halt;
        }
        if self.results.len() >= self.total && !matches!(event, RunEvent::ShutdownRequested) {
            warn!(?event, total = self.total, "more results than suites; ignoring");
            return Decision::Halt;
        }

        match event {
            RunEvent::SuiteFinished(result) => self.record_finished(result),
            RunEvent::SuiteInterrupted(result) => {
                self.outcome = Some(Outcome::Interrupted {
                    suite_id: Some(result.suite_id.clone()),
                });
                self.results.push(result);
                Decision::Halt
            }
            RunEvent::ShutdownRequested => {
                self.outcome = Some(Outcome::Interrupted { suite_id: None });
                Decision::Halt
            }
        }
    }

    fn record_finished(&mut self, result: ExecutionResult) -> Decision {
        let decision = decide(&result.termination);

        if decision == Decision::Halt {
            let code = result.termination.failure_code();
            let kind = result.termination.failure_kind();
            if let (Some(code), Some(kind)) = (code, kind) {
                debug!(suite = %result.suite_id, code, ?kind, "suite failed; halting run");
                self.outcome = Some(Outcome::FailedAt {
                    suite_id: result.suite_id.clone(),
                    code,
                    kind,
                });
            }
        }

        self.results.push(result);
        decision
    }

    /// Finalize the report. A run that never halted passed.
    pub fn finish(self) -> RunReport {
        RunReport {
            results: self.results,
            outcome: self.outcome.unwrap_or(Outcome::AllPassed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FailureKind;
    use std::time::Duration;

    fn finished(id: &str, t: Termination) -> RunEvent {
        RunEvent::SuiteFinished(ExecutionResult::new(id, t, Duration::from_millis(1)))
    }

    #[test]
    fn decision_rule() {
        assert_eq!(decide(&Termination::exited(0)), Decision::Continue);
        assert_eq!(decide(&Termination::exited(1)), Decision::Halt);
        assert_eq!(decide(&Termination::signaled(15)), Decision::Halt);
        assert_eq!(decide(&Termination::spawn_failed("x")), Decision::Halt);
    }

    #[test]
    fn empty_run_passes() {
        let report = RunCore::new(0).finish();
        assert_eq!(report.outcome, Outcome::AllPassed);
        assert!(report.results.is_empty());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn first_failure_halts_and_is_recorded() {
        let mut core = RunCore::new(3);
        assert_eq!(core.step(finished("A", Termination::exited(0))), Decision::Continue);
        assert_eq!(core.step(finished("B", Termination::exited(7))), Decision::Halt);
        assert!(core.is_halted());

        // Anything after the halt is dropped.
        assert_eq!(core.step(finished("C", Termination::exited(0))), Decision::Halt);

        let report = core.finish();
        assert_eq!(report.attempted_ids(), vec!["A", "B"]);
        assert_eq!(
            report.outcome,
            Outcome::FailedAt {
                suite_id: "B".into(),
                code: 7,
                kind: FailureKind::RuntimeFailure
            }
        );
        assert_eq!(report.exit_code(), 7);
    }

    #[test]
    fn signal_failure_forwards_fallback_code() {
        let mut core = RunCore::new(1);
        core.step(finished("A", Termination::signaled(9)));
        let report = core.finish();
        assert_eq!(report.exit_code(), 1);
        assert!(matches!(
            report.outcome,
            Outcome::FailedAt { kind: FailureKind::SignalTermination, .. }
        ));
    }

    #[test]
    fn interruption_records_the_running_suite() {
        let mut core = RunCore::new(2);
        let decision = core.step(RunEvent::SuiteInterrupted(ExecutionResult::new(
            "A",
            Termination::signaled(15),
            Duration::ZERO,
        )));
        assert_eq!(decision, Decision::Halt);
        let report = core.finish();
        assert_eq!(report.attempted(), 1);
        assert_eq!(
            report.outcome,
            Outcome::Interrupted {
                suite_id: Some("A".into())
            }
        );
    }

    #[test]
    fn shutdown_between_suites_attempts_nothing_more() {
        let mut core = RunCore::new(2);
        core.step(finished("A", Termination::exited(0)));
        assert_eq!(core.step(RunEvent::ShutdownRequested), Decision::Halt);
        let report = core.finish();
        assert_eq!(report.attempted_ids(), vec!["A"]);
        assert_eq!(report.outcome, Outcome::Interrupted { suite_id: None });
    }
}
