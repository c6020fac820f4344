// src/engine/mod.rs

//! Orchestration engine for suiterun.
//!
//! The pure fail-fast state machine lives in [`core`]; the async shell that
//! walks the suite list and drives a [`crate::exec::SuiteLauncher`] is
//! implemented in [`runtime`].

use crate::report::ExecutionResult;

/// Events fed into the core, one per thing that can happen during a run.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// A suite's child terminated on its own.
    SuiteFinished(ExecutionResult),
    /// A suite's child was stopped because shutdown was requested.
    SuiteInterrupted(ExecutionResult),
    /// Shutdown was requested while no suite was running.
    ShutdownRequested,
}

/// What the shell should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Launch the next suite, if any.
    Continue,
    /// Stop the run; nothing else may be launched.
    Halt,
}

pub mod core;
pub mod runtime;

pub use self::core::{RunCore, decide};
pub use runtime::Orchestrator;
