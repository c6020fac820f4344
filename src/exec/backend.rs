// src/exec/backend.rs

//! Pluggable launcher abstraction.
//!
//! The orchestrator talks to a `SuiteLauncher` instead of spawning processes
//! itself, which keeps the fail-fast protocol testable without real
//! processes.

use std::future::Future;
use std::pin::Pin;

use crate::suite::SuiteDescriptor;
use crate::types::Termination;

/// What came back from launching one suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub termination: Termination,
    /// The child was stopped because the orchestrator itself was asked to
    /// shut down.
    pub interrupted: bool,
}

impl Attempt {
    pub fn completed(termination: Termination) -> Self {
        Self {
            termination,
            interrupted: false,
        }
    }

    pub fn interrupted(termination: Termination) -> Self {
        Self {
            termination,
            interrupted: true,
        }
    }
}

/// Trait abstracting how a suite is run.
///
/// The returned future must resolve only once the suite has fully
/// terminated; the orchestrator relies on that to keep at most one child
/// alive at a time.
pub trait SuiteLauncher: Send {
    fn launch(
        &mut self,
        suite: &SuiteDescriptor,
    ) -> Pin<Box<dyn Future<Output = Attempt> + Send + '_>>;
}
