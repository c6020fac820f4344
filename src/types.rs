use std::fmt;

use serde::Serialize;

/// Exit code forwarded when a suite failed without a usable numeric status
/// (killed by a signal, or never started).
pub const FALLBACK_EXIT_CODE: i32 = 1;

/// How a suite's child process ended.
///
/// - `Exited`: the process returned a numeric status.
/// - `Signaled`: the process was killed by a signal before it could return
///   one (unix only).
/// - `SpawnFailed`: the process could not be launched at all (missing
///   interpreter, permission denied, bad working directory, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    Exited { code: i32 },
    Signaled { signal: i32 },
    SpawnFailed { message: String },
}

impl Termination {
    pub fn exited(code: i32) -> Self {
        Termination::Exited { code }
    }

    pub fn signaled(signal: i32) -> Self {
        Termination::Signaled { signal }
    }

    pub fn spawn_failed(message: impl Into<String>) -> Self {
        Termination::SpawnFailed {
            message: message.into(),
        }
    }

    /// Only a zero exit status counts as success.
    pub fn is_success(&self) -> bool {
        matches!(self, Termination::Exited { code: 0 })
    }

    /// The exit code to forward for a failed suite, or `None` on success.
    pub fn failure_code(&self) -> Option<i32> {
        match self {
            Termination::Exited { code: 0 } => None,
            Termination::Exited { code } => Some(*code),
            Termination::Signaled { .. } | Termination::SpawnFailed { .. } => {
                Some(FALLBACK_EXIT_CODE)
            }
        }
    }

    /// Classify a non-success termination.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Termination::Exited { code: 0 } => None,
            Termination::Exited { .. } => Some(FailureKind::RuntimeFailure),
            Termination::Signaled { .. } => Some(FailureKind::SignalTermination),
            Termination::SpawnFailed { .. } => Some(FailureKind::SpawnError),
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Exited { code } => write!(f, "exited with code {code}"),
            Termination::Signaled { signal } => write!(f, "killed by signal {signal}"),
            Termination::SpawnFailed { message } => write!(f, "failed to spawn: {message}"),
        }
    }
}

/// Why a suite counts as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The invocation recipe could not be launched.
    SpawnError,
    /// The child ran and returned a nonzero status.
    RuntimeFailure,
    /// The child was killed by a signal.
    SignalTermination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exit_zero_is_success() {
        assert!(Termination::exited(0).is_success());
        assert!(!Termination::exited(2).is_success());
        assert!(!Termination::signaled(9).is_success());
        assert!(!Termination::spawn_failed("nope").is_success());
    }

    #[test]
    fn nonzero_exit_code_is_forwarded() {
        assert_eq!(Termination::exited(0).failure_code(), None);
        assert_eq!(Termination::exited(7).failure_code(), Some(7));
        assert_eq!(
            Termination::exited(7).failure_kind(),
            Some(FailureKind::RuntimeFailure)
        );
    }

    #[test]
    fn signal_uses_fallback_code_whatever_the_signal() {
        for sig in [2, 9, 15] {
            let t = Termination::signaled(sig);
            assert_eq!(t.failure_code(), Some(FALLBACK_EXIT_CODE));
            assert_eq!(t.failure_kind(), Some(FailureKind::SignalTermination));
        }
    }

    #[test]
    fn spawn_failure_is_distinguishable() {
        let t = Termination::spawn_failed("No such file or directory");
        assert_eq!(t.failure_code(), Some(FALLBACK_EXIT_CODE));
        assert_eq!(t.failure_kind(), Some(FailureKind::SpawnError));
        assert_eq!(t.to_string(), "failed to spawn: No such file or directory");
    }
}
