// src/exec/process.rs

//! Production launcher: one suite, one child process.

use std::future::Future;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::{debug, error, info, warn};

use crate::exec::backend::{Attempt, SuiteLauncher};
use crate::exec::shutdown::ShutdownListener;
use crate::suite::{Invocation, SuiteDescriptor};
use crate::types::Termination;

/// Spawns each suite with inherited stdio and waits for it.
///
/// If shutdown is requested while the child runs, the child is sent SIGTERM
/// and given `grace` to exit before being killed outright.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    shutdown: ShutdownListener,
    grace: Duration,
}

impl ProcessLauncher {
    pub fn new(shutdown: ShutdownListener, grace: Duration) -> Self {
        Self { shutdown, grace }
    }
}

impl SuiteLauncher for ProcessLauncher {
    fn launch(
        &mut self,
        suite: &SuiteDescriptor,
    ) -> Pin<Box<dyn Future<Output = Attempt> + Send + '_>> {
        let suite = suite.clone();
        Box::pin(async move { run_suite(&suite, &mut self.shutdown, self.grace).await })
    }
}

/// Run a single suite to completion (or until shutdown).
pub async fn run_suite(
    suite: &SuiteDescriptor,
    shutdown: &mut ShutdownListener,
    grace: Duration,
) -> Attempt {
    let invocation = suite.invocation();
    info!(suite = %suite.id(), cmd = %invocation, "starting suite process");

    let mut child = match build_command(invocation).spawn() {
        Ok(child) => child,
        Err(e) => {
            error!(
                suite = %suite.id(),
                program = %invocation.program,
                error = %e,
                "failed to spawn suite process"
            );
            return Attempt::completed(Termination::spawn_failed(e.to_string()));
        }
    };

    debug!(suite = %suite.id(), pid = ?child.id(), "suite process spawned");

    tokio::select! {
        status_res = child.wait() => {
            let termination = termination_from_wait(suite, status_res);
            if stopped_by_shutdown(&termination, shutdown).await {
                debug!(suite = %suite.id(), "suite ended alongside shutdown request");
                Attempt::interrupted(termination)
            } else {
                Attempt::completed(termination)
            }
        }

        _ = shutdown.requested() => {
            info!(
                suite = %suite.id(),
                grace_ms = grace.as_millis() as u64,
                "shutdown requested while suite running; terminating child"
            );
            let termination = terminate_child(suite, &mut child, grace).await;
            Attempt::interrupted(termination)
        }
    }
}

/// How long a child that died of SIGINT/SIGTERM waits for our own signal
/// listener to catch up. A terminal Ctrl-C hits the whole process group, so
/// the child can be reaped before the shutdown flag flips.
const SIGNAL_SETTLE: Duration = Duration::from_millis(100);

async fn stopped_by_shutdown(termination: &Termination, shutdown: &mut ShutdownListener) -> bool {
    if shutdown.is_requested() {
        return true;
    }
    if !is_termination_signal(termination) {
        return false;
    }
    tokio::time::timeout(SIGNAL_SETTLE, shutdown.requested())
        .await
        .is_ok()
}

/// SIGINT (2) or SIGTERM (15), either raw or as the shell's `128 + n` code.
fn is_termination_signal(termination: &Termination) -> bool {
    matches!(
        termination,
        Termination::Signaled { signal: 2 | 15 } | Termination::Exited { code: 130 | 143 }
    )
}

fn build_command(invocation: &Invocation) -> Command {
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .envs(&invocation.env)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    if let Some(cwd) = &invocation.cwd {
        cmd.current_dir(cwd);
    }

    cmd
}

/// Ask the child to stop, wait up to `grace`, then kill it.
async fn terminate_child(suite: &SuiteDescriptor, child: &mut Child, grace: Duration) -> Termination {
    request_termination(suite, child);

    match tokio::time::timeout(grace, child.wait()).await {
        Ok(status_res) => termination_from_wait(suite, status_res),
        Err(_) => {
            warn!(
                suite = %suite.id(),
                "suite did not exit within grace period; killing"
            );
            if let Err(e) = child.kill().await {
                warn!(suite = %suite.id(), error = %e, "failed to kill suite process");
            }
            termination_from_wait(suite, child.wait().await)
        }
    }
}

#[cfg(unix)]
fn request_termination(suite: &SuiteDescriptor, child: &mut Child) {
    let Some(pid) = child.id() else {
        // Already reaped.
        return;
    };

    // SAFETY: kill(2) only sends a signal to a pid we spawned and have not
    // yet reaped, so it cannot hit an unrelated recycled pid.
    let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
    if rc != 0 {
        warn!(
            suite = %suite.id(),
            pid,
            error = %std::io::Error::last_os_error(),
            "failed to forward SIGTERM to suite process"
        );
    }
}

#[cfg(not(unix))]
fn request_termination(suite: &SuiteDescriptor, child: &mut Child) {
    if let Err(e) = child.start_kill() {
        warn!(suite = %suite.id(), error = %e, "failed to stop suite process");
    }
}

fn termination_from_wait(
    suite: &SuiteDescriptor,
    status_res: std::io::Result<ExitStatus>,
) -> Termination {
    match status_res {
        Ok(status) => {
            let termination = classify_exit_status(status);
            info!(
                suite = %suite.id(),
                success = termination.is_success(),
                "suite process {termination}"
            );
            termination
        }
        Err(e) => {
            error!(suite = %suite.id(), error = %e, "failed to wait for suite process");
            Termination::spawn_failed(format!("waiting for process: {e}"))
        }
    }
}

/// Numeric status if there is one, otherwise the terminating signal.
pub fn classify_exit_status(status: ExitStatus) -> Termination {
    if let Some(code) = status.code() {
        return Termination::exited(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Termination::signaled(signal);
        }
    }

    // Only reachable on platforms without signals; keep it a failure.
    Termination::signaled(0)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;

    #[test]
    fn recognises_termination_signals() {
        assert!(is_termination_signal(&Termination::signaled(libc::SIGINT)));
        assert!(is_termination_signal(&Termination::signaled(libc::SIGTERM)));
        assert!(is_termination_signal(&Termination::exited(130)));
        assert!(!is_termination_signal(&Termination::signaled(libc::SIGKILL)));
        assert!(!is_termination_signal(&Termination::exited(1)));
    }

    #[test]
    fn classifies_exit_codes_and_signals() {
        // Raw wait(2) status: exit code in the high byte, signal in the low bits.
        assert_eq!(classify_exit_status(ExitStatus::from_raw(0)), Termination::exited(0));
        assert_eq!(
            classify_exit_status(ExitStatus::from_raw(7 << 8)),
            Termination::exited(7)
        );
        assert_eq!(
            classify_exit_status(ExitStatus::from_raw(libc::SIGKILL)),
            Termination::signaled(libc::SIGKILL)
        );
    }
}
