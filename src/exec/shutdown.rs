// src/exec/shutdown.rs

//! Shutdown plumbing.
//!
//! A single `watch` channel flips from `false` to `true` when the
//! orchestrator is asked to stop. The launcher selects on it while a child
//! is running; the orchestrator checks it before starting the next suite.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

/// Sending half. Cloneable so a signal task and tests can both hold one.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn request(&self) {
        // `send_replace` never fails, even with no receivers left.
        self.tx.send_replace(true);
    }
}

/// Receiving half.
#[derive(Debug, Clone)]
pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl ShutdownListener {
    /// A listener that is never triggered.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_requested(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown has been requested. Pending forever if every
    /// handle is dropped without requesting.
    pub async fn requested(&mut self) {
        let closed = self.rx.wait_for(|requested| *requested).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

pub fn channel() -> (ShutdownHandle, ShutdownListener) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx: Arc::new(tx) }, ShutdownListener { rx })
}

/// Install SIGINT/SIGTERM handlers (Ctrl-C on non-unix platforms) and
/// spawn a task that requests shutdown when one arrives.
///
/// Handlers are installed before this returns, so a signal sent any time
/// after the first suite starts is caught rather than killing us outright.
pub fn listen_for_signals(handle: ShutdownHandle) -> std::io::Result<JoinHandle<()>> {
    let signals = ShutdownSignals::install()?;
    Ok(tokio::spawn(async move {
        let signal = signals.recv().await;
        warn!(signal, "termination requested; stopping active suite");
        handle.request();
    }))
}

#[cfg(unix)]
struct ShutdownSignals {
    sigterm: tokio::signal::unix::Signal,
    sigint: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ShutdownSignals {
    fn install() -> std::io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            sigterm: signal(SignalKind::terminate())?,
            sigint: signal(SignalKind::interrupt())?,
        })
    }

    async fn recv(mut self) -> &'static str {
        tokio::select! {
            _ = self.sigterm.recv() => "SIGTERM",
            _ = self.sigint.recv() => "SIGINT",
        }
    }
}

#[cfg(not(unix))]
struct ShutdownSignals;

#[cfg(not(unix))]
impl ShutdownSignals {
    fn install() -> std::io::Result<Self> {
        Ok(Self)
    }

    async fn recv(self) -> &'static str {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        "CTRL_C"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn request_wakes_listener() {
        let (handle, mut listener) = channel();
        assert!(!listener.is_requested());

        let waiter = tokio::spawn(async move {
            listener.requested().await;
            listener.is_requested()
        });
        handle.request();

        let seen = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("listener not woken")
            .unwrap();
        assert!(seen);
    }

    #[tokio::test]
    async fn never_listener_stays_pending() {
        let mut listener = ShutdownListener::never();
        assert!(!listener.is_requested());
        let res = tokio::time::timeout(Duration::from_millis(50), listener.requested()).await;
        assert!(res.is_err());
    }
}
