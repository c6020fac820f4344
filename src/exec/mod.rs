// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually launching suites as child
//! processes using `tokio::process::Command`, and for propagating a
//! termination request to the active child.
//!
//! - [`backend`] provides the `SuiteLauncher` trait the orchestrator talks
//!   to. Tests replace it with a fake that never spawns anything.
//! - [`process`] is the production launcher (`ProcessLauncher`).
//! - [`shutdown`] carries SIGINT/SIGTERM from the signal listener to
//!   whoever is waiting on a child.

pub mod backend;
pub mod process;
pub mod shutdown;

pub use backend::{Attempt, SuiteLauncher};
pub use process::ProcessLauncher;
pub use shutdown::{ShutdownHandle, ShutdownListener, listen_for_signals};
