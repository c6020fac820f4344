// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod report;
pub mod suite;
pub mod types;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::engine::Orchestrator;
use crate::exec::shutdown;
use crate::exec::{ProcessLauncher, listen_for_signals};
use crate::report::{Outcome, RunReport};
use crate::suite::SuiteList;

/// High-level entry point used by `main.rs`. Returns the process exit code.
///
/// This wires together:
/// - config loading and suite list construction
/// - SIGINT/SIGTERM handling
/// - the orchestrator with the real process launcher
/// - the optional JSON report
pub async fn run(args: CliArgs) -> Result<i32> {
    let config_path = args.config.clone();
    let cfg = load_and_validate(&config_path)
        .with_context(|| format!("loading suite config from {}", config_path.display()))?;
    let suites = cfg.suite_list(&config_root_dir(&config_path))?;

    if args.dry_run {
        print_dry_run(&cfg, &suites);
        return Ok(0);
    }

    let grace = cfg.shutdown_grace()?;
    let (handle, listener) = shutdown::channel();
    let signals =
        listen_for_signals(handle).context("installing SIGINT/SIGTERM handlers")?;

    let launcher = ProcessLauncher::new(listener.clone(), grace);
    let mut orchestrator = Orchestrator::new(launcher, listener);
    let report = orchestrator.run(&suites).await;

    signals.abort();
    log_summary(&report);

    if let Some(path) = &args.report {
        report
            .write_json(path)
            .with_context(|| format!("writing run report to {path}"))?;
        info!(path = %path, "run report written");
    }

    Ok(report.exit_code())
}

/// Directory that relative suite `cwd` values are resolved against.
///
/// - If the config path has a non-empty parent (e.g. "ci/Suites.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Suites.toml" (parent = ""),
///   we fall back to the current working directory "."
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

fn log_summary(report: &RunReport) {
    for result in &report.results {
        info!(
            suite = %result.suite_id,
            elapsed_ms = result.duration.as_millis() as u64,
            "{}",
            result.termination
        );
    }

    match &report.outcome {
        Outcome::AllPassed => info!(
            passed = report.passed(),
            elapsed_ms = report.total_duration().as_millis() as u64,
            "all suites passed"
        ),
        Outcome::FailedAt {
            suite_id,
            code,
            kind,
        } => error!(suite = %suite_id, code, ?kind, "suite failed; run halted"),
        Outcome::Interrupted { suite_id } => {
            error!(suite = ?suite_id, "run interrupted by termination request")
        }
    }
}

/// Simple dry-run output: print the resolved suite plan.
fn print_dry_run(cfg: &ConfigFile, suites: &SuiteList) {
    println!("suiterun dry-run");
    println!(
        "  config.interpreter = {}",
        cfg.config.interpreter.as_deref().unwrap_or("<none>")
    );
    println!("  config.shutdown_grace = {}", cfg.config.shutdown_grace);
    println!();

    println!("suites ({}):", suites.len());
    for (idx, suite) in suites.iter().enumerate() {
        let inv = suite.invocation();
        println!("  {}. {}", idx + 1, suite.id());
        println!("      cmd: {inv}");
        if let Some(cwd) = &inv.cwd {
            println!("      cwd: {}", cwd.display());
        }
        if !inv.env.is_empty() {
            let keys: Vec<_> = inv.env.keys().collect();
            println!("      env: {keys:?}");
        }
    }

    debug!("dry-run complete (no execution)");
}
