// tests/orchestrator_fake_launcher.rs

mod common;
use crate::common::{init_tracing, with_timeout};

use suiterun::engine::Orchestrator;
use suiterun::exec::ShutdownListener;
use suiterun::exec::shutdown;
use suiterun::report::{Outcome, RunReport};
use suiterun::suite::SuiteList;
use suiterun::types::{FailureKind, Termination};
use suiterun_test_utils::builders::suite_list;
use suiterun_test_utils::fake_launcher::FakeLauncher;

async fn run_with(launcher: FakeLauncher, suites: &SuiteList) -> RunReport {
    let mut orchestrator = Orchestrator::new(launcher, ShutdownListener::never());
    with_timeout(orchestrator.run(suites)).await
}

#[tokio::test]
async fn all_passing_suites_run_once_in_order() {
    init_tracing();
    let launcher = FakeLauncher::new();
    let suites = suite_list(&["lint", "unit", "e2e"]);

    let report = run_with(launcher.clone(), &suites).await;

    assert_eq!(report.outcome, Outcome::AllPassed);
    assert_eq!(report.exit_code(), 0);
    assert_eq!(launcher.launched(), vec!["lint", "unit", "e2e"]);
    assert_eq!(report.attempted_ids(), vec!["lint", "unit", "e2e"]);
    assert_eq!(launcher.max_active(), 1);
}

#[tokio::test]
async fn failure_in_the_middle_stops_the_run() {
    init_tracing();
    let launcher = FakeLauncher::new().failing("B", 7);
    let suites = suite_list(&["A", "B", "C"]);

    let report = run_with(launcher.clone(), &suites).await;

    assert_eq!(launcher.launched(), vec!["A", "B"]);
    assert_eq!(
        report.outcome,
        Outcome::FailedAt {
            suite_id: "B".to_string(),
            code: 7,
            kind: FailureKind::RuntimeFailure,
        }
    );
    assert_eq!(report.exit_code(), 7);
    assert_eq!(report.attempted(), 2);
    assert_eq!(report.passed(), 1);
}

#[tokio::test]
async fn empty_list_passes_without_launching() {
    init_tracing();
    let launcher = FakeLauncher::new();

    let report = run_with(launcher.clone(), &SuiteList::empty()).await;

    assert_eq!(report.outcome, Outcome::AllPassed);
    assert!(report.results.is_empty());
    assert!(launcher.launched().is_empty());
    assert_eq!(report.exit_code(), 0);
}

#[tokio::test]
async fn signal_termination_forwards_code_one() {
    init_tracing();
    for signal in [2, 9, 11, 15] {
        let launcher = FakeLauncher::new().with_outcome("A", Termination::signaled(signal));
        let report = run_with(launcher.clone(), &suite_list(&["A", "B"])).await;

        assert_eq!(launcher.launched(), vec!["A"]);
        assert_eq!(report.exit_code(), 1, "signal {signal}");
        assert!(matches!(
            report.outcome,
            Outcome::FailedAt {
                kind: FailureKind::SignalTermination,
                code: 1,
                ..
            }
        ));
    }
}

#[tokio::test]
async fn spawn_error_halts_and_is_distinguishable() {
    init_tracing();
    let launcher = FakeLauncher::new()
        .with_outcome("B", Termination::spawn_failed("No such file or directory (os error 2)"));
    let report = run_with(launcher.clone(), &suite_list(&["A", "B", "C"])).await;

    assert_eq!(launcher.launched(), vec!["A", "B"]);
    assert_eq!(report.exit_code(), 1);
    match &report.outcome {
        Outcome::FailedAt { suite_id, kind, .. } => {
            assert_eq!(suite_id, "B");
            assert_eq!(*kind, FailureKind::SpawnError);
        }
        other => panic!("expected FailedAt, got {other:?}"),
    }
    assert!(matches!(
        report.results[1].termination,
        Termination::SpawnFailed { .. }
    ));
}

#[tokio::test]
async fn repeated_runs_give_the_same_outcome() {
    init_tracing();
    let suites = suite_list(&["A", "B", "C"]);

    let first = run_with(FakeLauncher::new().failing("C", 3), &suites).await;
    let second = run_with(FakeLauncher::new().failing("C", 3), &suites).await;

    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.attempted_ids(), second.attempted_ids());
}

#[tokio::test]
async fn moving_the_failing_suite_earlier_truncates_sooner() {
    init_tracing();
    let late = run_with(FakeLauncher::new().failing("C", 2), &suite_list(&["A", "B", "C"])).await;
    let early = run_with(FakeLauncher::new().failing("C", 2), &suite_list(&["C", "A", "B"])).await;

    assert_eq!(late.attempted(), 3);
    assert_eq!(early.attempted(), 1);
    assert_eq!(late.outcome, early.outcome);
}

#[tokio::test]
async fn termination_request_during_a_suite_stops_the_run() {
    init_tracing();
    let (handle, listener) = shutdown::channel();
    let launcher = FakeLauncher::new().interrupt_on("B", handle);
    let launched = launcher.launched_handle();
    let mut orchestrator = Orchestrator::new(launcher, listener);

    let report = with_timeout(orchestrator.run(&suite_list(&["A", "B", "C"]))).await;

    assert_eq!(*launched.lock().unwrap(), vec!["A", "B"]);
    assert_eq!(
        report.outcome,
        Outcome::Interrupted {
            suite_id: Some("B".to_string())
        }
    );
    assert_eq!(report.exit_code(), 130);
}

#[tokio::test]
async fn termination_requested_before_start_launches_nothing() {
    init_tracing();
    let (handle, listener) = shutdown::channel();
    handle.request();
    let launcher = FakeLauncher::new();
    let mut orchestrator = Orchestrator::new(launcher.clone(), listener);

    let report = with_timeout(orchestrator.run(&suite_list(&["A"]))).await;

    assert!(launcher.launched().is_empty());
    assert_eq!(report.outcome, Outcome::Interrupted { suite_id: None });
}
