// tests/dispatch_strategies.rs

use std::error::Error;
use std::sync::Arc;

use tokio::time::Duration;

use tend::exec::{dispatch, materialize, run_concurrent, run_sequential, CommandOutcome};
use tend::types::DispatchMode;
use tend_test_utils::fake_runner::{FakeRunner, RunEvent};
use tend_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn batch(cmds: &[&str]) -> Vec<tend::exec::ProcessSpec> {
    let cmds: Vec<String> = cmds.iter().map(|c| c.to_string()).collect();
    materialize(&cmds)
}

#[tokio::test]
async fn sequential_finishes_each_command_before_starting_the_next() -> TestResult {
    init_tracing();

    let runner = FakeRunner::new()
        .with_delay("A", Duration::from_millis(30))
        .with_delay("B", Duration::from_millis(10))
        .with_delay("C", Duration::from_millis(20));

    let reports = with_timeout(run_sequential(&runner, batch(&["A 1", "B 2", "C 3"]))).await;

    assert_eq!(
        runner.journal(),
        vec![
            RunEvent::Started("A 1".into()),
            RunEvent::Finished("A 1".into()),
            RunEvent::Started("B 2".into()),
            RunEvent::Finished("B 2".into()),
            RunEvent::Started("C 3".into()),
            RunEvent::Finished("C 3".into()),
        ]
    );
    let lines: Vec<_> = reports.iter().map(|r| r.command_line.as_str()).collect();
    assert_eq!(lines, vec!["A 1", "B 2", "C 3"]);

    Ok(())
}

#[tokio::test]
async fn concurrent_starts_everything_before_anything_finishes() -> TestResult {
    init_tracing();

    let runner = Arc::new(
        FakeRunner::new()
            .with_delay("A", Duration::from_millis(150))
            .with_delay("B", Duration::from_millis(100))
            .with_delay("C", Duration::from_millis(50)),
    );

    let reports = with_timeout(run_concurrent(&runner, batch(&["A", "B", "C"]))).await;

    let journal = runner.journal();
    assert_eq!(journal.len(), 6);
    assert!(
        journal[..3].iter().all(|e| matches!(e, RunEvent::Started(_))),
        "a command finished before all were started: {journal:?}"
    );

    // The phase only returns once all three are done.
    let mut finished = runner.finished();
    finished.sort();
    assert_eq!(finished, vec!["A", "B", "C"]);

    // Reports keep batch order even though C finished first.
    let lines: Vec<_> = reports.iter().map(|r| r.command_line.as_str()).collect();
    assert_eq!(lines, vec!["A", "B", "C"]);

    Ok(())
}

#[tokio::test]
async fn concurrent_batch_takes_as_long_as_the_slowest_command() -> TestResult {
    let runner = Arc::new(
        FakeRunner::new()
            .with_delay("slow", Duration::from_millis(200))
            .with_delay("fast", Duration::from_millis(200)),
    );

    let started = tokio::time::Instant::now();
    with_timeout(dispatch(
        &runner,
        DispatchMode::Concurrent,
        batch(&["slow", "fast", "slow again"]),
    ))
    .await;
    let elapsed = started.elapsed();

    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_millis(550), "took {elapsed:?}");

    Ok(())
}

#[tokio::test]
async fn failing_command_does_not_stop_siblings() -> TestResult {
    init_tracing();

    for mode in [DispatchMode::Sequential, DispatchMode::Concurrent] {
        let runner = Arc::new(FakeRunner::new().failing("broken"));

        let reports =
            with_timeout(dispatch(&runner, mode, batch(&["first", "broken arg", "last"]))).await;

        assert_eq!(reports.len(), 3, "{mode}");
        assert_eq!(reports[0].outcome, CommandOutcome::Success);
        assert_eq!(reports[1].outcome, CommandOutcome::Failed(Some(1)));
        assert_eq!(reports[2].outcome, CommandOutcome::Success);

        let mut finished = runner.finished();
        finished.sort();
        assert_eq!(finished, vec!["broken arg", "first", "last"], "{mode}");
    }

    Ok(())
}

#[tokio::test]
async fn empty_batch_completes_immediately() -> TestResult {
    let runner = Arc::new(FakeRunner::new());

    for mode in [DispatchMode::Sequential, DispatchMode::Concurrent] {
        let reports = with_timeout(dispatch(&runner, mode, Vec::new())).await;
        assert!(reports.is_empty());
    }
    assert!(runner.journal().is_empty());

    Ok(())
}
