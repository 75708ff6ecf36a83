// tests/end_to_end.rs
//
// Real processes, fake notifications: the watch loop runs `echo` and friends
// through `OsProcessRunner`, writing into an in-memory console.

#![cfg(unix)]

use std::error::Error;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use tend::engine::{LoopState, WatchLoop};
use tend::exec::{run_process, CommandOutcome, Console, OsProcessRunner, ProcessSpec};
use tend::watch::WatchEvent;
use tend_test_utils::builders::WatchConfigBuilder;
use tend_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn text(buf: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8_lossy(&buf.lock().unwrap()).into_owned()
}

#[tokio::test]
async fn one_write_runs_both_echoes_in_order_then_exits() -> TestResult {
    init_tracing();

    let config = WatchConfigBuilder::new()
        .path("./src")
        .commands(&["echo one", "echo two"])
        .count(1)
        .build();
    let (console, buf) = Console::buffer();
    let (tx, rx) = mpsc::unbounded_channel();

    tx.send(WatchEvent::write("./src/lib.rs"))?;
    let watch_loop = WatchLoop::new(config, rx, OsProcessRunner::new(console));
    let summary = with_timeout(watch_loop.run()).await;

    assert_eq!(text(&buf), "echo one\none\necho two\ntwo\n");
    assert_eq!(summary.final_state, LoopState::Terminating);

    Ok(())
}

#[tokio::test]
async fn count_two_waits_for_a_second_write() -> TestResult {
    init_tracing();

    let config = WatchConfigBuilder::new()
        .path("./src")
        .commands(&["echo one", "echo two"])
        .count(2)
        .build();
    let (console, buf) = Console::buffer();
    let (tx, rx) = mpsc::unbounded_channel();

    let done = WatchLoop::new(config, rx, OsProcessRunner::new(console)).spawn();
    tokio::pin!(done);

    tx.send(WatchEvent::write("./src/lib.rs"))?;
    with_timeout(async {
        while !text(&buf).ends_with("two\n") {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(timeout(Duration::from_millis(100), &mut done).await.is_err());

    tx.send(WatchEvent::write("./src/lib.rs"))?;
    let summary = with_timeout(done).await?;
    assert_eq!(summary.dispatches, 2);
    assert_eq!(text(&buf), "echo one\none\necho two\ntwo\n".repeat(2));

    Ok(())
}

#[tokio::test]
async fn missing_program_is_reported_and_siblings_still_run() -> TestResult {
    init_tracing();

    for concurrent in [false, true] {
        let mut builder = WatchConfigBuilder::new()
            .commands(&["tend-no-such-program --flag", "echo after"])
            .count(1);
        if concurrent {
            builder = builder.concurrent();
        }
        let (console, buf) = Console::buffer();
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send(WatchEvent::write("./src/lib.rs"))?;
        let summary =
            with_timeout(WatchLoop::new(builder.build(), rx, OsProcessRunner::new(console)).run())
                .await;

        let out = text(&buf);
        assert!(out.contains("tend-no-such-program --flag\n"), "{out}");
        assert!(out.contains("tend-no-such-program encountered an error:\n"), "{out}");
        assert!(out.contains("echo after\n"), "{out}");
        assert_eq!(out.lines().filter(|l| *l == "after").count(), 1, "{out}");
        assert_eq!(summary.dispatches, 1);
    }

    Ok(())
}

#[tokio::test]
async fn non_zero_exit_is_reported_with_output() -> TestResult {
    let (console, buf) = Console::buffer();
    let spec = ProcessSpec::parse("ls /tend/definitely/not/here");

    let report = with_timeout(run_process(spec, &console, None)).await;

    assert!(matches!(report.outcome, CommandOutcome::Failed(Some(code)) if code != 0));
    // ls complains on stderr; it is part of the combined output.
    assert!(!report.output.is_empty());

    let out = text(&buf);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "ls /tend/definitely/not/here");
    // The failure names the executable `ls` resolved to on PATH.
    assert!(lines[1].starts_with('/'), "{out}");
    assert!(lines[1].ends_with("/ls encountered an error:"), "{out}");
    assert!(lines[2].starts_with("exit status "), "{out}");

    Ok(())
}

#[tokio::test]
async fn empty_command_fails_to_launch_without_panicking() -> TestResult {
    let (console, buf) = Console::buffer();

    let report = with_timeout(run_process(ProcessSpec::parse(""), &console, None)).await;

    assert!(matches!(report.outcome, CommandOutcome::LaunchFailed(_)));
    assert!(text(&buf).contains(" encountered an error:\n"));

    Ok(())
}

#[tokio::test]
async fn stdout_and_stderr_are_combined() -> TestResult {
    let (console, _buf) = Console::buffer();
    // Whitespace splitting rules out inline scripts, so put one in a file.
    let dir = tempfile::tempdir()?;
    let script = dir.path().join("both.sh");
    std::fs::write(&script, "echo to-stdout\necho to-stderr 1>&2\n")?;
    let spec = ProcessSpec {
        program: "sh".into(),
        args: vec![script.display().to_string()],
    };

    let report = with_timeout(run_process(spec, &console, None)).await;

    assert_eq!(report.outcome, CommandOutcome::Success);
    let output = String::from_utf8_lossy(&report.output);
    assert!(output.contains("to-stdout\n"), "{output}");
    assert!(output.contains("to-stderr\n"), "{output}");

    Ok(())
}

#[tokio::test]
async fn combined_output_keeps_the_order_the_process_wrote_it() -> TestResult {
    let (console, buf) = Console::buffer();
    let dir = tempfile::tempdir()?;
    let script = dir.path().join("alternate.sh");
    std::fs::write(
        &script,
        "i=0\nwhile [ $i -lt 200 ]; do\n  echo out$i\n  echo err$i 1>&2\n  i=$((i + 1))\ndone\n",
    )?;
    let spec = ProcessSpec {
        program: "sh".into(),
        args: vec![script.display().to_string()],
    };

    let report = with_timeout(run_process(spec, &console, None)).await;

    assert_eq!(report.outcome, CommandOutcome::Success);
    let expected: String = (0..200).map(|i| format!("out{i}\nerr{i}\n")).collect();
    assert_eq!(String::from_utf8_lossy(&report.output), expected);
    assert!(text(&buf).ends_with(&expected));

    Ok(())
}

#[tokio::test]
async fn timeout_kills_a_hung_command() -> TestResult {
    let (console, buf) = Console::buffer();
    let runner = OsProcessRunner::new(console).with_timeout(Some(Duration::from_millis(100)));

    let started = tokio::time::Instant::now();
    let spec = ProcessSpec::parse("sleep 10");
    let report = with_timeout(tend::exec::ProcessRunner::run(&runner, spec)).await;

    assert_eq!(report.outcome, CommandOutcome::TimedOut(Duration::from_millis(100)));
    assert!(started.elapsed() < Duration::from_secs(5));
    let out = text(&buf);
    assert!(out.contains("sleep encountered an error:\ntimed out after 100ms\n"), "{out}");

    Ok(())
}
