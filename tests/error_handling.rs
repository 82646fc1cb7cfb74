// tests/error_handling.rs
mod common;
use crate::common::{init_tracing, run_captured, sh, CapturedOutput, ExecOptionsBuilder};

use stdinexec::config::ExecOptions;
use stdinexec::errors::StdinexecError;
use stdinexec::exec::{Executor, OutputSink};
use stdinexec_test_utils::capture::BrokenWriter;
use stdinexec_test_utils::readers::FailingReader;

const MISSING_BINARY: &str = "/nonexistent/stdinexec-test-binary";

#[tokio::test]
async fn spawn_failure_reports_worker_and_command() {
    crate::common::with_timeout(async {
        init_tracing();

        let options = ExecOptionsBuilder::new([MISSING_BINARY, "{}"]).build();
        let (result, _out) = run_captured(options, b"one\ntwo\nthree\n").await;

        match result {
            Err(StdinexecError::Spawn { worker, command, .. }) => {
                assert_eq!(worker, 0);
                assert!(command.contains(MISSING_BINARY), "{command}");
                assert!(command.contains("one"), "{command}");
            }
            other => panic!("expected Spawn error, got {other:?}"),
        }
    })
    .await
}

#[tokio::test]
async fn all_workers_failing_to_spawn_does_not_hang_the_producer() {
    crate::common::with_timeout(async {
        init_tracing();

        // Far more records than the channel can hold.
        let input: String = (0..1000).map(|i| format!("{i}\n")).collect();
        let options = ExecOptionsBuilder::new([MISSING_BINARY, "{}"])
            .parallel(3)
            .build();
        let (result, out) = run_captured(options, input.as_bytes()).await;

        assert!(matches!(result, Err(StdinexecError::Spawn { .. })), "{result:?}");
        assert_eq!(out.contents(), "");
    })
    .await
}

#[tokio::test]
async fn non_zero_exit_is_reported_but_remaining_records_still_run() {
    crate::common::with_timeout(async {
        init_tracing();

        let options = ExecOptionsBuilder::new(sh(
            r#"if [ "$1" = two ]; then exit 3; fi; echo "$1""#,
        ))
        .build();
        let (result, out) = run_captured(options, b"one\ntwo\nthree\n").await;

        assert_eq!(out.contents(), "one\nthree\n");
        match result {
            Err(StdinexecError::ExitStatus {
                worker,
                command,
                status,
            }) => {
                assert_eq!(worker, 0);
                assert_eq!(status.code(), Some(3));
                assert!(command.contains("\"two\""), "{command}");
            }
            other => panic!("expected ExitStatus error, got {other:?}"),
        }
    })
    .await
}

#[tokio::test]
async fn failing_worker_does_not_stop_its_siblings() {
    crate::common::with_timeout(async {
        init_tracing();

        let input: String = (0..20).map(|i| format!("{i}\n")).collect();
        let options = ExecOptionsBuilder::new(sh(
            r#"if [ "$1" = 5 ]; then exit 1; fi; echo "$1""#,
        ))
        .parallel(2)
        .build();
        let (result, out) = run_captured(options, input.as_bytes()).await;

        assert!(matches!(result, Err(StdinexecError::ExitStatus { .. })), "{result:?}");

        let mut seen: Vec<u32> = crate::common::split_tagged(&out.contents())
            .into_iter()
            .map(|(_, line)| line.parse().unwrap())
            .collect();
        seen.sort();
        let expected: Vec<u32> = (0..20).filter(|i| *i != 5).collect();
        assert_eq!(seen, expected);
    })
    .await
}

#[tokio::test]
async fn error_message_names_worker_and_rendered_command() {
    crate::common::with_timeout(async {
        init_tracing();

        let options = ExecOptionsBuilder::new(["false", "{}"]).build();
        let (result, _out) = run_captured(options, b"rec\n").await;

        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("worker 0"), "{msg}");
        assert!(msg.contains(r#"["false", "rec"]"#), "{msg}");
    })
    .await
}

#[tokio::test]
async fn read_error_still_processes_earlier_records() {
    crate::common::with_timeout(async {
        init_tracing();

        let options = ExecOptionsBuilder::new(["echo", "hello", "{}"]).build();
        let captured = CapturedOutput::new();
        let result = Executor::new(options, captured.sink())
            .run(FailingReader::new(&b"one\ntwo\n"[..]))
            .await;

        assert!(matches!(result, Err(StdinexecError::Scan(_))), "{result:?}");
        assert_eq!(captured.contents(), "hello one\nhello two\n");
    })
    .await
}

#[cfg(unix)]
#[tokio::test]
async fn non_utf8_record_reaches_the_command_unchanged() {
    crate::common::with_timeout(async {
        init_tracing();

        let options = ExecOptionsBuilder::new(["printf", "%s\\n", "{}"])
            .null(true)
            .build();
        let (result, out) = run_captured(options, b"caf\xe9\0ok\0").await;

        assert!(result.is_ok(), "{result:?}");
        assert_eq!(out.bytes(), b"caf\xe9\nok\n".to_vec());
    })
    .await
}

#[tokio::test]
async fn failed_drain_waits_for_the_sibling_pipe_before_the_next_record() {
    crate::common::with_timeout(async {
        init_tracing();

        // For record `a` the stdout line hits the failing first write, while
        // a background job keeps stderr open and writes to it later.
        let options = ExecOptionsBuilder::new(sh(
            r#"if [ "$1" = a ]; then echo first; (sleep 0.5; echo "late $1" >&2) & exit 0; fi; echo "second $1""#,
        ))
        .build();
        let captured = CapturedOutput::new();
        let result = Executor::new(options, captured.fail_first_sink())
            .run(&b"a\nb\n"[..])
            .await;

        assert!(matches!(result, Err(StdinexecError::OutputError(_))), "{result:?}");
        // Everything from `a` is written before `b` runs, and nothing
        // arrives after the run has returned.
        assert_eq!(captured.contents(), "late a\nsecond b\n");
        tokio::time::sleep(std::time::Duration::from_millis(700)).await;
        assert_eq!(captured.contents(), "late a\nsecond b\n");
    })
    .await
}

#[tokio::test]
async fn broken_output_sink_is_an_error() {
    crate::common::with_timeout(async {
        init_tracing();

        let options = ExecOptionsBuilder::new(["echo", "{}"]).build();
        let result = Executor::new(options, OutputSink::new(BrokenWriter))
            .run(&b"x\n"[..])
            .await;

        assert!(matches!(result, Err(StdinexecError::OutputError(_))), "{result:?}");
    })
    .await
}

#[test]
fn negative_parallel_is_a_config_error() {
    let raw = ExecOptionsBuilder::new(["echo", "{}"]).parallel(-1).raw();
    match ExecOptions::try_from(raw) {
        Err(StdinexecError::ConfigError(msg)) => assert!(msg.contains("at least 1"), "{msg}"),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn missing_command_is_a_config_error() {
    let raw = ExecOptionsBuilder::new(Vec::<String>::new()).raw();
    assert!(matches!(
        ExecOptions::try_from(raw),
        Err(StdinexecError::ConfigError(_))
    ));
}

#[test]
fn wait_error_names_worker_and_command() {
    let err = StdinexecError::Wait {
        worker: 4,
        command: r#"["sleep", "1"]"#.to_string(),
        source: std::io::Error::other("no child process"),
    };

    let message = err.to_string();
    assert!(message.contains("worker 4"), "{message}");
    assert!(message.contains(r#"["sleep", "1"]"#), "{message}");
    assert!(message.contains("no child process"), "{message}");
}
