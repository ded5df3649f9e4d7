// tests/scenarios.rs

mod common;
use crate::common::{init_tracing, plain_options, recording_executor, sh, with_timeout};

use justrun::exec::Channel;
use justrun::{execute, Executor, RunOptions};

#[tokio::test]
async fn echo_hello_resolves_with_captured_output() {
    init_tracing();

    let (exec, term) = recording_executor(RunOptions::default());
    let out = with_timeout(exec.run(["echo", "hello"])).await.unwrap();

    assert_eq!(out.code, 0);
    assert_eq!(out.stdout.as_deref(), Some("hello\n"));
    assert_eq!(out.stderr.as_deref(), Some(""));

    // Banner followed by the echoed line.
    let shown = term.text(Channel::Stdout);
    assert!(shown.contains("> "), "banner missing: {shown:?}");
    assert!(shown.contains("echo hello"), "banner missing: {shown:?}");
    assert!(shown.contains("hello\n"));
}

#[tokio::test]
async fn false_rejects_with_exit_code_one() {
    init_tracing();

    let err = with_timeout(execute(["false"], plain_options().with_quiet(true)))
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(1));
    assert_eq!(err.signal_name(), None);
    assert!(!err.is_launch_failure());
    assert_eq!(err.command(), "false");
    assert!(err.args().is_empty());
    assert_eq!(err.shell_command(), "false");
    assert_eq!(err.to_string(), "Command process exited with error code 1");
}

#[tokio::test]
async fn missing_binary_is_a_launch_failure() {
    init_tracing();

    let err = with_timeout(execute(
        ["no-such-binary-xyz", "--flag"],
        plain_options().with_quiet(true),
    ))
    .await
    .unwrap_err();

    assert!(err.is_launch_failure());
    assert!(err.cause().is_some());
    assert_eq!(
        err.cause().map(std::io::Error::kind),
        Some(std::io::ErrorKind::NotFound)
    );
    assert_eq!(err.code(), None);
    assert_eq!(err.signal_name(), None);
    assert_eq!(err.command(), "no-such-binary-xyz");
    assert_eq!(err.args(), ["--flag"]);
    assert_eq!(err.shell_command(), "no-such-binary-xyz --flag");
    // Capture was on, so the (empty) accumulators are still reported.
    assert_eq!(err.stdout(), Some(""));
    assert_eq!(err.stderr(), Some(""));
    assert!(err.to_string().starts_with("failed to launch 'no-such-binary-xyz': "));
    assert_eq!(err.exit_status(), 127);
}

#[tokio::test]
async fn whitespace_argument_is_double_quoted_in_banner() {
    init_tracing();

    let (exec, term) = recording_executor(plain_options());
    let out = with_timeout(exec.run(["printf", "a b"])).await.unwrap();

    assert_eq!(out.stdout.as_deref(), Some("a b"));
    let banner = term.writes()[0].1.clone();
    assert_eq!(banner, "> printf \"a b\"\n");
}

#[tokio::test]
async fn extra_env_is_merged_over_inherited_env() {
    init_tracing();

    let opts = plain_options().with_quiet(true).with_env("FOO", "bar");
    let out = with_timeout(execute(
        sh(r#"printf '%s|%s' "$FOO" "${PATH:+has-path}""#),
        opts,
    ))
    .await
    .unwrap();

    assert_eq!(out.stdout.as_deref(), Some("bar|has-path"));
}

#[tokio::test]
async fn extra_env_overrides_inherited_value() {
    init_tracing();

    let opts = plain_options().with_quiet(true).with_env("PATH", "/usr/bin:/bin");
    let out = with_timeout(execute(sh(r#"printf '%s' "$PATH""#), opts))
        .await
        .unwrap();

    assert_eq!(out.stdout.as_deref(), Some("/usr/bin:/bin"));
}

#[tokio::test]
async fn same_deterministic_command_settles_identically() {
    init_tracing();

    let exec = Executor::new(plain_options().with_quiet(true));
    let script = sh("echo out; echo err >&2");

    let first = with_timeout(exec.run(script.clone())).await.unwrap();
    let second = with_timeout(exec.run(script)).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.stdout.as_deref(), Some("out\n"));
    assert_eq!(first.stderr.as_deref(), Some("err\n"));
}

#[tokio::test]
async fn background_grandchild_does_not_hold_back_the_result() {
    init_tracing();

    // `sleep` inherits the pipes and outlives `sh` by seconds.
    let started = std::time::Instant::now();
    let out = with_timeout(execute(
        sh("sleep 5 & echo started"),
        plain_options().with_quiet(true),
    ))
    .await
    .unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed < std::time::Duration::from_secs(1), "took {elapsed:?}");
    assert_eq!(out.code, 0);
    assert_eq!(out.stdout.as_deref(), Some("started\n"));
    assert_eq!(out.stderr.as_deref(), Some(""));
}
