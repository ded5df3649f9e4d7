// tests/binary_exit_status.rs

//! The `justrun` binary's own exit status and stderr, end to end.

use std::process::{Command, Output};

use tempfile::TempDir;

/// Run the built binary in an empty directory so no `Justrun.toml` is found.
fn justrun(args: &[&str]) -> (Output, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_justrun"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("JUSTRUN_CONFIG")
        .env_remove("JUSTRUN_LOG")
        .output()
        .unwrap();
    (output, dir)
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn success_exits_zero_and_prints_banner() {
    let (out, _dir) = justrun(&["--no-color", "--stdin-null", "echo", "hi"]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "> echo hi\nhi\n");
    assert!(out.stderr.is_empty(), "stderr: {}", stderr_of(&out));
}

#[test]
fn child_exit_code_is_passed_through_with_error_line() {
    let (out, _dir) = justrun(&["--no-color", "--stdin-null", "sh", "-c", "exit 3"]);

    assert_eq!(out.status.code(), Some(3));
    assert!(
        stderr_of(&out).contains("justrun error: Command process exited with error code 3"),
        "stderr: {}",
        stderr_of(&out)
    );
}

#[test]
fn quiet_failure_prints_nothing() {
    let (out, _dir) = justrun(&["-q", "--stdin-null", "sh", "-c", "echo x; exit 4"]);

    assert_eq!(out.status.code(), Some(4));
    assert!(out.stdout.is_empty());
    assert!(out.stderr.is_empty(), "stderr: {}", stderr_of(&out));
}

#[test]
fn missing_program_exits_127_even_when_quiet() {
    let (out, _dir) = justrun(&["-q", "--stdin-null", "no-such-binary-xyz"]);

    assert_eq!(out.status.code(), Some(127));
    assert!(stderr_of(&out).starts_with("justrun error: "));
}

#[test]
fn missing_explicit_config_exits_2() {
    let (out, _dir) = justrun(&["--config", "does-not-exist.toml", "true"]);

    assert_eq!(out.status.code(), Some(2));
    assert!(
        stderr_of(&out).starts_with("justrun error: "),
        "stderr: {}",
        stderr_of(&out)
    );
}

#[cfg(unix)]
mod signals {
    use std::os::unix::process::ExitStatusExt;

    use super::justrun;

    #[test]
    fn sigterm_is_re_raised_on_justrun() {
        let (out, _dir) = justrun(&["-q", "--stdin-null", "sh", "-c", "kill -TERM $$"]);

        assert_eq!(out.status.signal(), Some(15));
        assert_eq!(out.status.code(), None);
    }

    #[test]
    fn without_propagation_signal_maps_to_128_plus_signo() {
        let (out, _dir) = justrun(&[
            "-q",
            "--stdin-null",
            "--no-propagate-signals",
            "sh",
            "-c",
            "kill -TERM $$",
        ]);

        assert_eq!(out.status.signal(), None);
        assert_eq!(out.status.code(), Some(143));
    }

    #[test]
    fn sigkill_is_never_forwarded() {
        let (out, _dir) = justrun(&["-q", "--stdin-null", "sh", "-c", "kill -KILL $$"]);

        assert_eq!(out.status.signal(), None);
        assert_eq!(out.status.code(), Some(137));
    }
}
