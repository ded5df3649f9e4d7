// src/exec/outcome.rs

//! What an invocation is, and how it can end.

use std::io;

use thiserror::Error;

use crate::exec::render::shell_command;

/// The command being run, split the way the executor needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    command: String,
    args: Vec<String>,
    shell_command: String,
}

impl Invocation {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        let shell_command = shell_command(&argv);
        let mut parts = argv.into_iter();
        let command = parts.next().unwrap_or_default();
        Self {
            command,
            args: parts.collect(),
            shell_command,
        }
    }

    /// First token: the program to run.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Everything after the program name.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Display rendering of the whole command line.
    pub fn shell_command(&self) -> &str {
        &self.shell_command
    }

    pub fn is_empty(&self) -> bool {
        self.command.is_empty() && self.args.is_empty()
    }
}

/// Settlement of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Always 0.
    pub code: i32,
    /// Captured stdout; `None` when capture was disabled.
    pub stdout: Option<String>,
    /// Captured stderr; `None` when capture was disabled.
    pub stderr: Option<String>,
}

/// Why a run failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The program could not be started (or waited on).
    Launch,
    /// The program exited with a non-zero status.
    ExitCode(i32),
    /// The program was terminated by the named signal.
    Signal(String),
}

/// Failure record returned for every unsuccessful invocation.
///
/// Always carries the invocation and whatever output was captured up to the
/// failure (`None` when capture was disabled).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RunError {
    message: String,
    kind: FailureKind,
    invocation: Invocation,
    stdout: Option<String>,
    stderr: Option<String>,
    #[source]
    cause: Option<io::Error>,
}

impl RunError {
    pub(crate) fn launch(
        invocation: Invocation,
        stdout: Option<String>,
        stderr: Option<String>,
        context: &str,
        cause: io::Error,
    ) -> Self {
        Self {
            message: format!("{context}: {cause}"),
            kind: FailureKind::Launch,
            invocation,
            stdout,
            stderr,
            cause: Some(cause),
        }
    }

    pub(crate) fn exit_code(
        invocation: Invocation,
        stdout: Option<String>,
        stderr: Option<String>,
        code: i32,
    ) -> Self {
        Self {
            message: format!("Command process exited with error code {code}"),
            kind: FailureKind::ExitCode(code),
            invocation,
            stdout,
            stderr,
            cause: None,
        }
    }

    pub(crate) fn signal(
        invocation: Invocation,
        stdout: Option<String>,
        stderr: Option<String>,
        signal: String,
    ) -> Self {
        Self {
            message: format!("Command process exited due to signal {signal}"),
            kind: FailureKind::Signal(signal),
            invocation,
            stdout,
            stderr,
            cause: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }

    /// Non-zero exit status, if that is how the process ended.
    pub fn code(&self) -> Option<i32> {
        match self.kind {
            FailureKind::ExitCode(code) => Some(code),
            _ => None,
        }
    }

    /// Terminating signal name (e.g. `SIGTERM`), if that is how it ended.
    pub fn signal_name(&self) -> Option<&str> {
        match &self.kind {
            FailureKind::Signal(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_launch_failure(&self) -> bool {
        self.kind == FailureKind::Launch
    }

    /// Underlying OS error for launch failures.
    pub fn cause(&self) -> Option<&io::Error> {
        self.cause.as_ref()
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    pub fn command(&self) -> &str {
        self.invocation.command()
    }

    pub fn args(&self) -> &[String] {
        self.invocation.args()
    }

    pub fn shell_command(&self) -> &str {
        self.invocation.shell_command()
    }

    pub fn stdout(&self) -> Option<&str> {
        self.stdout.as_deref()
    }

    pub fn stderr(&self) -> Option<&str> {
        self.stderr.as_deref()
    }

    /// Exit status a wrapping CLI should use for this failure.
    ///
    /// Mirrors shell conventions: the child's own code, `128 + signo` for
    /// signals, 127 for "not found" and 126 for other launch failures.
    pub fn exit_status(&self) -> i32 {
        match &self.kind {
            FailureKind::ExitCode(code) => *code,
            FailureKind::Signal(name) => 128 + crate::exec::signal::signal_number(name).unwrap_or(0),
            FailureKind::Launch => match self.cause.as_ref().map(io::Error::kind) {
                Some(io::ErrorKind::NotFound) => 127,
                _ => 126,
            },
        }
    }
}
