// src/exec/runner.rs

//! The executor: spawn one child, tee its output, settle on its exit.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::{ChildStdin, Command};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::exec::color::Colorizer;
use crate::exec::options::{RunOptions, StdinSource};
use crate::exec::outcome::{Invocation, RunError, RunOutput};
use crate::exec::signal::{self, Termination};
use crate::exec::tee::{pump, StreamTee, TeeMode};
use crate::exec::terminal::{Channel, StdTerminal, Terminal};

/// How long the pumps keep reading after the child has exited.
pub const DRAIN_GRACE: Duration = Duration::from_millis(100);

/// Run `argv` with `options`, echoing to this process's stdout/stderr.
///
/// ```no_run
/// # async fn demo() -> Result<(), justrun::RunError> {
/// use justrun::{execute, RunOptions};
///
/// let out = execute(["echo", "hello"], RunOptions::default()).await?;
/// assert_eq!(out.stdout.as_deref(), Some("hello\n"));
/// # Ok(())
/// # }
/// ```
pub async fn execute<I, S>(argv: I, options: RunOptions) -> Result<RunOutput, RunError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Executor::new(options).run(argv).await
}

/// Executor bound to a set of options and a display sink.
#[derive(Debug, Clone)]
pub struct Executor {
    options: RunOptions,
    terminal: Arc<dyn Terminal>,
}

impl Executor {
    pub fn new(options: RunOptions) -> Self {
        Self {
            options,
            terminal: Arc::new(StdTerminal),
        }
    }

    /// Send banner and echoed output somewhere other than stdout/stderr.
    pub fn with_terminal(mut self, terminal: Arc<dyn Terminal>) -> Self {
        self.terminal = terminal;
        self
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Run one invocation to completion.
    ///
    /// Resolves once the child has exited. After the exit each pipe is read
    /// for [`DRAIN_GRACE`] and then until it has nothing readable; pipes kept
    /// open past that by a background grandchild are abandoned. Exactly one of `Ok` / `Err`
    /// comes back for every call.
    pub async fn run<I, S>(&self, argv: I) -> Result<RunOutput, RunError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let opts = &self.options;
        let invocation = Invocation::new(argv);
        let mode = TeeMode::from_flags(opts.capture, opts.quiet);

        if invocation.is_empty() {
            return Err(RunError::launch(
                invocation,
                mode.empty_capture(),
                mode.empty_capture(),
                "failed to launch command",
                io::Error::new(io::ErrorKind::InvalidInput, "empty argument vector"),
            ));
        }

        let env = merge_env(&opts.env);
        let colorizer = Colorizer::resolve(&opts.color);

        if !opts.quiet {
            let banner = format!(
                "{}{}\n",
                colorizer.prompt("> "),
                colorizer.command(invocation.shell_command())
            );
            if let Err(e) = self.terminal.write(Channel::Stdout, &banner) {
                warn!(error = %e, "failed to write invocation banner");
            }
        }

        let (stdin, stdin_data) = match prepare_stdin(&opts.stdin) {
            Ok(prepared) => prepared,
            Err(e) => {
                let context = format!("failed to open stdin for '{}'", invocation.command());
                return Err(RunError::launch(
                    invocation,
                    mode.empty_capture(),
                    mode.empty_capture(),
                    &context,
                    e,
                ));
            }
        };

        let mut cmd = Command::new(invocation.command());
        cmd.args(invocation.args())
            .env_clear()
            .envs(env)
            .stdin(stdin)
            .stdout(output_stdio(mode))
            .stderr(output_stdio(mode))
            .kill_on_drop(true);

        info!(cmd = %invocation.shell_command(), ?mode, "spawning child process");

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(cmd = %invocation.shell_command(), error = %e, "failed to spawn child process");
                let context = format!("failed to launch '{}'", invocation.command());
                return Err(RunError::launch(
                    invocation,
                    mode.empty_capture(),
                    mode.empty_capture(),
                    &context,
                    e,
                ));
            }
        };

        if let Some(data) = stdin_data {
            match child.stdin.take() {
                Some(pipe) => {
                    tokio::spawn(feed_stdin(pipe, data));
                }
                None => debug!("stdin data given but child has no stdin pipe"),
            }
        }

        let out_tee = StreamTee::new(
            Channel::Stdout,
            mode,
            opts.encoding,
            colorizer.for_channel(Channel::Stdout),
            Arc::clone(&self.terminal),
        );
        let err_tee = StreamTee::new(
            Channel::Stderr,
            mode,
            opts.encoding,
            colorizer.for_channel(Channel::Stderr),
            Arc::clone(&self.terminal),
        );

        let (exited_tx, exited_rx) = watch::channel(false);
        let out_pump = pump(child.stdout.take(), out_tee, drain_deadline(exited_rx.clone()));
        let err_pump = pump(child.stderr.take(), err_tee, drain_deadline(exited_rx));
        let wait = async {
            let status = child.wait().await;
            let _ = exited_tx.send(true);
            status
        };

        let (stdout, stderr, status) = tokio::join!(out_pump, err_pump, wait);

        let status = match status {
            Ok(status) => status,
            Err(e) => {
                let context = format!("failed to wait for '{}'", invocation.command());
                return Err(RunError::launch(invocation, stdout, stderr, &context, e));
            }
        };

        match Termination::from(status) {
            Termination::Exited(0) => {
                info!(cmd = %invocation.shell_command(), exit_code = 0, "child process exited");
                Ok(RunOutput {
                    code: 0,
                    stdout,
                    stderr,
                })
            }
            Termination::Exited(code) => {
                info!(cmd = %invocation.shell_command(), exit_code = code, "child process failed");
                Err(RunError::exit_code(invocation, stdout, stderr, code))
            }
            Termination::Signaled(name) => {
                info!(cmd = %invocation.shell_command(), signal = %name, "child process killed by signal");
                if opts.propagate_signals && signal::is_forwardable(&name) {
                    warn!(signal = %name, "re-raising child's terminating signal on this process");
                    if let Err(e) = signal::reraise(&name) {
                        warn!(signal = %name, error = %e, "failed to re-raise signal");
                    }
                }
                Err(RunError::signal(invocation, stdout, stderr, name))
            }
        }
    }
}

/// This process's environment with `extra` laid over it.
pub fn merge_env(extra: &BTreeMap<String, String>) -> BTreeMap<OsString, OsString> {
    let mut env: BTreeMap<OsString, OsString> = std::env::vars_os().collect();
    for (key, value) in extra {
        env.insert(OsString::from(key), OsString::from(value));
    }
    env
}

/// Resolves [`DRAIN_GRACE`] after the child's exit has been published.
async fn drain_deadline(mut exited: watch::Receiver<bool>) {
    if exited.wait_for(|done| *done).await.is_ok() {
        tokio::time::sleep(DRAIN_GRACE).await;
    }
}

fn output_stdio(mode: TeeMode) -> Stdio {
    if mode.needs_pipe() {
        Stdio::piped()
    } else {
        Stdio::null()
    }
}

/// Stdio for the child plus any bytes the executor must write itself.
fn prepare_stdin(source: &StdinSource) -> io::Result<(Stdio, Option<Vec<u8>>)> {
    match source {
        StdinSource::Inherit => Ok((Stdio::inherit(), None)),
        StdinSource::Null => Ok((Stdio::null(), None)),
        StdinSource::Data(bytes) => Ok((Stdio::piped(), Some(bytes.clone()))),
        StdinSource::File(file) => Ok((Stdio::from(file.try_clone()?), None)),
    }
}

async fn feed_stdin(mut pipe: ChildStdin, data: Vec<u8>) {
    if let Err(e) = pipe.write_all(&data).await {
        debug!(error = %e, "child closed stdin before all input was written");
        return;
    }
    if let Err(e) = pipe.shutdown().await {
        debug!(error = %e, "failed to close child stdin");
    }
    debug!(bytes = data.len(), "wrote stdin data to child");
}
