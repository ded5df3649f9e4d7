#![allow(dead_code)]

use std::sync::Arc;

use justrun::{ColorChoice, Executor, RunOptions, StdinSource};
pub use justrun_test_utils::builders;
pub use justrun_test_utils::{init_tracing, with_timeout, MemoryTerminal};

/// Options for deterministic tests: no colors, empty stdin.
pub fn plain_options() -> RunOptions {
    RunOptions::default()
        .with_color(ColorChoice::Off)
        .with_stdin(StdinSource::Null)
}

/// An executor whose display output lands in the returned terminal.
pub fn recording_executor(options: RunOptions) -> (Executor, MemoryTerminal) {
    let term = MemoryTerminal::new();
    let exec = Executor::new(options).with_terminal(Arc::new(term.clone()));
    (exec, term)
}

/// `sh -c <script>` as an argument vector.
pub fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}
