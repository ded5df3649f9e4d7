// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs a single command with `tokio::process::Command` and
//! reports how it ended.
//!
//! - [`runner`] owns the lifecycle: environment, banner, spawn, wait and
//!   settlement ([`execute`], [`Executor`]).
//! - [`tee`] routes each output chunk to the capture buffer and/or the
//!   terminal, depending on `capture` and `quiet`.
//! - [`decode`] turns raw chunks into text without splitting characters.
//! - [`color`] resolves the colorizer used for the banner and echoed output.
//! - [`render`] builds the shell-like display string of an argument vector.
//! - [`signal`] tells exit codes from signals and re-raises SIGINT/SIGTERM.
//! - [`terminal`] is the display sink abstraction tests can replace.
//! - [`outcome`] holds the success value and the structured failure record.

pub mod color;
pub mod decode;
pub mod options;
pub mod outcome;
pub mod render;
pub mod runner;
pub mod signal;
pub mod tee;
pub mod terminal;

pub use color::{ColorChoice, Colorizer, Palette, Slot};
pub use options::{Encoding, RunOptions, StdinSource};
pub use outcome::{FailureKind, Invocation, RunError, RunOutput};
pub use runner::{execute, Executor};
pub use terminal::{Channel, StdTerminal, Terminal};
