// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `justrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "justrun",
    version,
    about = "Run a command, echo its output with colors, and exit the way it exited.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a TOML file with default options.
    ///
    /// Default: `$JUSTRUN_CONFIG`, else `Justrun.toml` in the current
    /// working directory if it exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extra environment variable for the child (repeatable).
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Do not keep the child's output in memory.
    #[arg(long)]
    pub no_capture: bool,

    /// Do not print the command banner or echo the child's output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Decoding for the child's output (utf8, latin1, ascii, hex).
    #[arg(long, value_name = "NAME")]
    pub encoding: Option<String>,

    /// Do not re-raise SIGINT/SIGTERM when the child dies from one.
    #[arg(long)]
    pub no_propagate_signals: bool,

    /// Disable colors.
    #[arg(long)]
    pub no_color: bool,

    /// Feed this file to the child's stdin.
    #[arg(long, value_name = "PATH", conflicts_with = "stdin_null")]
    pub stdin_file: Option<PathBuf>,

    /// Give the child an empty stdin.
    #[arg(long)]
    pub stdin_null: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `JUSTRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the rendered command and effective options; run nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// The program to run followed by its arguments.
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
