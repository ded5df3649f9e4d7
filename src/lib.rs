// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;

use std::fs::File;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::locate;

pub use crate::exec::{
    execute, ColorChoice, Encoding, Executor, FailureKind, Palette, RunError, RunOptions,
    RunOutput, StdinSource,
};

/// High-level entry point used by `main.rs`.
///
/// Resolves options (config file, then CLI flags), runs the command and
/// returns the exit status `justrun` itself should use. Failures of the
/// child are reported on stderr and mapped to a status; only problems
/// before the child could even be considered (bad config, bad flags) come
/// back as `Err`.
pub async fn run(args: CliArgs) -> Result<i32> {
    let options = resolve_options(&args)?;

    if args.dry_run {
        print_dry_run(&args.command, &options);
        return Ok(0);
    }

    let quiet = options.quiet;
    match execute(args.command, options).await {
        Ok(out) => Ok(out.code),
        Err(err) => {
            if !quiet || err.is_launch_failure() {
                eprintln!("justrun error: {err}");
            }
            Ok(err.exit_status())
        }
    }
}

/// Merge config-file defaults with command-line flags (flags win).
pub fn resolve_options(args: &CliArgs) -> Result<RunOptions> {
    let mut options = match locate(args.config.as_deref())? {
        Some(cfg) => {
            debug!(?cfg, "using config file");
            cfg.into_run_options()
        }
        None => RunOptions::default(),
    };

    for (key, value) in args.env.iter() {
        options.env.insert(key.clone(), value.clone());
    }
    if args.no_capture {
        options.capture = false;
    }
    if args.quiet {
        options.quiet = true;
    }
    if let Some(ref name) = args.encoding {
        options.encoding = name
            .parse()
            .map_err(|e: String| errors::JustrunError::InvalidOption(format!("--encoding: {e}")))?;
    }
    if args.no_propagate_signals {
        options.propagate_signals = false;
    }
    if args.no_color {
        options.color = ColorChoice::Off;
    }
    if let Some(ref path) = args.stdin_file {
        let file = File::open(path)
            .with_context(|| format!("opening stdin file {}", path.display()))?;
        options.stdin = StdinSource::file(file);
    } else if args.stdin_null {
        options.stdin = StdinSource::Null;
    }

    Ok(options)
}

/// Dry-run output: the banner line plus the effective options.
fn print_dry_run(command: &[String], options: &RunOptions) {
    println!("> {}", exec::render::shell_command(command));
    println!("  capture = {}", options.capture);
    println!("  quiet = {}", options.quiet);
    println!("  encoding = {}", options.encoding);
    println!("  propagate_signals = {}", options.propagate_signals);
    println!(
        "  color = {}",
        match &options.color {
            ColorChoice::Off => "off".to_string(),
            ColorChoice::Auto => "auto".to_string(),
            ColorChoice::Custom(palette) => format!("custom {palette:?}"),
        }
    );
    println!("  stdin = {:?}", options.stdin);
    if !options.env.is_empty() {
        println!("  env:");
        for (key, value) in options.env.iter() {
            println!("    {key}={value}");
        }
    }

    debug!("dry-run complete (no execution)");
}
