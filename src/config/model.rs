// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::exec::{ColorChoice, Encoding, Palette, RunOptions};

/// Configuration file as read from TOML, before validation.
///
/// ```toml
/// [run]
/// capture = true
/// quiet = false
/// encoding = "utf8"
/// propagate_signals = true
/// color = true
///
/// [env]
/// RUST_BACKTRACE = "1"
///
/// [color]
/// prompt = "gray"
/// stdout = "green"
/// ```
///
/// All sections are optional and have the same defaults as
/// [`RunOptions::default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub run: RunSection,

    /// Extra environment for the child, laid over the inherited one.
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Custom palette: slot name → style name.
    ///
    /// Keys: `prompt`, `command`, `stdout`, `stderr`, `gray`, `grey`,
    /// `green`, `red`. Values: ANSI style names such as `"cyan"`.
    #[serde(default)]
    pub color: BTreeMap<String, String>,
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunSection {
    #[serde(default = "default_true")]
    pub capture: bool,

    #[serde(default)]
    pub quiet: bool,

    #[serde(default = "default_encoding")]
    pub encoding: String,

    #[serde(default = "default_true")]
    pub propagate_signals: bool,

    /// `false` turns decoration off even when a `[color]` table is present.
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}

fn default_encoding() -> String {
    "utf8".to_string()
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            capture: true,
            quiet: false,
            encoding: default_encoding(),
            propagate_signals: true,
            color: true,
        }
    }
}

/// A validated configuration file.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see
/// [`validate`](crate::config::validate)), so the encoding and palette are
/// already resolved.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    run: RunSection,
    env: BTreeMap<String, String>,
    encoding: Encoding,
    palette: Option<Palette>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        run: RunSection,
        env: BTreeMap<String, String>,
        encoding: Encoding,
        palette: Option<Palette>,
    ) -> Self {
        Self {
            run,
            env,
            encoding,
            palette,
        }
    }

    pub fn run(&self) -> &RunSection {
        &self.run
    }

    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Executor options described by this file.
    pub fn into_run_options(self) -> RunOptions {
        let color = match (self.palette, self.run.color) {
            (_, false) => ColorChoice::Off,
            (Some(palette), true) => ColorChoice::Custom(palette),
            (None, true) => ColorChoice::Auto,
        };

        RunOptions {
            env: self.env,
            capture: self.run.capture,
            quiet: self.run.quiet,
            encoding: self.encoding,
            propagate_signals: self.run.propagate_signals,
            color,
            ..RunOptions::default()
        }
    }
}
