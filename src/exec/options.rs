// src/exec/options.rs

//! Options accepted by the executor.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::str::FromStr;
use std::sync::Arc;

use crate::exec::color::ColorChoice;

/// Where the child's stdin comes from.
#[derive(Debug, Clone, Default)]
pub enum StdinSource {
    /// Share this process's own stdin with the child.
    #[default]
    Inherit,
    /// Give the child an empty, already-closed stdin.
    Null,
    /// Write these bytes to the child, then close its stdin.
    Data(Vec<u8>),
    /// Read from an open file. The handle is duplicated for the child and
    /// the caller's copy is left open.
    File(Arc<File>),
}

impl StdinSource {
    pub fn data(bytes: impl Into<Vec<u8>>) -> Self {
        StdinSource::Data(bytes.into())
    }

    pub fn file(file: File) -> Self {
        StdinSource::File(Arc::new(file))
    }
}

/// Byte-to-text decoding applied to output chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8; invalid sequences become U+FFFD.
    #[default]
    Utf8,
    /// Every byte maps to the code point of the same value.
    Latin1,
    /// 7-bit ASCII; the high bit of each byte is dropped.
    Ascii,
    /// Lowercase hex digits, two per byte.
    Hex,
}

impl Encoding {
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Latin1 => "latin1",
            Encoding::Ascii => "ascii",
            Encoding::Hex => "hex",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "latin1" | "binary" => Ok(Encoding::Latin1),
            "ascii" => Ok(Encoding::Ascii),
            "hex" => Ok(Encoding::Hex),
            other => Err(format!(
                "unsupported encoding '{other}' (expected utf8, latin1, ascii or hex)"
            )),
        }
    }
}

/// Configuration for a single invocation.
///
/// `RunOptions::default()` captures output, echoes it (colored when the
/// terminal supports it), inherits stdin and forwards SIGINT/SIGTERM.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Extra environment variables; these win over the inherited ones.
    pub env: BTreeMap<String, String>,
    /// Accumulate stdout/stderr into strings.
    pub capture: bool,
    /// Suppress the invocation banner and live output.
    pub quiet: bool,
    pub stdin: StdinSource,
    pub encoding: Encoding,
    /// Re-raise SIGINT/SIGTERM on this process when the child died from one.
    pub propagate_signals: bool,
    pub color: ColorChoice,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            env: BTreeMap::new(),
            capture: true,
            quiet: false,
            stdin: StdinSource::Inherit,
            encoding: Encoding::Utf8,
            propagate_signals: true,
            color: ColorChoice::Auto,
        }
    }
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_stdin(mut self, stdin: StdinSource) -> Self {
        self.stdin = stdin;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_propagate_signals(mut self, propagate: bool) -> Self {
        self.propagate_signals = propagate;
        self
    }

    pub fn with_color(mut self, color: impl Into<ColorChoice>) -> Self {
        self.color = color.into();
        self
    }
}
