// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Failures of a child process itself are described by
//! [`RunError`](crate::exec::RunError); this enum covers everything around
//! it (configuration, CLI plumbing) and can wrap a `RunError` when a caller
//! wants a single error type.

use thiserror::Error;

use crate::exec::RunError;

#[derive(Error, Debug)]
pub enum JustrunError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, JustrunError>;
