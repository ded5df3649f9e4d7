// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{JustrunError, Result};

/// Environment variable that overrides the default config location.
pub const CONFIG_ENV_VAR: &str = "JUSTRUN_CONFIG";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** validate
/// encodings, env names or color styles. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Default config path: `$JUSTRUN_CONFIG` if set, else `Justrun.toml` in the
/// current working directory.
pub fn default_config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("Justrun.toml"))
}

/// Find and load the configuration to use.
///
/// - An explicit path must exist and be valid.
/// - Without one, the default path is used only if it exists.
pub fn locate(explicit: Option<&Path>) -> Result<Option<ConfigFile>> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading explicit config file");
        return load_and_validate(path)
            .map(Some)
            .map_err(|e| with_path(e, path));
    }

    let path = default_config_path();
    if !path.is_file() {
        debug!(path = %path.display(), "no config file found; using defaults");
        return Ok(None);
    }

    debug!(path = %path.display(), "loading default config file");
    load_and_validate(&path)
        .map(Some)
        .map_err(|e| with_path(e, &path))
}

fn with_path(err: JustrunError, path: &Path) -> JustrunError {
    match err {
        JustrunError::ConfigError(msg) => {
            JustrunError::ConfigError(format!("{}: {msg}", path.display()))
        }
        other => JustrunError::Other(
            anyhow::Error::new(other).context(format!("loading config file {}", path.display())),
        ),
    }
}
