// src/config/mod.rs

//! Optional TOML defaults for the `justrun` binary.
//!
//! - [`model`] holds the raw serde mapping and the validated `ConfigFile`.
//! - [`validate`] turns one into the other.
//! - [`loader`] reads files from disk and finds the default location.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, locate};
pub use model::{ConfigFile, RawConfigFile, RunSection};
