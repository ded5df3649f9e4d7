#![allow(dead_code)]

use justrun::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.config.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_color(mut self, slot: &str, style: &str) -> Self {
        self.config.color.insert(slot.to_string(), style.to_string());
        self
    }

    pub fn capture(mut self, val: bool) -> Self {
        self.config.run.capture = val;
        self
    }

    pub fn quiet(mut self, val: bool) -> Self {
        self.config.run.quiet = val;
        self
    }

    pub fn encoding(mut self, name: &str) -> Self {
        self.config.run.encoding = name.to_string();
        self
    }

    pub fn propagate_signals(mut self, val: bool) -> Self {
        self.config.run.propagate_signals = val;
        self
    }

    pub fn color_enabled(mut self, val: bool) -> Self {
        self.config.run.color = val;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
