// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `cyclewatch.toml` schema and loader.
//!
//! Every section and key is optional:
//!
//! ```toml
//! [sampler]
//! interval_secs = 30
//! initial_run = true
//! # read_timeout_ms = 2000
//!
//! [battery]
//! sysfs_root = "/sys"
//! # name = "BAT0"
//!
//! [label]
//! prefix = "Bat:"
//!
//! [logging]
//! level = "info"
//! ```

use crate::label::DEFAULT_PREFIX;
use anyhow::{Context, Result};
use cyclewatch_sampler::{SamplerConfig, DEFAULT_INTERVAL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub sampler: SamplerSection,
    pub battery: BatterySection,
    pub label: LabelSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplerSection {
    pub interval_secs: u64,
    pub initial_run: bool,
    pub read_timeout_ms: Option<u64>,
}

impl Default for SamplerSection {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL.as_secs(),
            initial_run: true,
            read_timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatterySection {
    pub sysfs_root: PathBuf,
    /// Battery entry to watch, e.g. `BAT0`; the first battery found when unset
    pub name: Option<String>,
}

impl Default for BatterySection {
    fn default() -> Self {
        Self {
            sysfs_root: PathBuf::from("/sys"),
            name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelSection {
    pub prefix: String,
}

impl Default for LabelSection {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// `tracing` filter directive, e.g. `info` or `cyclewatch_sampler=debug`
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load configuration from file, or the defaults when the file does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.sampler.interval_secs)
    }

    #[must_use]
    pub fn read_timeout(&self) -> Option<Duration> {
        self.sampler.read_timeout_ms.map(Duration::from_millis)
    }

    /// Sampler settings for `source`, named after the watched battery.
    pub fn sampler_config<S>(&self, source: S, name: impl Into<String>) -> SamplerConfig<S> {
        let config = SamplerConfig::new(source)
            .with_name(name)
            .with_interval(self.interval())
            .with_initial_run(self.sampler.initial_run);

        match self.read_timeout() {
            Some(timeout) => config.with_read_timeout(timeout),
            None => config,
        }
    }
}
