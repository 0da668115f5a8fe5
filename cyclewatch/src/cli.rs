// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// cyclewatch - battery cycle count monitor
///
/// Keeps a panel label such as `Bat:318` up to date, or prints a one-shot
/// battery report with `--once`.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "cyclewatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults are used when it does not exist)
    #[arg(short, long, default_value = "cyclewatch.toml")]
    pub config: PathBuf,

    /// Seconds between cycle count reads
    #[arg(long)]
    pub interval: Option<u64>,

    /// Log level or filter directive (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Root of the sysfs tree
    #[arg(long)]
    pub sysfs_root: Option<PathBuf>,

    /// Battery to watch, e.g. BAT0
    #[arg(short, long)]
    pub battery: Option<String>,

    /// Print a report once and exit instead of watching
    #[arg(long)]
    pub once: bool,

    /// Show detailed battery information (with --once)
    #[arg(short, long)]
    pub verbose: bool,

    /// Check system compatibility (with --once)
    #[arg(long)]
    pub check_system: bool,

    /// Print the report as JSON (with --once)
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Command line values take precedence over the configuration file.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(interval) = self.interval {
            config.sampler.interval_secs = interval;
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if let Some(root) = &self.sysfs_root {
            config.battery.sysfs_root.clone_from(root);
        }
        if let Some(name) = &self.battery {
            config.battery.name = Some(name.clone());
        }
    }
}
