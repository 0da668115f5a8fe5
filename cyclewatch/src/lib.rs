// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Battery cycle-count monitoring on Linux.
//!
//! Finds batteries under sysfs, reads their cycle count (plus the rest of the
//! power-supply attributes for detailed reports) and keeps a short panel label
//! such as `Bat:318` current through a [`Sampler`](cyclewatch_sampler::Sampler).
//!
//! # Module Organization
//!
//! - `battery` - discovery, attribute reads, wear classification, the cycle-count source
//! - `system` - DMI vendor/product check
//! - `label` - panel label formatting
//! - `report` - one-shot text/JSON report
//! - `config` - `cyclewatch.toml`
//! - `cli` - command line flags
//! - `monitor` - the long-running label loop

pub mod battery;
pub mod cli;
pub mod config;
pub mod label;
pub mod monitor;
pub mod report;
pub mod system;

pub use battery::{discover, find_battery, Battery, BatteryInfo, Condition, CycleCountSource};
pub use cli::Cli;
pub use config::AppConfig;
pub use label::PanelLabel;
pub use report::Report;
pub use system::SystemInfo;
