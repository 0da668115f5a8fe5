// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-shot battery report (`cyclewatch --once`).

use crate::battery::info::display_name;
use crate::battery::{discover, Battery, BatteryInfo, Condition};
use crate::system::SystemInfo;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

const TROUBLESHOOTING: [&str; 3] = [
    "Make sure you're running this on a laptop with a battery",
    "Try running with sudo if you get permission errors",
    "For ThinkPad laptops, consider installing 'tp-smapi-dkms'",
];

/// What `--once` found out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    /// Battery the attributes were read from
    pub battery: Option<Battery>,
    pub cycle_count: Option<u32>,
    pub condition: Option<Condition>,
    pub health_percent: Option<f64>,
    /// All attributes of `battery`, only collected when asked for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<BatteryInfo>,
    /// DMI identification, only collected when asked for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemInfo>,
}

impl Report {
    /// Inspect the batteries under `sysfs_root`.
    ///
    /// Batteries are tried in discovery order (only `name` when given) until one
    /// exposes a parsable cycle count. When none does, the attributes of the
    /// last battery tried are kept for diagnosis.
    pub fn collect(
        sysfs_root: &Path,
        name: Option<&str>,
        verbose: bool,
        check_system: bool,
    ) -> Self {
        let mut report = Self {
            system: check_system.then(|| SystemInfo::read(sysfs_root)),
            ..Self::default()
        };

        let candidates = discover(sysfs_root)
            .into_iter()
            .filter(|battery| name.map_or(true, |name| battery.name() == name));

        for battery in candidates {
            info!("reading battery information from {}", battery.path().display());
            let attributes = BatteryInfo::read(battery.path());
            let cycle_count = attributes.cycle_count();

            match (cycle_count, attributes.get("cycle_count")) {
                (Some(_), _) => {}
                (None, Some(raw)) => debug!("could not parse cycle count {raw:?}"),
                (None, None) => debug!("cycle count not available for {}", battery.name()),
            }

            report.health_percent = attributes.health_percent();
            report.cycle_count = cycle_count;
            report.condition = cycle_count.map(Condition::from_cycles);
            report.info = verbose.then_some(attributes);
            report.battery = Some(battery);

            if cycle_count.is_some() {
                break;
            }
        }

        report
    }

    /// Process exit code: 0 when a cycle count was found, 1 otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.cycle_count.is_some() {
            0
        } else {
            1
        }
    }

    /// Human-readable rendering, same as the `Display` output.
    #[must_use]
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(out, "cyclewatch - battery cycle count")?;
        writeln!(out, "{}", "=".repeat(32))?;

        if let Some(system) = &self.system {
            writeln!(out, "\n=== System Information ===")?;
            for (label, value) in system.entries() {
                writeln!(out, "{label}: {value}")?;
            }
            if system.is_thinkpad() {
                writeln!(out, "✓ ThinkPad system detected")?;
                if system.is_thinkpad_14s_gen3() {
                    writeln!(out, "✓ ThinkPad 14s Gen 3 detected")?;
                }
            } else if !system.is_empty() {
                writeln!(out, "⚠ Cycle counts are best supported on ThinkPad laptops")?;
            }
        }

        match &self.battery {
            Some(battery) => writeln!(
                out,
                "\nBattery: {} ({})",
                battery.name(),
                battery.path().display()
            )?,
            None => writeln!(out, "\nNo battery found in the system.")?,
        }

        if let Some(info) = &self.info {
            writeln!(out, "\n=== Detailed Battery Information ===")?;
            if info.is_empty() {
                writeln!(out, "No battery information available.")?;
            }
            for (name, value) in info.iter() {
                writeln!(out, "{}: {}", display_name(name), value)?;
            }
            if let Some(health) = self.health_percent {
                writeln!(out, "Battery Health: {health:.1}%")?;
            }
        }

        match (self.cycle_count, self.condition) {
            (Some(count), Some(condition)) => {
                writeln!(out, "\nBattery Cycle Count: {count}")?;
                let mark = if condition.is_worn() { '⚠' } else { '✓' };
                writeln!(out, "{mark} {condition}")?;
            }
            _ => {
                writeln!(out, "\n✗ Could not determine battery cycle count")?;
                writeln!(out, "\nTroubleshooting tips:")?;
                for (index, tip) in TROUBLESHOOTING.iter().enumerate() {
                    writeln!(out, "{}. {}", index + 1, tip)?;
                }
            }
        }

        Ok(())
    }
}
