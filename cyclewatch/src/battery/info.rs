// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Serialize, Serializer};
use std::fs;
use std::io;
use std::path::Path;

/// Power-supply attributes collected for a detailed report, in display order.
pub const ATTRIBUTES: [&str; 13] = [
    "cycle_count",
    "manufacturer",
    "model_name",
    "serial_number",
    "technology",
    "voltage_now",
    "voltage_max_design",
    "charge_full",
    "charge_full_design",
    "capacity",
    "status",
    "health",
    "present",
];

/// Snapshot of a battery's sysfs attributes.
///
/// Attributes the battery does not expose are absent. Attributes that exist
/// but cannot be read keep the failure as their value (`Error reading: ...`)
/// so a report can show it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatteryInfo {
    attributes: Vec<(&'static str, String)>,
}

impl BatteryInfo {
    /// Read every attribute in [`ATTRIBUTES`] from the battery directory `path`.
    pub fn read(path: &Path) -> Self {
        let attributes = ATTRIBUTES
            .iter()
            .filter_map(|&name| match fs::read_to_string(path.join(name)) {
                Ok(text) => Some((name, text.trim().to_string())),
                Err(error) if error.kind() == io::ErrorKind::NotFound => None,
                Err(error) => Some((name, format!("Error reading: {error}"))),
            })
            .collect();

        Self { attributes }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (&'static str, String)>) -> Self {
        Self {
            attributes: pairs.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// `cycle_count` as a number, `None` when absent or not an integer.
    #[must_use]
    pub fn cycle_count(&self) -> Option<u32> {
        self.get("cycle_count")?.parse().ok()
    }

    /// Remaining capacity relative to design, in percent.
    ///
    /// `None` unless both `charge_full` and `charge_full_design` are integers
    /// and the design value is non-zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn health_percent(&self) -> Option<f64> {
        let full: u64 = self.get("charge_full")?.parse().ok()?;
        let design: u64 = self.get("charge_full_design")?.parse().ok()?;
        if design == 0 {
            return None;
        }
        Some(full as f64 / design as f64 * 100.0)
    }
}

impl Serialize for BatteryInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// `charge_full_design` → `Charge Full Design`
#[must_use]
pub fn display_name(attribute: &str) -> String {
    attribute
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(pairs: &[(&'static str, &str)]) -> BatteryInfo {
        BatteryInfo::from_pairs(pairs.iter().map(|(k, v)| (*k, (*v).to_string())))
    }

    #[test]
    fn test_health_percent() {
        let battery = info(&[("charge_full", "4500000"), ("charge_full_design", "4730000")]);

        let health = battery.health_percent().unwrap();

        assert!((health - 95.137).abs() < 0.01);
    }

    #[test]
    fn test_health_percent_unusable_inputs() {
        assert_eq!(info(&[("charge_full", "4500000")]).health_percent(), None);
        assert_eq!(
            info(&[("charge_full", "4500000"), ("charge_full_design", "0")]).health_percent(),
            None
        );
        assert_eq!(
            info(&[("charge_full", "n/a"), ("charge_full_design", "4730000")]).health_percent(),
            None
        );
    }

    #[test]
    fn test_cycle_count_parse() {
        assert_eq!(info(&[("cycle_count", "127")]).cycle_count(), Some(127));
        assert_eq!(info(&[("cycle_count", "unknown")]).cycle_count(), None);
        assert_eq!(BatteryInfo::default().cycle_count(), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("charge_full_design"), "Charge Full Design");
        assert_eq!(display_name("present"), "Present");
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let battery = info(&[("cycle_count", "127"), ("manufacturer", "LGC")]);

        let json = serde_json::to_string(&battery).unwrap();

        assert_eq!(json, r#"{"cycle_count":"127","manufacturer":"LGC"}"#);
    }
}
