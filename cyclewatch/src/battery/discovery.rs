// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directories scanned for `BAT*` entries, relative to the sysfs root.
pub const SEARCH_DIRS: [&str; 2] = ["class/power_supply", "devices/platform/smapi"];

/// A power-supply directory whose `type` attribute reads `Battery`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Battery {
    name: String,
    path: PathBuf,
}

impl Battery {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Entry name, e.g. `BAT0`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn attribute_path(&self, attribute: &str) -> PathBuf {
        self.path.join(attribute)
    }

    fn is_battery(path: &Path) -> bool {
        fs::read_to_string(path.join("type")).is_ok_and(|kind| kind.trim() == "Battery")
    }
}

/// Every battery under `sysfs_root`, in search-directory then name order.
///
/// Missing or unreadable search directories are skipped. A battery reachable
/// through several directories is listed once.
pub fn discover(sysfs_root: &Path) -> Vec<Battery> {
    let mut batteries: Vec<Battery> = Vec::new();

    for dir in SEARCH_DIRS {
        let base = sysfs_root.join(dir);
        let entries = match fs::read_dir(&base) {
            Ok(entries) => entries,
            Err(error) => {
                debug!("skipping {}: {}", base.display(), error);
                continue;
            }
        };

        let mut found: Vec<Battery> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let path = entry.path();
                (name.starts_with("BAT") && path.is_dir() && Battery::is_battery(&path))
                    .then(|| Battery::new(name, path))
            })
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));

        for battery in found {
            let canonical = fs::canonicalize(&battery.path).ok();
            let duplicate = batteries.iter().any(|known| {
                known.path == battery.path
                    || (canonical.is_some() && fs::canonicalize(&known.path).ok() == canonical)
            });
            if !duplicate {
                batteries.push(battery);
            }
        }
    }

    debug!(
        "discovered {} battery(ies) under {}",
        batteries.len(),
        sysfs_root.display()
    );
    batteries
}

/// The battery called `name`, or the first one found when `name` is `None`.
pub fn find_battery(sysfs_root: &Path, name: Option<&str>) -> Option<Battery> {
    let mut batteries = discover(sysfs_root).into_iter();
    match name {
        Some(name) => batteries.find(|battery| battery.name == name),
        None => batteries.next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn supply(root: &Path, dir: &str, name: &str, kind: &str) -> PathBuf {
        let path = root.join(dir).join(name);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("type"), format!("{kind}\n")).unwrap();
        path
    }

    #[test]
    fn test_discover_keeps_only_batteries() {
        let root = TempDir::new().unwrap();
        supply(root.path(), "class/power_supply", "BAT1", "Battery");
        supply(root.path(), "class/power_supply", "BAT0", "Battery");
        supply(root.path(), "class/power_supply", "AC", "Mains");
        supply(root.path(), "class/power_supply", "BATX", "UPS");

        let names: Vec<String> = discover(root.path())
            .iter()
            .map(|battery| battery.name().to_string())
            .collect();

        assert_eq!(names, vec!["BAT0", "BAT1"]);
    }

    #[test]
    fn test_discover_includes_smapi_batteries() {
        let root = TempDir::new().unwrap();
        supply(root.path(), "devices/platform/smapi", "BAT0", "Battery");

        let batteries = discover(root.path());

        assert_eq!(batteries.len(), 1);
        assert!(batteries[0].path().ends_with("devices/platform/smapi/BAT0"));
    }

    #[test]
    fn test_discover_without_power_supply_class_is_empty() {
        let root = TempDir::new().unwrap();

        assert!(discover(root.path()).is_empty());
        assert_eq!(find_battery(root.path(), None), None);
    }

    #[test]
    fn test_entry_without_type_file_is_ignored() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("class/power_supply/BAT0")).unwrap();

        assert!(discover(root.path()).is_empty());
    }

    #[test]
    fn test_find_battery_by_name() {
        let root = TempDir::new().unwrap();
        supply(root.path(), "class/power_supply", "BAT0", "Battery");
        let bat1 = supply(root.path(), "class/power_supply", "BAT1", "Battery");

        let found = find_battery(root.path(), Some("BAT1")).unwrap();

        assert_eq!(found.path(), bat1.as_path());
        assert_eq!(find_battery(root.path(), Some("BAT7")), None);
    }
}
