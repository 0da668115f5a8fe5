// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Attributes of a ThinkPad battery with 127 cycles.
pub const THINKPAD_BATTERY: [(&str, &str); 13] = [
    ("type", "Battery"),
    ("cycle_count", "127"),
    ("manufacturer", "LGC"),
    ("model_name", "02DL020"),
    ("serial_number", "12345"),
    ("technology", "Li-ion"),
    ("voltage_now", "12500000"),
    ("voltage_max_design", "12600000"),
    ("charge_full", "4500000"),
    ("charge_full_design", "4730000"),
    ("capacity", "95"),
    ("status", "Not charging"),
    ("present", "1"),
];

/// A throwaway sysfs tree.
pub struct FakeSysfs {
    root: TempDir,
}

impl FakeSysfs {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            root: TempDir::new()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Create `class/power_supply/<name>` with the given attribute files.
    pub fn battery(&self, name: &str, attributes: &[(&str, &str)]) -> anyhow::Result<PathBuf> {
        let dir = self.root().join("class/power_supply").join(name);
        fs::create_dir_all(&dir)?;
        for (attribute, value) in attributes {
            fs::write(dir.join(attribute), format!("{value}\n"))?;
        }
        Ok(dir)
    }

    pub fn dmi(&self, entries: &[(&str, &str)]) -> anyhow::Result<()> {
        let dir = self.root().join("class/dmi/id");
        fs::create_dir_all(&dir)?;
        for (name, value) in entries {
            fs::write(dir.join(name), format!("{value}\n"))?;
        }
        Ok(())
    }
}
