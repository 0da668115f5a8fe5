// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Machine identification from the DMI tables.

use serde::Serialize;
use std::fs;
use std::path::Path;

const DMI_DIR: &str = "class/dmi/id";

/// Vendor and product strings from `<sysfs>/class/dmi/id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    pub sys_vendor: Option<String>,
    pub product_name: Option<String>,
    pub product_version: Option<String>,
}

impl SystemInfo {
    /// Read the DMI strings. Unreadable entries are left empty.
    pub fn read(sysfs_root: &Path) -> Self {
        let dmi = sysfs_root.join(DMI_DIR);
        let read = |name: &str| {
            fs::read_to_string(dmi.join(name))
                .ok()
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
        };

        Self {
            sys_vendor: read("sys_vendor"),
            product_name: read("product_name"),
            product_version: read("product_version"),
        }
    }

    /// `true` when nothing could be read
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sys_vendor.is_none() && self.product_name.is_none() && self.product_version.is_none()
    }

    /// Lenovo hardware with "ThinkPad" in the product name or version.
    ///
    /// Lenovo puts the machine type in `product_name` on many models and the
    /// marketing name in `product_version`, so both are checked.
    #[must_use]
    pub fn is_thinkpad(&self) -> bool {
        contains(self.sys_vendor.as_deref(), "lenovo") && self.product_contains("thinkpad")
    }

    /// A ThinkPad 14s Gen 3.
    #[must_use]
    pub fn is_thinkpad_14s_gen3(&self) -> bool {
        self.is_thinkpad() && self.product_contains("14s gen 3")
    }

    /// Labelled DMI entries that were read, for display.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Sys Vendor", self.sys_vendor.as_deref()),
            ("Product Name", self.product_name.as_deref()),
            ("Product Version", self.product_version.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|value| (label, value)))
    }

    fn product_contains(&self, needle: &str) -> bool {
        contains(self.product_name.as_deref(), needle)
            || contains(self.product_version.as_deref(), needle)
    }
}

fn contains(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|text| text.to_lowercase().contains(needle))
}
