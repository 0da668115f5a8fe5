// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::Serialize;
use std::fmt;

/// Wear estimate derived from the cycle count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    /// Fewer than 300 cycles
    Excellent,
    /// 300 to 499 cycles
    Good,
    /// 500 to 999 cycles
    ModerateWear,
    /// 1000 cycles or more
    ReplaceSoon,
}

impl Condition {
    #[must_use]
    pub const fn from_cycles(cycles: u32) -> Self {
        match cycles {
            0..=299 => Self::Excellent,
            300..=499 => Self::Good,
            500..=999 => Self::ModerateWear,
            _ => Self::ReplaceSoon,
        }
    }

    /// `true` for the conditions worth warning about
    #[must_use]
    pub const fn is_worn(self) -> bool {
        matches!(self, Self::ModerateWear | Self::ReplaceSoon)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Excellent => "Battery is in excellent condition",
            Self::Good => "Battery is in good condition",
            Self::ModerateWear => "Battery is showing moderate wear",
            Self::ReplaceSoon => "Battery may need replacement soon",
        })
    }
}
