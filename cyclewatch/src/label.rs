// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cyclewatch_sampler::{Latest, SampleResult, SampleStatus};

/// Default label prefix.
pub const DEFAULT_PREFIX: &str = "Bat:";

/// Turns sampler results into a short panel label.
///
/// | state          | label       |
/// |----------------|-------------|
/// | `Ok`           | `Bat:318`   |
/// | `Unavailable`  | `Bat:N/A`   |
/// | `Error`        | `Bat:Err`   |
/// | no sample yet  | `Bat:--`    |
///
/// ```
/// use cyclewatch::PanelLabel;
/// use cyclewatch_sampler::{Latest, SampleResult};
/// use std::time::Instant;
///
/// let label = PanelLabel::default();
/// assert_eq!(label.format(&Latest::NoSampleYet), "Bat:--");
/// assert_eq!(label.format_sample(&SampleResult::ok(1, Instant::now(), "318")), "Bat:318");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLabel {
    prefix: String,
}

impl Default for PanelLabel {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl PanelLabel {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn format(&self, latest: &Latest) -> String {
        match latest {
            Latest::NoSampleYet => format!("{}--", self.prefix),
            Latest::Sample(sample) => self.format_sample(sample),
        }
    }

    #[must_use]
    pub fn format_sample(&self, sample: &SampleResult) -> String {
        match sample.status() {
            SampleStatus::Ok => format!("{}{}", self.prefix, sample.value().unwrap_or_default()),
            SampleStatus::Unavailable => format!("{}N/A", self.prefix),
            SampleStatus::Error => format!("{}Err", self.prefix),
        }
    }
}
