// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ReadError;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Outcome class of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleStatus {
    /// The source produced a value
    Ok,
    /// The source is not present
    Unavailable,
    /// The read failed unexpectedly
    Error,
}

impl fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Unavailable => f.write_str("unavailable"),
            Self::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Ok(String),
    Unavailable,
    Error(String),
}

/// The value produced by one tick of a sampler.
///
/// A value is present exactly when the status is [`SampleStatus::Ok`], and an
/// error detail exactly when it is [`SampleStatus::Error`]. The payload is kept
/// private so no other combination can be built.
///
/// # Example
///
/// ```
/// use cyclewatch_core::{SampleResult, SampleStatus};
/// use std::time::Instant;
///
/// let sample = SampleResult::ok(1, Instant::now(), " 42\n");
/// assert_eq!(sample.status(), SampleStatus::Ok);
/// assert_eq!(sample.value(), Some("42"));
/// assert_eq!(sample.error_detail(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleResult {
    sequence: u64,
    timestamp: Instant,
    outcome: Outcome,
}

impl SampleResult {
    /// A successful sample. Surrounding whitespace is trimmed from `value`.
    pub fn ok(sequence: u64, timestamp: Instant, value: impl AsRef<str>) -> Self {
        Self {
            sequence,
            timestamp,
            outcome: Outcome::Ok(value.as_ref().trim().to_string()),
        }
    }

    /// The source was not present.
    #[must_use]
    pub const fn unavailable(sequence: u64, timestamp: Instant) -> Self {
        Self {
            sequence,
            timestamp,
            outcome: Outcome::Unavailable,
        }
    }

    /// The read failed with the given diagnostic.
    pub fn error(sequence: u64, timestamp: Instant, detail: impl Into<String>) -> Self {
        Self {
            sequence,
            timestamp,
            outcome: Outcome::Error(detail.into()),
        }
    }

    /// Fold the outcome of one read attempt into a sample.
    pub fn from_read(
        sequence: u64,
        timestamp: Instant,
        read: Result<String, ReadError>,
    ) -> Self {
        match read {
            Ok(text) => Self::ok(sequence, timestamp, text),
            Err(ReadError::Unavailable) => Self::unavailable(sequence, timestamp),
            Err(other) => Self::error(sequence, timestamp, other.to_string()),
        }
    }

    #[must_use]
    pub const fn status(&self) -> SampleStatus {
        match self.outcome {
            Outcome::Ok(_) => SampleStatus::Ok,
            Outcome::Unavailable => SampleStatus::Unavailable,
            Outcome::Error(_) => SampleStatus::Error,
        }
    }

    /// Trimmed text payload, only for `Ok` samples
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Ok(value) => Some(value),
            _ => None,
        }
    }

    /// Diagnostic text, only for `Error` samples
    #[must_use]
    pub fn error_detail(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Error(detail) => Some(detail),
            _ => None,
        }
    }

    /// When the read attempt started
    #[must_use]
    pub const fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// 1-based tick number, strictly increasing in publish order
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Ok(_))
    }
}

/// Snapshot of a sampler's most recent result.
///
/// `NoSampleYet` is the sentinel seen before the first tick completes. It is a
/// distinct state rather than a made-up default value, so consumers can show
/// something explicit (a placeholder, a spinner) until real data arrives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Latest {
    #[default]
    NoSampleYet,
    Sample(Arc<SampleResult>),
}

impl Latest {
    #[must_use]
    pub const fn is_sample(&self) -> bool {
        matches!(self, Self::Sample(_))
    }

    #[must_use]
    pub fn as_sample(&self) -> Option<&SampleResult> {
        match self {
            Self::Sample(sample) => Some(sample),
            Self::NoSampleYet => None,
        }
    }

    #[must_use]
    pub fn into_sample(self) -> Option<Arc<SampleResult>> {
        match self {
            Self::Sample(sample) => Some(sample),
            Self::NoSampleYet => None,
        }
    }
}

impl From<Arc<SampleResult>> for Latest {
    fn from(sample: Arc<SampleResult>) -> Self {
        Self::Sample(sample)
    }
}
