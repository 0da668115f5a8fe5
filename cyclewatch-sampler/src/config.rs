// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cyclewatch_core::{Result, SamplerError};
use std::time::Duration;

/// Default time between ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

/// Longest accepted time between ticks (one year), so deadlines stay representable.
pub const MAX_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

const DEFAULT_NAME: &str = "sampler";

/// Everything a [`Sampler`](crate::Sampler) needs: the source to read and the schedule.
///
/// Defaults: 30 second interval, an initial read on start, no read timeout.
///
/// ```
/// use cyclewatch_sampler::{FileSource, SamplerConfig};
/// use std::time::Duration;
///
/// let config = SamplerConfig::new(FileSource::new("/sys/class/power_supply/BAT0/cycle_count"))
///     .with_name("bat0-cycles")
///     .with_interval(Duration::from_secs(60))
///     .with_read_timeout(Duration::from_secs(2));
///
/// assert!(config.initial_run());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SamplerConfig<S> {
    pub(crate) source: S,
    pub(crate) interval: Duration,
    pub(crate) initial_run: bool,
    pub(crate) read_timeout: Option<Duration>,
    pub(crate) name: String,
}

impl<S> SamplerConfig<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            interval: DEFAULT_INTERVAL,
            initial_run: true,
            read_timeout: None,
            name: DEFAULT_NAME.to_string(),
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Whether `start()` samples immediately instead of waiting one interval
    #[must_use]
    pub fn with_initial_run(mut self, initial_run: bool) -> Self {
        self.initial_run = initial_run;
        self
    }

    /// Reads that take longer than `timeout` produce an `Error` sample
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Name used in log messages
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn initial_run(&self) -> bool {
        self.initial_run
    }

    #[must_use]
    pub const fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Check the schedule.
    ///
    /// # Errors
    ///
    /// [`SamplerError::InvalidConfig`] when the interval or the read timeout is
    /// zero, or the interval exceeds [`MAX_INTERVAL`].
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(SamplerError::invalid_config(
                "interval must be greater than zero",
            ));
        }

        if self.interval > MAX_INTERVAL {
            return Err(SamplerError::invalid_config(format!(
                "interval must not exceed {MAX_INTERVAL:?}"
            )));
        }

        if self.read_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(SamplerError::invalid_config(
                "read timeout must be greater than zero",
            ));
        }

        Ok(())
    }
}
