// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use cyclewatch_core::ReadError;
use cyclewatch_sampler::Source;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct Counters {
    calls: AtomicUsize,
    completed: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

struct InFlight<'a>(&'a Counters);

impl<'a> InFlight<'a> {
    fn enter(counters: &'a Counters) -> Self {
        let now = counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        counters.max_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(counters)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A [`Source`] whose reads take `delay` of (Tokio) time, then return `value`.
///
/// Tracks how many reads overlapped. A read abandoned mid-way (for example by a
/// read timeout) leaves the in-flight count when it is dropped.
#[derive(Debug, Clone)]
pub struct SlowSource {
    value: String,
    delay: Duration,
    counters: Arc<Counters>,
}

impl SlowSource {
    pub fn new(value: impl Into<String>, delay: Duration) -> Self {
        Self {
            value: value.into(),
            delay,
            counters: Arc::default(),
        }
    }

    /// Reads started so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.counters.calls.load(Ordering::SeqCst)
    }

    /// Reads that ran to completion.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.counters.completed.load(Ordering::SeqCst)
    }

    /// Highest number of reads ever running at the same time.
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.counters.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Source for SlowSource {
    async fn read(&self) -> Result<String, ReadError> {
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
        let _in_flight = InFlight::enter(&self.counters);

        tokio::time::sleep(self.delay).await;

        self.counters.completed.fetch_add(1, Ordering::SeqCst);
        Ok(self.value.clone())
    }
}
