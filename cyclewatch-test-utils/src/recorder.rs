// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::convert::Infallible;
use cyclewatch_core::SampleResult;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Notify;

/// Observer that records every sample it receives.
///
/// ```rust
/// use cyclewatch_test_utils::Recorder;
/// use cyclewatch_core::SampleResult;
/// use std::time::Instant;
///
/// let recorder = Recorder::new();
/// let observer = recorder.observer();
///
/// observer(&SampleResult::ok(1, Instant::now(), "42")).unwrap();
/// assert_eq!(recorder.values(), vec![Some("42".to_string())]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    samples: Arc<Mutex<Vec<SampleResult>>>,
    notify: Arc<Notify>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback suitable for `Sampler::subscribe`.
    pub fn observer(
        &self,
    ) -> impl Fn(&SampleResult) -> Result<(), Infallible> + Send + Sync + 'static {
        let samples = self.samples.clone();
        let notify = self.notify.clone();
        move |sample: &SampleResult| {
            samples.lock().push(sample.clone());
            notify.notify_waiters();
            Ok(())
        }
    }

    #[must_use]
    pub fn samples(&self) -> Vec<SampleResult> {
        self.samples.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn sequences(&self) -> Vec<u64> {
        self.samples.lock().iter().map(SampleResult::sequence).collect()
    }

    #[must_use]
    pub fn values(&self) -> Vec<Option<String>> {
        self.samples
            .lock()
            .iter()
            .map(|sample| sample.value().map(str::to_string))
            .collect()
    }

    /// Wait until at least `count` samples were recorded.
    pub async fn wait_for(&self, count: usize) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.len() >= count {
                return;
            }
            notified.await;
        }
    }
}
