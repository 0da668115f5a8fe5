// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The polling sampler.
//!
//! ## Lifecycle
//!
//! `NotStarted → Running` on [`start`](Sampler::start), `Running → Stopped` on
//! [`stop`](Sampler::stop). `Stopped` is terminal: a sampler mirrors one
//! enable/disable pairing of its host, so restarting means building a new one.
//!
//! ## Scheduling
//!
//! One driver task per sampler. Ticks sit on a fixed-rate grid starting at the
//! moment `start()` ran (first tick immediately when `initial_run` is set,
//! otherwise one interval later). The driver awaits each read before looking at
//! the next deadline, so reads never overlap; deadlines that passed while a read
//! was in flight are skipped, not queued.
//!
//! ## Per tick
//!
//! read completes → result stored as [`latest`](Sampler::latest) → observers
//! notified in registration order → next deadline computed.

use crate::config::SamplerConfig;
use crate::observer::{self, Delivery, SharedRegistry, Subscription};
use crate::source::Source;
use crate::stream::SampleStream;
use crate::tick::{log_sample, read_once};
use core::fmt::Display;
use cyclewatch_core::{CancellationToken, Latest, Result, SampleResult, SamplerError};
use cyclewatch_runtime::{DriverTask, Timer, TokioTimer};
use futures::channel::mpsc;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Observable lifecycle state of a [`Sampler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    NotStarted,
    Running,
    Stopped,
}

enum Lifecycle {
    NotStarted,
    Running(DriverTask),
    Stopped,
}

struct Shared<S, T> {
    name: String,
    source: S,
    timer: T,
    interval: Duration,
    initial_run: bool,
    read_timeout: Option<Duration>,
    latest: RwLock<Latest>,
    registry: SharedRegistry,
    started: AtomicBool,
    exited: CancellationToken,
}

impl<S, T> Shared<S, T> {
    fn publish(&self, sample: SampleResult) {
        let sample = Arc::new(sample);
        *self.latest.write() = Latest::Sample(sample.clone());
        observer::notify(&self.registry, &self.name, &sample);
    }
}

/// Runs on driver exit, including when the driver is aborted by a panic.
struct ExitGuard<S, T>(Arc<Shared<S, T>>);

impl<S, T> Drop for ExitGuard<S, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            warn!("sampler {}: driver panicked, sampler is stopped", self.0.name);
        }
        self.0.registry.lock().close();
        self.0.exited.cancel();
    }
}

/// Periodically reads a [`Source`] and publishes the latest [`SampleResult`].
///
/// Read failures never escape a tick: every tick produces exactly one result,
/// `Ok`, `Unavailable` or `Error`. Observer failures never escape the observer
/// call. Only lifecycle misuse is reported to the caller.
///
/// # Example
///
/// ```
/// use cyclewatch_sampler::{source_fn, Latest, ReadError, Sampler, SamplerConfig, SamplerError};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let sampler = Sampler::new(
///     SamplerConfig::new(source_fn(|| async { Ok::<_, ReadError>("318".to_string()) }))
///         .with_interval(Duration::from_secs(30)),
/// )
/// .unwrap();
/// assert_eq!(sampler.latest(), Latest::NoSampleYet);
///
/// sampler.start().unwrap();
/// assert_eq!(sampler.start(), Err(SamplerError::AlreadyStarted));
///
/// sampler.stop().await;
/// sampler.stop().await; // idempotent
/// assert_eq!(sampler.start(), Err(SamplerError::Stopped));
/// # }
/// ```
pub struct Sampler<S, T = TokioTimer> {
    shared: Arc<Shared<S, T>>,
    lifecycle: Mutex<Lifecycle>,
}

impl<S: Source> Sampler<S, TokioTimer> {
    /// Build a sampler driven by Tokio's clock.
    ///
    /// # Errors
    ///
    /// [`SamplerError::InvalidConfig`] when the configuration is rejected.
    pub fn new(config: SamplerConfig<S>) -> Result<Self> {
        Self::with_timer(config, TokioTimer)
    }
}

impl<S: Source, T: Timer> Sampler<S, T> {
    /// Build a sampler driven by a custom [`Timer`].
    ///
    /// # Errors
    ///
    /// [`SamplerError::InvalidConfig`] when the configuration is rejected.
    pub fn with_timer(config: SamplerConfig<S>, timer: T) -> Result<Self> {
        config.validate()?;

        let SamplerConfig {
            source,
            interval,
            initial_run,
            read_timeout,
            name,
        } = config;

        Ok(Self {
            shared: Arc::new(Shared {
                name,
                source,
                timer,
                interval,
                initial_run,
                read_timeout,
                latest: RwLock::new(Latest::NoSampleYet),
                registry: SharedRegistry::default(),
                started: AtomicBool::new(false),
                exited: CancellationToken::new(),
            }),
            lifecycle: Mutex::new(Lifecycle::NotStarted),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.shared.interval
    }

    /// Current lifecycle state. A driver that exited on its own (it panicked)
    /// reports `Stopped`.
    #[must_use]
    pub fn state(&self) -> SamplerState {
        match *self.lifecycle.lock() {
            Lifecycle::NotStarted => SamplerState::NotStarted,
            Lifecycle::Running(_) if self.shared.exited.is_cancelled() => SamplerState::Stopped,
            Lifecycle::Running(_) => SamplerState::Running,
            Lifecycle::Stopped => SamplerState::Stopped,
        }
    }

    /// Begin the schedule on the current Tokio runtime.
    ///
    /// With `initial_run` the driver's first action is a read-and-publish,
    /// ahead of any timer-driven tick.
    ///
    /// # Errors
    ///
    /// - [`SamplerError::AlreadyStarted`] when the sampler is running
    /// - [`SamplerError::Stopped`] when the sampler was stopped or its driver died
    /// - [`SamplerError::RuntimeUnavailable`] outside a Tokio runtime
    ///
    /// A failed call leaves the state unchanged.
    pub fn start(&self) -> Result<()> {
        let mut lifecycle = self.lifecycle.lock();
        match *lifecycle {
            Lifecycle::Running(_) if self.shared.exited.is_cancelled() => {
                return Err(SamplerError::Stopped)
            }
            Lifecycle::Running(_) => return Err(SamplerError::AlreadyStarted),
            Lifecycle::Stopped => return Err(SamplerError::Stopped),
            Lifecycle::NotStarted => {}
        }

        let shared = self.shared.clone();
        let task = DriverTask::spawn(move |cancel| drive(shared, cancel))?;
        self.shared.started.store(true, Ordering::Release);
        *lifecycle = Lifecycle::Running(task);

        info!(
            "sampler {} started (interval {:?}, initial run {})",
            self.shared.name, self.shared.interval, self.shared.initial_run
        );
        Ok(())
    }

    /// Cancel the schedule and wait for the driver to exit.
    ///
    /// Idempotent. A tick already reading when `stop()` is called completes
    /// and is the last one published; once `stop()` returns no tick starts and
    /// no result is published. Open [`SampleStream`]s complete.
    ///
    /// Stopping a sampler that never started retires it as well.
    pub async fn stop(&self) {
        let previous = {
            let mut lifecycle = self.lifecycle.lock();
            core::mem::replace(&mut *lifecycle, Lifecycle::Stopped)
        };

        match previous {
            Lifecycle::Running(task) => {
                task.shutdown().await;
                info!("sampler {} stopped", self.shared.name);
            }
            Lifecycle::NotStarted => self.shared.registry.lock().close(),
            Lifecycle::Stopped => {}
        }

        // A concurrent stop() may own the shutdown; wait for the driver either way.
        if self.shared.started.load(Ordering::Acquire) {
            self.shared.exited.cancelled().await;
        }
    }

    /// Most recent result, or [`Latest::NoSampleYet`] before the first tick.
    ///
    /// Safe to call from any thread while a tick is publishing: the result is
    /// swapped in as a whole.
    #[must_use]
    pub fn latest(&self) -> Latest {
        self.shared.latest.read().clone()
    }

    /// Register a callback invoked with every new result.
    ///
    /// Callbacks run synchronously on the driver task, in registration order,
    /// right after the result is stored. A callback that returns `Err` or panics
    /// is logged and skipped for that result only; it stays registered and the
    /// schedule continues.
    ///
    /// Callbacks are not preempted: a slow callback delays the callbacks after
    /// it and the next tick (missed ticks are skipped). Consumers that may be
    /// slow should use [`watch`](Self::watch), whose delivery never blocks.
    pub fn subscribe<F, E>(&self, on_sample: F) -> Subscription
    where
        F: Fn(&SampleResult) -> core::result::Result<(), E> + Send + Sync + 'static,
        E: Display,
    {
        let id = self
            .shared
            .registry
            .lock()
            .insert(observer::callback(on_sample));
        Subscription::new(id, &self.shared.registry)
    }

    /// Stream of every result published from now on.
    ///
    /// The stream completes when the sampler stops; on a stopped sampler it is
    /// empty.
    pub fn watch(&self) -> SampleStream {
        let (sender, receiver) = mpsc::unbounded();
        let id = self
            .shared
            .registry
            .lock()
            .insert(Delivery::Channel(sender));
        SampleStream::new(receiver, Subscription::new(id, &self.shared.registry))
    }

    /// Number of registered callbacks and open streams.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.shared.registry.lock().len()
    }
}

async fn drive<S: Source, T: Timer>(shared: Arc<Shared<S, T>>, cancel: CancellationToken) {
    let _exit = ExitGuard(shared.clone());
    let timer = shared.timer.clone();
    let interval = shared.interval;

    let origin = timer.now();
    let mut deadline = if shared.initial_run {
        origin
    } else {
        origin + interval
    };
    let mut sequence = 0_u64;

    loop {
        if cancel
            .run_until_cancelled(timer.sleep_until(deadline))
            .await
            .is_none()
            || cancel.is_cancelled()
        {
            break;
        }

        sequence += 1;
        let attempted_at = timer.now();
        let read = read_once(&shared.source, &timer, shared.read_timeout).await;
        let sample = SampleResult::from_read(sequence, attempted_at.into(), read);

        log_sample(&shared.name, &sample);
        shared.publish(sample);

        let now = timer.now();
        deadline = deadline + interval;
        if deadline < now {
            let (skipped, until_next) = catch_up(now - deadline, interval);
            deadline = now + until_next;
            debug!(
                "sampler {}: tick {} overran the interval, skipped {} tick(s)",
                shared.name, sequence, skipped
            );
        }
    }
}

/// For a grid point `behind` in the past: how many grid points were missed and
/// how long from now until the next one.
fn catch_up(behind: Duration, interval: Duration) -> (u128, Duration) {
    let step = interval.as_nanos();
    let behind = behind.as_nanos();
    let missed = behind.div_ceil(step);
    let remainder = behind % step;
    if remainder == 0 {
        return (missed, Duration::ZERO);
    }

    // below the interval, which validation bounds well inside u64 nanoseconds
    let until_next = u64::try_from(step - remainder).unwrap_or(u64::MAX);
    (missed, Duration::from_nanos(until_next))
}
