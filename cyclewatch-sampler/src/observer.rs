// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ordered registry of everything that wants to hear about new samples.
//!
//! Callbacks and [`SampleStream`](crate::SampleStream) channels share one list, so
//! every kind of observer is notified in registration order. Notification works
//! on a snapshot of the list: observers may subscribe or unsubscribe from inside
//! a callback without deadlocking, and the change applies from the next sample.

use core::fmt::Display;
use cyclewatch_core::SampleResult;
use futures::channel::mpsc::UnboundedSender;
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Weak};

use crate::tick::panic_message;

type Callback = Arc<dyn Fn(&SampleResult) -> Result<(), String> + Send + Sync>;

#[derive(Clone)]
pub(crate) enum Delivery {
    Callback(Callback),
    Channel(UnboundedSender<Arc<SampleResult>>),
}

struct Entry {
    id: u64,
    delivery: Delivery,
}

#[derive(Default)]
pub(crate) struct Registry {
    next_id: u64,
    closed: bool,
    entries: Vec<Entry>,
}

pub(crate) type SharedRegistry = Arc<Mutex<Registry>>;

impl Registry {
    pub(crate) fn insert(&mut self, delivery: Delivery) -> u64 {
        self.next_id += 1;
        let id = self.next_id;

        // Channels of a closed registry are dropped right away so the stream ends.
        if !(self.closed && matches!(delivery, Delivery::Channel(_))) {
            self.entries.push(Entry { id, delivery });
        }
        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop every channel so open streams complete. Callbacks stay registered.
    pub(crate) fn close(&mut self) {
        self.closed = true;
        self.entries
            .retain(|entry| matches!(entry.delivery, Delivery::Callback(_)));
    }

    fn snapshot(&self) -> Vec<(u64, Delivery)> {
        self.entries
            .iter()
            .map(|entry| (entry.id, entry.delivery.clone()))
            .collect()
    }
}

pub(crate) fn callback<F, E>(on_sample: F) -> Delivery
where
    F: Fn(&SampleResult) -> Result<(), E> + Send + Sync + 'static,
    E: Display,
{
    Delivery::Callback(Arc::new(move |sample: &SampleResult| {
        on_sample(sample).map_err(|error| error.to_string())
    }))
}

/// Deliver `sample` to every observer, in registration order.
///
/// A callback that returns an error or panics is logged and skipped for this
/// sample only. Channels whose stream was dropped are pruned.
pub(crate) fn notify(registry: &SharedRegistry, sampler: &str, sample: &Arc<SampleResult>) {
    let observers = registry.lock().snapshot();
    let mut disconnected = Vec::new();

    for (id, delivery) in observers {
        match delivery {
            Delivery::Callback(on_sample) => {
                match catch_unwind(AssertUnwindSafe(|| on_sample(sample))) {
                    Ok(Ok(())) => {}
                    Ok(Err(error)) => warn!(
                        "sampler {}: observer {} failed on tick {}: {}",
                        sampler,
                        id,
                        sample.sequence(),
                        error
                    ),
                    Err(payload) => warn!(
                        "sampler {}: observer {} panicked on tick {}: {}",
                        sampler,
                        id,
                        sample.sequence(),
                        panic_message(payload.as_ref())
                    ),
                }
            }
            Delivery::Channel(sender) => {
                if sender.unbounded_send(sample.clone()).is_err() {
                    disconnected.push(id);
                }
            }
        }
    }

    if !disconnected.is_empty() {
        let mut registry = registry.lock();
        for id in disconnected {
            registry.remove(id);
        }
    }
}

/// Handle returned by [`Sampler::subscribe`](crate::Sampler::subscribe).
///
/// Dropping the handle leaves the observer registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it.
#[derive(Debug)]
#[must_use = "the observer stays registered until `unsubscribe` is called"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: &SharedRegistry) -> Self {
        Self {
            id,
            registry: Arc::downgrade(registry),
        }
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Remove the observer. Returns `false` when it was already gone, e.g.
    /// because the sampler was dropped.
    pub fn unsubscribe(self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.lock().remove(self.id))
    }
}
