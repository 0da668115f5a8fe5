// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use cyclewatch_core::ReadError;
use cyclewatch_sampler::Source;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// One scripted read outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Value(String),
    Fail(ReadError),
    Panic(String),
}

impl Step {
    pub fn value(text: impl Into<String>) -> Self {
        Self::Value(text.into())
    }

    #[must_use]
    pub const fn fail(error: ReadError) -> Self {
        Self::Fail(error)
    }

    pub fn panic(message: impl Into<String>) -> Self {
        Self::Panic(message.into())
    }
}

#[derive(Debug)]
struct Script {
    pending: VecDeque<Step>,
    last: Option<Step>,
}

/// A [`Source`] that replays a script, one step per read.
///
/// Once the script is exhausted the last step repeats; an empty script reads as
/// [`ReadError::Unavailable`]. Clones share the script and the call counter, so a
/// test can hand one clone to a sampler and inspect the other.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Arc<Mutex<Script>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                pending: steps.into_iter().collect(),
                last: None,
            })),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of reads performed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_step(&self) -> Option<Step> {
        let mut script = self.script.lock();
        if let Some(step) = script.pending.pop_front() {
            script.last = Some(step.clone());
            Some(step)
        } else {
            script.last.clone()
        }
    }
}

#[async_trait]
impl Source for ScriptedSource {
    async fn read(&self) -> Result<String, ReadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.next_step() {
            Some(Step::Value(text)) => Ok(text),
            Some(Step::Fail(error)) => Err(error),
            Some(Step::Panic(message)) => panic!("{message}"),
            None => Err(ReadError::Unavailable),
        }
    }
}
