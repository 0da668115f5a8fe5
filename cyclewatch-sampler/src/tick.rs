// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::source::Source;
use core::any::Any;
use core::pin::pin;
use cyclewatch_core::{ReadError, SampleResult, SampleStatus};
use cyclewatch_runtime::Timer;
use futures::future::{self, Either};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

/// One guarded read: panics in the source and an expired read timeout both become
/// read errors, so nothing escapes into the driver loop.
pub(crate) async fn read_once<S, T>(
    source: &S,
    timer: &T,
    read_timeout: Option<Duration>,
) -> Result<String, ReadError>
where
    S: Source + ?Sized,
    T: Timer,
{
    let read = AssertUnwindSafe(source.read()).catch_unwind();

    let outcome = match read_timeout {
        None => read.await,
        Some(after) => {
            let read = pin!(read);
            let expiry = pin!(timer.sleep_future(after));
            match future::select(read, expiry).await {
                Either::Left((outcome, _)) => outcome,
                Either::Right(((), _)) => return Err(ReadError::TimedOut { after }),
            }
        }
    };

    outcome.unwrap_or_else(|payload| {
        Err(ReadError::Panicked {
            context: panic_message(payload.as_ref()),
        })
    })
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

pub(crate) fn log_sample(name: &str, sample: &SampleResult) {
    match sample.status() {
        SampleStatus::Ok => debug!(
            "sampler {} tick {}: {}",
            name,
            sample.sequence(),
            sample.value().unwrap_or_default()
        ),
        SampleStatus::Unavailable => debug!(
            "sampler {} tick {}: source unavailable",
            name,
            sample.sequence()
        ),
        SampleStatus::Error => debug!(
            "sampler {} tick {}: read failed: {}",
            name,
            sample.sequence(),
            sample.error_detail().unwrap_or_default()
        ),
    }
}
