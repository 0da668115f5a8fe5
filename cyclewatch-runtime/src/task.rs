// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background task with cooperative cancellation and an awaitable shutdown.

#![cfg(feature = "runtime-tokio")]

use core::future::Future;
use cyclewatch_core::{CancellationToken, SamplerError};
use tokio::task::JoinHandle;

#[cfg(feature = "tracing")]
macro_rules! warn {
    ($($arg:tt)*) => {
        tracing::warn!($($arg)*);
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! warn {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

/// Handle to a spawned driver loop.
///
/// The spawned future receives a [`CancellationToken`] it must watch. Dropping
/// the handle cancels the token without waiting; [`shutdown`](Self::shutdown)
/// cancels and then waits for the future to return, which is what makes
/// "nothing runs after stop" hold.
///
/// # Example
///
/// ```rust
/// use cyclewatch_runtime::DriverTask;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let ticks = Arc::new(AtomicU32::new(0));
/// let counter = ticks.clone();
///
/// let task = DriverTask::spawn(|cancel| async move {
///     while !cancel.is_cancelled() {
///         counter.fetch_add(1, Ordering::SeqCst);
///         tokio::task::yield_now().await;
///     }
/// })
/// .unwrap();
///
/// tokio::task::yield_now().await;
/// task.shutdown().await;
///
/// let after_shutdown = ticks.load(Ordering::SeqCst);
/// tokio::task::yield_now().await;
/// assert_eq!(ticks.load(Ordering::SeqCst), after_shutdown);
/// # }
/// ```
#[derive(Debug)]
pub struct DriverTask {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl DriverTask {
    /// Spawn `f` on the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::RuntimeUnavailable`] when called outside a runtime.
    pub fn spawn<F, Fut>(f: F) -> Result<Self, SamplerError>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| SamplerError::RuntimeUnavailable)?;

        let cancel = CancellationToken::new();
        let handle = runtime.spawn(f(cancel.clone()));

        Ok(Self {
            cancel,
            handle: Some(handle),
        })
    }

    /// Signal the task to stop without waiting for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// `true` once the spawned future has returned (or panicked).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Cancel the task and wait until it has returned.
    ///
    /// Must not be awaited from inside the task itself.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();

        if let Some(handle) = self.handle.take() {
            if let Err(error) = handle.await {
                if error.is_panic() {
                    warn!("driver task panicked: {}", error);
                }
            }
        }
    }
}

impl Drop for DriverTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
