// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The read capability a sampler polls.
//!
//! A [`Source`] performs one read-and-decode per call and reports either the raw
//! text, [`ReadError::Unavailable`] when the underlying file or device is absent,
//! or any other [`ReadError`] for unexpected failures. Trimming and folding into
//! a sample happen in the sampler, not here.

use crate::tick::panic_message;
use async_trait::async_trait;
use core::future::Future;
use cyclewatch_core::ReadError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One read of an external data source.
#[async_trait]
pub trait Source: Send + Sync + 'static {
    /// Read and decode the current value.
    ///
    /// # Errors
    ///
    /// [`ReadError::Unavailable`] when the source is absent, any other variant
    /// for decode, permission or I/O failures.
    async fn read(&self) -> Result<String, ReadError>;
}

#[async_trait]
impl<S: Source + ?Sized> Source for Arc<S> {
    async fn read(&self) -> Result<String, ReadError> {
        (**self).read().await
    }
}

#[async_trait]
impl<S: Source + ?Sized> Source for Box<S> {
    async fn read(&self) -> Result<String, ReadError> {
        (**self).read().await
    }
}

/// Runs blocking reads on Tokio's blocking pool, one at a time.
///
/// A blocking call cannot be interrupted, so a read abandoned by the sampler's
/// read timeout keeps running. Until it returns, further reads fail fast instead
/// of starting a second overlapping call.
#[derive(Debug, Clone, Default)]
struct BlockingGate {
    busy: Arc<AtomicBool>,
}

struct ReleaseOnDrop(Arc<AtomicBool>);

impl Drop for ReleaseOnDrop {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl BlockingGate {
    async fn run<F>(&self, read: F) -> Result<String, ReadError>
    where
        F: FnOnce() -> Result<String, ReadError> + Send + 'static,
    {
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(ReadError::failed("previous read is still in progress"));
        }

        let release = ReleaseOnDrop(self.busy.clone());
        let joined = tokio::task::spawn_blocking(move || {
            let _release = release;
            read()
        })
        .await;

        match joined {
            Ok(result) => result,
            Err(error) if error.is_panic() => Err(ReadError::Panicked {
                context: panic_message(error.into_panic().as_ref()),
            }),
            Err(error) => Err(ReadError::failed(error.to_string())),
        }
    }
}

/// Reads a text file, e.g. a sysfs attribute.
///
/// A missing file is [`ReadError::Unavailable`]; permission and other I/O
/// errors, and content that is not valid UTF-8, are failures.
///
/// ```no_run
/// use cyclewatch_sampler::{FileSource, Source};
///
/// # async fn example() {
/// let source = FileSource::new("/sys/class/power_supply/BAT0/cycle_count");
/// let raw = source.read().await;
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    gate: BlockingGate,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            gate: BlockingGate::default(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Source for FileSource {
    async fn read(&self) -> Result<String, ReadError> {
        let path = self.path.clone();
        self.gate
            .run(move || {
                let bytes = std::fs::read(path)?;
                Ok(String::from_utf8(bytes)?)
            })
            .await
    }
}

/// Source backed by an async closure. Built with [`source_fn`].
pub struct SourceFn<F> {
    read: F,
}

/// Adapt an async closure into a [`Source`].
///
/// ```
/// use cyclewatch_sampler::{source_fn, ReadError, Source};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = source_fn(|| async { Err::<String, _>(ReadError::Unavailable) });
/// assert_eq!(source.read().await, Err(ReadError::Unavailable));
/// # }
/// ```
pub fn source_fn<F, Fut>(read: F) -> SourceFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, ReadError>> + Send + 'static,
{
    SourceFn { read }
}

#[async_trait]
impl<F, Fut> Source for SourceFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, ReadError>> + Send + 'static,
{
    async fn read(&self) -> Result<String, ReadError> {
        (self.read)().await
    }
}

/// Source backed by a synchronous, possibly blocking closure. Built with
/// [`blocking_source`].
pub struct BlockingSource<F> {
    read: Arc<F>,
    gate: BlockingGate,
}

/// Adapt a blocking closure into a [`Source`].
///
/// Each read runs on Tokio's blocking pool so the sampler's timer keeps running.
pub fn blocking_source<F>(read: F) -> BlockingSource<F>
where
    F: Fn() -> Result<String, ReadError> + Send + Sync + 'static,
{
    BlockingSource {
        read: Arc::new(read),
        gate: BlockingGate::default(),
    }
}

#[async_trait]
impl<F> Source for BlockingSource<F>
where
    F: Fn() -> Result<String, ReadError> + Send + Sync + 'static,
{
    async fn read(&self) -> Result<String, ReadError> {
        let read = self.read.clone();
        self.gate.run(move || read()).await
    }
}
