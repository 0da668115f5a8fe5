// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Periodic, fault-tolerant sampling of a slow or unreliable data source.
//!
//! A [`Sampler`] drives a [`Source`] on a fixed interval, folds every read
//! attempt into exactly one [`SampleResult`](cyclewatch_core::SampleResult) and
//! publishes it as the latest value and to registered observers.
//!
//! ```
//! use cyclewatch_sampler::{source_fn, ReadError, Sampler, SamplerConfig};
//! use futures::StreamExt;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let source = source_fn(|| async { Ok::<_, ReadError>("42\n".to_string()) });
//! let sampler = Sampler::new(SamplerConfig::new(source).with_interval(Duration::from_secs(30)))
//!     .unwrap();
//!
//! let mut samples = sampler.watch();
//! sampler.start().unwrap();
//!
//! let first = samples.next().await.unwrap();
//! assert_eq!(first.value(), Some("42"));
//! assert!(sampler.latest().is_sample());
//!
//! sampler.stop().await;
//! assert!(samples.next().await.is_none());
//! # }
//! ```

#[macro_use]
mod logging;

pub mod config;
pub mod observer;
pub mod sampler;
pub mod source;
pub mod stream;
mod tick;

pub use self::config::{SamplerConfig, DEFAULT_INTERVAL, MAX_INTERVAL};
pub use self::observer::Subscription;
pub use self::sampler::{Sampler, SamplerState};
pub use self::source::{blocking_source, source_fn, BlockingSource, FileSource, Source, SourceFn};
pub use self::stream::SampleStream;
pub use cyclewatch_core::{
    CancellationToken, Latest, ReadError, SampleResult, SampleStatus, SamplerError,
};
pub use cyclewatch_runtime::{Timer, TokioTimer};
