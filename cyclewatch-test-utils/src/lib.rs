// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the cyclewatch sampler.
//!
//! Designed for development and testing only, not for production code.
//!
//! # Key Types
//!
//! - [`ScriptedSource`] replays a fixed script of read outcomes, one per call
//! - [`SlowSource`] takes a fixed time per read and records read overlap
//! - [`Recorder`] is an observer that keeps every sample it was handed
//!
//! # Example
//!
//! ```rust
//! use cyclewatch_test_utils::{ScriptedSource, Step};
//! use cyclewatch_sampler::{ReadError, Source};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let source = ScriptedSource::new([Step::value("42"), Step::fail(ReadError::Unavailable)]);
//!
//! assert_eq!(source.read().await, Ok("42".to_string()));
//! assert_eq!(source.read().await, Err(ReadError::Unavailable));
//! // The last step repeats once the script is exhausted
//! assert_eq!(source.read().await, Err(ReadError::Unavailable));
//! assert_eq!(source.calls(), 3);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod recorder;
pub mod scripted;
pub mod slow;

pub use helpers::{assert_no_sample_emitted, next_sample};
pub use recorder::Recorder;
pub use scripted::{ScriptedSource, Step};
pub use slow::SlowSource;
