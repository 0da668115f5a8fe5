// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Shared types for cyclewatch samplers.
//!
//! A sampler turns every read attempt into exactly one [`SampleResult`]. This
//! crate holds that value type, the [`Latest`] snapshot (including the
//! `NoSampleYet` sentinel), the error taxonomy and the runtime-agnostic
//! [`CancellationToken`] used to stop driver tasks.

pub mod cancellation_token;
pub mod error;
pub mod sample;

pub use self::cancellation_token::CancellationToken;
pub use self::error::{ReadError, Result, SamplerError};
pub use self::sample::{Latest, SampleResult, SampleStatus};
