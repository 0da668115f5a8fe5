// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for cyclewatch samplers.
//!
//! There are two families:
//!
//! - [`ReadError`] is what a data source reports for a single read attempt. It never
//!   escapes a tick: the sampler folds it into a [`SampleResult`](crate::SampleResult).
//! - [`SamplerError`] is lifecycle misuse (starting twice, restarting a stopped
//!   sampler, invalid configuration). It is the only error returned to callers.
//!
//! # Examples
//!
//! ```
//! use cyclewatch_core::{ReadError, SampleStatus};
//! use std::io;
//!
//! let missing: ReadError = io::Error::from(io::ErrorKind::NotFound).into();
//! assert_eq!(missing.status(), SampleStatus::Unavailable);
//!
//! let denied: ReadError = io::Error::from(io::ErrorKind::PermissionDenied).into();
//! assert_eq!(denied.status(), SampleStatus::Error);
//! ```

use crate::SampleStatus;
use std::string::FromUtf8Error;
use std::time::Duration;

/// Failure of a single read attempt.
///
/// `Unavailable` is the expected absence of the data source (missing file or
/// device) and is not a fault. Every other variant is an unexpected failure and
/// ends up as [`SampleStatus::Error`] with [`detail`](ReadError::detail) as its
/// diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    /// The source is not present
    #[error("source unavailable")]
    Unavailable,

    /// Decode, permission or I/O failure
    #[error("{message}")]
    Failed {
        /// Diagnostic message, surfaced as the sample's error detail
        message: String,
    },

    /// The read did not finish within the configured read timeout
    #[error("read timed out after {after:?}")]
    TimedOut {
        /// The timeout that expired
        after: Duration,
    },

    /// The source panicked while reading
    #[error("source panicked: {context}")]
    Panicked {
        /// Panic payload, when it was a string
        context: String,
    },
}

impl ReadError {
    /// Create a generic read failure with the given message
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Status this failure maps to once folded into a sample
    #[must_use]
    pub const fn status(&self) -> SampleStatus {
        match self {
            Self::Unavailable => SampleStatus::Unavailable,
            Self::Failed { .. } | Self::TimedOut { .. } | Self::Panicked { .. } => {
                SampleStatus::Error
            }
        }
    }

    /// Diagnostic text for error samples, `None` for `Unavailable`
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Unavailable => None,
            other => Some(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::Unavailable,
            _ => Self::failed(error.to_string()),
        }
    }
}

impl From<FromUtf8Error> for ReadError {
    fn from(error: FromUtf8Error) -> Self {
        Self::failed(format!("invalid utf-8: {}", error.utf8_error()))
    }
}

/// Lifecycle misuse of a sampler.
///
/// These are the only faults a sampler propagates to its caller. They are fatal
/// to the call that triggered them, never to the sampler or the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SamplerError {
    /// `start()` was called on a sampler that is already running
    #[error("sampler is already started")]
    AlreadyStarted,

    /// `start()` was called after `stop()`; samplers are single-shot
    #[error("sampler has been stopped and cannot be restarted")]
    Stopped,

    /// The configuration was rejected
    #[error("invalid sampler configuration: {context}")]
    InvalidConfig {
        /// What was wrong with the configuration
        context: String,
    },

    /// `start()` was called outside of an async runtime
    #[error("no async runtime available to drive the sampler")]
    RuntimeUnavailable,
}

impl SamplerError {
    /// Create a configuration error with the given context
    pub fn invalid_config(context: impl Into<String>) -> Self {
        Self::InvalidConfig {
            context: context.into(),
        }
    }
}

/// Specialized Result type for sampler lifecycle operations
pub type Result<T> = std::result::Result<T, SamplerError>;
