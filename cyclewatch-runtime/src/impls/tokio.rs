// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::timer::Timer;

/// [`Timer`] backed by Tokio's time driver.
///
/// Uses `tokio::time::Instant`, so `tokio::time::pause()` and `advance()` give
/// samplers a virtual clock in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    type Sleep = tokio::time::Sleep;

    type Instant = tokio::time::Instant;

    fn sleep_until(&self, deadline: Self::Instant) -> Self::Sleep {
        tokio::time::sleep_until(deadline)
    }

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }
}
