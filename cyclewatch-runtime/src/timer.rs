// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use core::future::Future;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Clock and sleep primitive a sampler schedules its ticks with.
///
/// Any timer with these operations satisfies the scheduling contract: the
/// sampler itself guarantees at most one read in flight and no tick after stop.
pub trait Timer: Clone + Send + Sync + Debug + 'static {
    type Sleep: Future<Output = ()> + Send;

    type Instant: Copy
        + Debug
        + Ord
        + Send
        + Sync
        + Add<Duration, Output = Self::Instant>
        + Sub<Self::Instant, Output = Duration>
        + Into<std::time::Instant>;

    fn sleep_until(&self, deadline: Self::Instant) -> Self::Sleep;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        self.sleep_until(self.now() + duration)
    }

    fn now(&self) -> Self::Instant;
}
