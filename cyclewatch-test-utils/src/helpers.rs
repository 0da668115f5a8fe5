// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cyclewatch_core::SampleResult;
use futures::stream::StreamExt;
use futures::Stream;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Panics if `stream` yields a sample (or ends) within `timeout_ms`.
pub async fn assert_no_sample_emitted<S>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = Arc<SampleResult>> + Unpin,
{
    tokio::select! {
        sample = stream.next() => {
            panic!("Unexpected sample emitted, expected no output: {sample:?}");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Next sample of `stream`. Panics if the stream has ended.
pub async fn next_sample<S>(stream: &mut S) -> Arc<SampleResult>
where
    S: Stream<Item = Arc<SampleResult>> + Unpin,
{
    stream.next().await.expect("expected next sample")
}
