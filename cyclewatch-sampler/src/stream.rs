// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::observer::Subscription;
use cyclewatch_core::SampleResult;
use futures::channel::mpsc::UnboundedReceiver;
use futures::stream::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Async view of a sampler's results, created by [`Sampler::watch`](crate::Sampler::watch).
///
/// - **Hot**: only samples published after the stream was created are delivered.
/// - **Unbounded**: the tick never waits for the consumer; samples queue up instead.
/// - **Completes** when the sampler stops or is dropped.
///
/// Dropping the stream unregisters it.
pub struct SampleStream {
    receiver: UnboundedReceiver<Arc<SampleResult>>,
    subscription: Option<Subscription>,
}

impl SampleStream {
    pub(crate) fn new(
        receiver: UnboundedReceiver<Arc<SampleResult>>,
        subscription: Subscription,
    ) -> Self {
        Self {
            receiver,
            subscription: Some(subscription),
        }
    }
}

impl Stream for SampleStream {
    type Item = Arc<SampleResult>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_next_unpin(cx)
    }
}

impl Drop for SampleStream {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}
