//! Header stream plumbing shared by every `ChainApi` implementation.
//!
//! A subscription is a pair: the consumer holds a `HeaderSubscription` and
//! pulls headers from it; the producer holds the matching `HeaderSink` and
//! pushes headers in. Cancellation is synchronous and idempotent: once
//! `cancel` returns, no further header can be observed through the handle
//! and `HeaderSink::send` reports failure.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;

use crate::header::Header;

/// Consumer half of a header subscription.
///
/// Owned exclusively by whoever is waiting on the stream. Dropping the
/// handle cancels the subscription implicitly; `cancel` does so explicitly
/// and is safe to call more than once.
pub struct HeaderSubscription {
    receiver: mpsc::UnboundedReceiver<Header>,
    cancelled: Arc<AtomicBool>,
}

/// Producer half of a header subscription, held by the chain adapter.
pub struct HeaderSink {
    sender: mpsc::UnboundedSender<Header>,
    cancelled: Arc<AtomicBool>,
}

impl HeaderSubscription {
    /// Creates a connected sink/subscription pair.
    pub fn channel() -> (HeaderSink, HeaderSubscription) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let sink = HeaderSink {
            sender,
            cancelled: Arc::clone(&cancelled),
        };
        let subscription = HeaderSubscription {
            receiver,
            cancelled,
        };
        (sink, subscription)
    }

    /// Waits for the next header.
    ///
    /// Returns `None` once the stream is closed: either the producer went
    /// away or this handle was cancelled.
    pub async fn recv(&mut self) -> Option<Header> {
        if self.cancelled.load(Ordering::Acquire) {
            return None;
        }
        self.receiver.recv().await
    }

    /// Cancels the subscription.
    ///
    /// Idempotent. Once this returns, `recv` yields `None` and the producer
    /// side observes the cancellation on its next `send`; headers already
    /// buffered are discarded rather than delivered.
    pub fn cancel(&mut self) {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        self.receiver.close();
        while self.receiver.try_recv().is_ok() {}
    }

    /// Whether `cancel` has been called on this handle.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for HeaderSubscription {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

impl HeaderSink {
    /// Delivers a header to the subscriber.
    ///
    /// Returns `false` if the subscription was cancelled or dropped; the
    /// producer should discard the sink at that point.
    pub fn send(&self, header: Header) -> bool {
        if self.cancelled.load(Ordering::Acquire) {
            return false;
        }
        self.sender.send(header).is_ok()
    }

    /// Whether the consumer has cancelled the subscription.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn delivers_headers_in_order() {
        let (sink, mut sub) = HeaderSubscription::channel();
        assert!(sink.send(Header::new(1)));
        assert!(sink.send(Header::new(2)));

        assert_eq!(sub.recv().await, Some(Header::new(1)));
        assert_eq!(sub.recv().await, Some(Header::new(2)));
    }

    #[tokio::test]
    async fn recv_ends_when_sink_dropped() {
        let (sink, mut sub) = HeaderSubscription::channel();
        drop(sink);

        let next = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout");
        assert_eq!(next, None);
    }

    #[tokio::test]
    async fn cancel_is_idempotent_and_stops_delivery() {
        let (sink, mut sub) = HeaderSubscription::channel();
        assert!(sink.send(Header::new(7)));

        sub.cancel();
        sub.cancel();

        assert!(sub.is_cancelled());
        assert!(sink.is_cancelled());
        assert!(!sink.send(Header::new(8)));
        // Header 7 was buffered before the cancel; it must not surface.
        assert_eq!(sub.recv().await, None);
    }

    #[tokio::test]
    async fn drop_counts_as_cancellation_for_the_sink() {
        let (sink, sub) = HeaderSubscription::channel();
        drop(sub);
        assert!(!sink.send(Header::new(1)));
        assert!(sink.is_cancelled());
    }
}
