use chain_client::{BlockId, ChainApi, ChainError, HeaderSubscription};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while waiting for a block height.
#[derive(Debug, Error)]
pub enum WaitError {
    /// The header subscription could not be established.
    #[error("failed to subscribe to header stream: {0}")]
    Subscribe(#[source] ChainError),
    /// The header stream ended before a header at or above the target
    /// height was observed.
    #[error("header stream closed before reaching the target height")]
    StreamClosed,
    /// The identifier lookup for the target height failed after the wait
    /// resolved.
    #[error("block identifier lookup failed: {0}")]
    Lookup(#[source] ChainError),
}

/// Waits until a block at or above `target` is included, then returns the
/// identifier of the block at exactly `target`.
///
/// Subscribes to the new-header stream and resolves on the first header with
/// `height >= target`; the subscription is cancelled before the identifier
/// lookup is issued. No head check is performed before subscribing: if the
/// chain is already past `target`, the wait resolves only once the stream
/// delivers another header at or above it. Callers needing an immediate
/// answer for historic heights should consult the head themselves first.
pub async fn wait_for_inclusion<C>(chain: &C, target: u64) -> Result<BlockId, WaitError>
where
    C: ChainApi + ?Sized,
{
    let subscription = chain
        .subscribe_new_headers()
        .await
        .map_err(WaitError::Subscribe)?;
    debug!(target_height = target, "watching new headers");
    resolve_at_target(chain, subscription, target).await
}

/// Waits until a block at or above `target` is finalized, then returns the
/// identifier of the block at exactly `target`.
///
/// Same contract as [`wait_for_inclusion`], over the finalized-header
/// stream.
pub async fn wait_for_finalization<C>(chain: &C, target: u64) -> Result<BlockId, WaitError>
where
    C: ChainApi + ?Sized,
{
    let subscription = chain
        .subscribe_finalized_headers()
        .await
        .map_err(WaitError::Subscribe)?;
    debug!(target_height = target, "watching finalized headers");
    resolve_at_target(chain, subscription, target).await
}

/// Drains the subscription until the first header with `height >= target`,
/// cancels it, and looks up the identifier at `target`.
///
/// The lookup is keyed by `target` rather than by the observed header's
/// height: a stream that skips heights still resolves to the block the
/// caller asked about.
async fn resolve_at_target<C>(
    chain: &C,
    mut subscription: HeaderSubscription,
    target: u64,
) -> Result<BlockId, WaitError>
where
    C: ChainApi + ?Sized,
{
    loop {
        let Some(header) = subscription.recv().await else {
            return Err(WaitError::StreamClosed);
        };
        debug!(height = header.height, target_height = target, "observed header");
        if header.height >= target {
            subscription.cancel();
            debug!(target_height = target, "target height reached, fetching identifier");
            return chain.block_id_at(target).await.map_err(WaitError::Lookup);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_client::MemoryChain;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    async fn wait_for_subscriber(chain: &MemoryChain) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
        while chain.new_header_subscribers() == 0 {
            assert!(
                tokio::time::Instant::now() < deadline,
                "subscription never registered"
            );
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn subscribe_failure_surfaces() {
        let chain = MemoryChain::new();
        chain.close();

        let err = wait_for_inclusion(&chain, 1).await.expect_err("closed");
        assert!(matches!(err, WaitError::Subscribe(_)));
    }

    #[tokio::test]
    async fn stream_close_fails_the_wait() {
        let chain = Arc::new(MemoryChain::new());
        let task = tokio::spawn({
            let chain = Arc::clone(&chain);
            async move { wait_for_inclusion(chain.as_ref(), 10).await }
        });

        wait_for_subscriber(&chain).await;
        chain.announce(1);
        chain.close();

        let err = timeout(Duration::from_millis(500), task)
            .await
            .expect("timeout")
            .expect("join")
            .expect_err("stream closed");
        assert!(matches!(err, WaitError::StreamClosed));
    }
}
