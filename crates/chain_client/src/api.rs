use async_trait::async_trait;
use thiserror::Error;

use crate::header::BlockId;
use crate::subscription::HeaderSubscription;

/// Errors surfaced by a chain client.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The client could not establish a header subscription.
    #[error("subscription failed: {0}")]
    Subscribe(String),
    /// No block identifier is available for the requested height.
    #[error("no block identifier known for height {height}")]
    UnknownHeight {
        /// The height that was looked up.
        height: u64,
    },
    /// Any other failure reported by the underlying client.
    #[error("chain client error: {0}")]
    Client(String),
}

/// Capability set this crate expects from a chain node client.
///
/// Concrete implementations own the transport, connection management and
/// retries; callers here treat them as opaque. Each subscription call
/// registers an independent stream, cancelled through its own handle.
#[async_trait]
pub trait ChainApi: Send + Sync {
    /// Subscribes to the stream of new (provisional) block headers.
    async fn subscribe_new_headers(&self) -> Result<HeaderSubscription, ChainError>;

    /// Subscribes to the stream of finalized block headers.
    async fn subscribe_finalized_headers(&self) -> Result<HeaderSubscription, ChainError>;

    /// Returns the identifier of the block at `height`.
    ///
    /// Fails with [`ChainError::UnknownHeight`] if the height has not been
    /// produced yet (or is otherwise unavailable to the client).
    async fn block_id_at(&self, height: u64) -> Result<BlockId, ChainError>;
}
