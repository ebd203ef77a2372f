//! In-process `ChainApi` adapter driven by explicit calls.
//!
//! `MemoryChain` stands in for a real node in tests and simulations: the
//! driver announces and finalizes heights by hand, and subscribers observe
//! them through the same `HeaderSubscription` handles a networked client
//! would hand out. Identifiers are derived deterministically from the
//! height so lookups are reproducible across runs.
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::api::{ChainApi, ChainError};
use crate::header::{BlockId, Header};
use crate::subscription::{HeaderSink, HeaderSubscription};

/// An in-process chain whose head is advanced by the caller.
#[derive(Default)]
pub struct MemoryChain {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    ids: HashMap<u64, BlockId>,
    new_sinks: Vec<HeaderSink>,
    finalized_sinks: Vec<HeaderSink>,
    closed: bool,
}

impl MemoryChain {
    /// Creates an empty chain with no blocks and no subscribers.
    pub fn new() -> Self {
        MemoryChain::default()
    }

    /// Announces a new block at `height` to all new-header subscribers.
    pub fn announce(&self, height: u64) {
        let mut inner = self.lock();
        inner
            .ids
            .entry(height)
            .or_insert_with(|| block_id_for(height));
        debug!(height, "announcing header");
        deliver(&mut inner.new_sinks, Header::new(height));
    }

    /// Marks the block at `height` finalized and notifies finalized-header
    /// subscribers. The identifier is recorded if the block was never
    /// announced as new (a finalized stream may be the only one observed).
    pub fn finalize(&self, height: u64) {
        let mut inner = self.lock();
        inner
            .ids
            .entry(height)
            .or_insert_with(|| block_id_for(height));
        debug!(height, "finalizing header");
        deliver(&mut inner.finalized_sinks, Header::new(height));
    }

    /// Closes the chain: all header streams end and further subscription
    /// attempts fail.
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        inner.new_sinks.clear();
        inner.finalized_sinks.clear();
    }

    /// Number of live new-header subscriptions.
    pub fn new_header_subscribers(&self) -> usize {
        self.lock().new_sinks.len()
    }

    /// Number of live finalized-header subscriptions.
    pub fn finalized_subscribers(&self) -> usize {
        self.lock().finalized_sinks.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // No mutation leaves Inner half-updated, so a poisoned lock is
        // still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn subscribe(&self, finalized: bool) -> Result<HeaderSubscription, ChainError> {
        let mut inner = self.lock();
        if inner.closed {
            return Err(ChainError::Subscribe("chain is closed".to_string()));
        }
        let (sink, subscription) = HeaderSubscription::channel();
        if finalized {
            inner.finalized_sinks.push(sink);
        } else {
            inner.new_sinks.push(sink);
        }
        Ok(subscription)
    }
}

#[async_trait]
impl ChainApi for MemoryChain {
    async fn subscribe_new_headers(&self) -> Result<HeaderSubscription, ChainError> {
        self.subscribe(false)
    }

    async fn subscribe_finalized_headers(&self) -> Result<HeaderSubscription, ChainError> {
        self.subscribe(true)
    }

    async fn block_id_at(&self, height: u64) -> Result<BlockId, ChainError> {
        self.lock()
            .ids
            .get(&height)
            .cloned()
            .ok_or(ChainError::UnknownHeight { height })
    }
}

/// Pushes a header to every sink, pruning the ones that have been cancelled
/// or dropped.
fn deliver(sinks: &mut Vec<HeaderSink>, header: Header) {
    sinks.retain(|sink| sink.send(header));
}

/// Deterministic identifier for the block at `height`: hex of
/// SHA-256("memory-chain-block" || height as little-endian bytes).
fn block_id_for(height: u64) -> BlockId {
    let mut hasher = Sha256::new();
    hasher.update(b"memory-chain-block");
    hasher.update(height.to_le_bytes());
    BlockId::new(hex::encode(hasher.finalize()))
}
