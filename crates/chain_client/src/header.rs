use core::fmt;

use serde::{Deserialize, Serialize};

/// Block header as delivered by a node's header streams.
///
/// Only the height is needed on this side of the seam; concrete clients may
/// carry richer headers internally and project them down to this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Block number, zero-based from genesis.
    pub height: u64,
}

impl Header {
    /// Creates a header at the given height.
    pub fn new(height: u64) -> Self {
        Header { height }
    }
}

/// Opaque identifier naming the block at a given height.
///
/// Typically a hex-encoded block hash, but nothing here inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(String);

impl BlockId {
    /// Wraps an identifier string produced by a chain client.
    pub fn new(id: impl Into<String>) -> Self {
        BlockId(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning the underlying string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
