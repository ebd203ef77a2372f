//! Client-side seam for talking to a chain node.
//!
//! This crate exposes:
//! - Header stream plumbing: `HeaderSubscription`, `HeaderSink`
//! - The node capability set as a trait: `ChainApi`
//! - An in-process adapter for tests and simulations: `MemoryChain`
//!
//! The wire protocol, connection management and retry policy all live in
//! whatever concrete client implements `ChainApi`; nothing here owns a
//! socket.
pub mod api;
pub mod header;
pub mod memory;
pub mod subscription;

pub use api::{ChainApi, ChainError};
pub use header::{BlockId, Header};
pub use memory::MemoryChain;
pub use subscription::{HeaderSink, HeaderSubscription};
