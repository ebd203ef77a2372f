//! Helpers for benchmarking a chain through its client API.
//!
//! This crate exposes:
//! - Block waits: `wait_for_inclusion`, `wait_for_finalization` — suspend
//!   until a header stream reaches a target height, then return the block
//!   identifier at that height.
//! - Payload filler: `payload::generate` — batches of random alphanumeric
//!   strings sized for transaction throughput runs.
//!
//! The chain itself is reached through the `chain_client::ChainApi` seam;
//! nothing here retries, times out or reconnects. Callers wanting a deadline
//! wrap the wait futures in `tokio::time::timeout`.
pub mod payload;
pub mod waiter;

pub use payload::{PAYLOAD_LEN, PayloadError, generate};
pub use waiter::{WaitError, wait_for_finalization, wait_for_inclusion};
