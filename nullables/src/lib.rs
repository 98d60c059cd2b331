//! Nullable infrastructure for deterministic testing.
//!
//! The engine reaches the outside world through seams: the clock, the
//! ledger that executes proposal operations, and the address format. This
//! crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod bank;
pub mod clock;
pub mod identity;

pub use bank::{NullBank, SendRequest, BANK_SEND_ROUTE};
pub use clock::NullClock;
pub use identity::null_address;
