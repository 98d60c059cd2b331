//! Fundamental types for the grove governance engine.
//!
//! This crate defines the value types shared by every other crate in the
//! workspace: account addresses, fixed-point decimal weights, timestamps,
//! the clock seam and the engine-wide parameters.

pub mod address;
pub mod error;
pub mod params;
pub mod time;
pub mod weight;

pub use address::Address;
pub use error::TypesError;
pub use params::GovernanceParams;
pub use time::{Clock, SystemClock, Timestamp};
pub use weight::Weight;
