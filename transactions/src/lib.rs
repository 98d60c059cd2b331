//! Operations embedded in proposals and their execution.
//!
//! A proposal carries an ordered list of [`Operation`]s. Each one names a
//! route, the addresses that authorize it and an opaque JSON payload. When a
//! proposal executes, the [`Router`] hands every operation to the
//! [`OperationHandler`] registered for its route, together with the store
//! view the execution runs against.

pub mod error;
pub mod operation;
pub mod router;

pub use error::OperationError;
pub use operation::Operation;
pub use router::{OperationHandler, Router};
