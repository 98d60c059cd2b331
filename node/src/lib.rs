//! Grove node: the governance engine on LMDB storage, plus the
//! configuration and logging a process hosting it needs.

pub mod config;
pub mod error;
pub mod logging;
pub mod node;

pub use config::NodeConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::GroveNode;
