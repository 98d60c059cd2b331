//! A governance engine on durable storage.

use grove_governance::{GovernanceEngine, Msg, MsgResponse};
use grove_nullables::{NullBank, BANK_SEND_ROUTE};
use grove_store_lmdb::LmdbStore;
use grove_transactions::Router;
use grove_types::{Clock, SystemClock};
use tracing::{debug, info, warn};

use crate::config::NodeConfig;
use crate::error::NodeError;

/// Owns the LMDB environment and the engine running on it.
///
/// Commands are applied one at a time through `&mut self`; wrap the node in a
/// mutex to share it between threads.
pub struct GroveNode<C = SystemClock> {
    config: NodeConfig,
    engine: GovernanceEngine<LmdbStore, C>,
}

impl GroveNode<SystemClock> {
    /// Open (or create) the store under `config.data_dir` with wall-clock time.
    pub fn open(config: NodeConfig) -> Result<Self, NodeError> {
        Self::open_with_clock(config, SystemClock)
    }
}

impl<C: Clock> GroveNode<C> {
    pub fn open_with_clock(config: NodeConfig, clock: C) -> Result<Self, NodeError> {
        let store = LmdbStore::open(&config.data_dir, config.map_size_bytes())?;

        let mut router = Router::new();
        if config.dev_bank {
            router.register(BANK_SEND_ROUTE, NullBank)?;
        }
        info!(
            data_dir = %config.data_dir.display(),
            map_size_mb = config.map_size_mb,
            routes = ?router.routes(),
            "node opened"
        );

        let engine = GovernanceEngine::new(store, clock, router, config.governance.clone());
        Ok(Self { config, engine })
    }

    /// Apply one command. A failed command leaves no trace in the store,
    /// except that a proposal found stale stays aborted.
    pub fn apply(&mut self, msg: Msg) -> Result<MsgResponse, NodeError> {
        let name = msg.name();
        debug!(command = name, "applying command");
        self.engine.handle(msg).map_err(|err| {
            warn!(command = name, kind = ?err.kind(), error = %err, "command failed");
            NodeError::from(err)
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn engine(&self) -> &GovernanceEngine<LmdbStore, C> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GovernanceEngine<LmdbStore, C> {
        &mut self.engine
    }
}
