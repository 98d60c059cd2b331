use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("config error: {0}")]
    Config(String),

    #[error("lmdb error: {0}")]
    Lmdb(#[from] grove_store_lmdb::LmdbError),

    #[error("store error: {0}")]
    Store(#[from] grove_store::StoreError),

    #[error("router error: {0}")]
    Router(#[from] grove_transactions::OperationError),

    #[error("governance error: {0}")]
    Governance(#[from] grove_governance::GovernanceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
