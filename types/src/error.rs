//! Errors raised while constructing or parsing value types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid weight: {0:?}")]
    InvalidWeight(String),

    #[error("weight arithmetic overflow")]
    WeightOverflow,
}
