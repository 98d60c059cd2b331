use grove_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("no handler registered for route {0:?}")]
    UnknownRoute(String),

    #[error("handler already registered for route {0:?}")]
    DuplicateRoute(String),

    #[error("malformed payload: {0}")]
    Payload(String),

    #[error("operation not authorized: {0}")]
    Unauthorized(String),

    #[error("operation rejected: {0}")]
    Rejected(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
