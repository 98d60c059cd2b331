//! The embedded operation payload.

use crate::OperationError;
use grove_types::Address;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One sub-operation of a proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Selects the handler in the [`crate::Router`].
    pub route: String,
    /// Addresses whose authority the operation runs under.
    pub signers: Vec<Address>,
    /// JSON-encoded body, decoded by the handler.
    pub payload: Vec<u8>,
}

impl Operation {
    /// Build an operation from any serializable body.
    pub fn new<T: Serialize>(
        route: impl Into<String>,
        signers: Vec<Address>,
        body: &T,
    ) -> Result<Self, OperationError> {
        let payload = serde_json::to_vec(body).map_err(|e| OperationError::Payload(e.to_string()))?;
        Ok(Self {
            route: route.into(),
            signers,
            payload,
        })
    }

    /// Decode the payload as `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, OperationError> {
        serde_json::from_slice(&self.payload).map_err(|e| OperationError::Payload(e.to_string()))
    }

    /// True when at least one signer is listed and every signer is `address`.
    pub fn is_signed_only_by(&self, address: &Address) -> bool {
        !self.signers.is_empty() && self.signers.iter().all(|s| s == address)
    }
}
