//! Engine-wide parameters.

use serde::{Deserialize, Serialize};

fn default_max_metadata_len() -> usize {
    255
}

/// Limits applied uniformly by the governance engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Upper bound, in bytes, on every metadata field: group, member,
    /// group account, proposal and vote.
    #[serde(default = "default_max_metadata_len")]
    pub max_metadata_len: usize,
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            max_metadata_len: default_max_metadata_len(),
        }
    }
}

impl GovernanceParams {
    /// Whether `metadata` fits under the configured bound.
    pub fn metadata_fits(&self, metadata: &[u8]) -> bool {
        metadata.len() <= self.max_metadata_len
    }
}
