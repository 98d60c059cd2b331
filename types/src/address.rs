//! Account address type with `grove_` prefix.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A grove account address, always prefixed with `grove_`.
///
/// Member accounts and derived group accounts share the same format:
/// the prefix followed by base32 characters. Checksum validation lives in
/// `grove-crypto`; this type only guarantees the address is well-formed
/// enough to be used as a storage key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// The standard prefix for all grove addresses.
    pub const PREFIX: &'static str = "grove_";

    /// Longest address accepted, prefix included.
    pub const MAX_LEN: usize = 128;

    /// Parse an address, rejecting anything without the prefix, with an
    /// empty body, or containing characters outside lowercase alphanumerics.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        let body = match s.strip_prefix(Self::PREFIX) {
            Some(body) if !body.is_empty() => body,
            _ => return Err(TypesError::InvalidAddress(s)),
        };
        let well_formed = s.len() <= Self::MAX_LEN
            && body
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase());
        if !well_formed {
            return Err(TypesError::InvalidAddress(s));
        }
        Ok(Self(s))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// The part after the prefix.
    pub fn body(&self) -> &str {
        &self.0[Self::PREFIX.len()..]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}
