//! Decimal voting weights.
//!
//! Weights are fixed-point integers (u128) with [`WEIGHT_DECIMALS`]
//! fractional digits, so "1", "0.5" and "2.25" are all exact. They travel
//! as decimal strings in every serialized form.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of fractional decimal digits a weight can carry.
pub const WEIGHT_DECIMALS: u32 = 18;

/// Raw units in one whole weight unit.
const ONE: u128 = 10u128.pow(WEIGHT_DECIMALS);

/// A non-negative decimal voting weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Weight(u128);

impl Weight {
    pub const ZERO: Self = Self(0);

    /// Build a weight from raw fixed-point units.
    pub fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Build a weight of `units` whole units.
    pub fn from_units(units: u64) -> Self {
        Self(units as u128 * ONE)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Decimal product, truncated to the weight precision.
    ///
    /// Both operands are split into whole and fractional parts so the only
    /// overflow is that of the result itself.
    pub fn checked_mul(self, other: Self) -> Option<Self> {
        let (a_int, a_frac) = (self.0 / ONE, self.0 % ONE);
        let (b_int, b_frac) = (other.0 / ONE, other.0 % ONE);
        let whole = a_int.checked_mul(b_int)?.checked_mul(ONE)?;
        let cross = a_int
            .checked_mul(b_frac)?
            .checked_add(a_frac.checked_mul(b_int)?)?;
        // Both fractions are below ONE, so this product fits.
        let frac = a_frac * b_frac / ONE;
        whole.checked_add(cross)?.checked_add(frac).map(Self)
    }

    /// Sum an iterator of weights, failing on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Weight>>(weights: I) -> Result<Self, TypesError> {
        weights
            .into_iter()
            .try_fold(Self::ZERO, |acc, w| acc.checked_add(w))
            .ok_or(TypesError::WeightOverflow)
    }
}

impl FromStr for Weight {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypesError::InvalidWeight(s.to_string());

        let (int_part, frac_part) = match s.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some((int, frac)) => (int, frac),
            None => (s, ""),
        };
        let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty())
            || !digits_only(int_part)
            || !digits_only(frac_part)
            || frac_part.len() > WEIGHT_DECIMALS as usize
        {
            return Err(invalid());
        }

        let int: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid())?
        };
        let frac: u128 = if frac_part.is_empty() {
            0
        } else {
            let scale = 10u128.pow(WEIGHT_DECIMALS - frac_part.len() as u32);
            frac_part.parse::<u128>().map_err(|_| invalid())? * scale
        };

        int.checked_mul(ONE)
            .and_then(|v| v.checked_add(frac))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int = self.0 / ONE;
        let frac = self.0 % ONE;
        if frac == 0 {
            return write!(f, "{int}");
        }
        let frac = format!("{:0width$}", frac, width = WEIGHT_DECIMALS as usize);
        write!(f, "{int}.{}", frac.trim_end_matches('0'))
    }
}

impl TryFrom<String> for Weight {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Weight> for String {
    fn from(weight: Weight) -> Self {
        weight.to_string()
    }
}
