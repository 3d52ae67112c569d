//! Token amounts.

use std::fmt::Display;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// An amount of the native staking token, in minor units.
///
/// Arithmetic is checked; amounts never wrap silently.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    /// The zero amount.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// An amount from minor units.
    pub const fn from_minor_units(raw: u128) -> Self {
        Self(raw)
    }

    /// The raw minor-unit value.
    pub const fn minor_units(&self) -> u128 {
        self.0
    }

    /// Checked addition.
    pub fn checked_add(&self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction.
    pub fn checked_sub(&self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(raw: u64) -> Self {
        Self(u128::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_arithmetic() {
        let max = Amount::from_minor_units(u128::MAX);
        assert_eq!(max.checked_add(Amount::from(1_u64)), None);
        assert_eq!(
            Amount::zero().checked_sub(Amount::from(1_u64)),
            None
        );
        assert_eq!(
            Amount::from(2_u64).checked_add(Amount::from(3_u64)),
            Some(Amount::from(5_u64))
        );
    }
}
