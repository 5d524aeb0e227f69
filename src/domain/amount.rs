//! Raw token or base-asset amount with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An amount in the smallest unit of a token or of the base asset.
///
/// `Amount` never interprets decimals; formatting to human-readable strings
/// is the presentation layer's job, using the [`Decimals`](super::Decimals)
/// declared by the whitelisted [`Token`](super::Token).
///
/// Reserves only ever move by addition and subtraction; products and
/// quotients are computed in 256 bits by [`crate::math`] and narrowed back.
///
/// ```
/// use amm_ledger::domain::Amount;
///
/// let reserve = Amount::new(1_000);
/// assert_eq!(reserve.checked_sub(&Amount::new(908)), Some(Amount::new(92)));
/// assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
