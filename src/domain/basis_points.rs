//! Percentages in basis points.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::Result;
use crate::math::mul_div;

/// Basis points in one whole (100%).
pub(crate) const BPS_DENOMINATOR: u128 = 10_000;

/// A percentage in hundredths of a percent: `30bp` is the usual 0.30% swap
/// fee, `50bp` a typical slippage tolerance.
///
/// ```
/// use amm_ledger::domain::BasisPoints;
///
/// assert_eq!(BasisPoints::new(50).to_string(), "50bp");
/// assert!(!BasisPoints::new(10_001).is_valid_percent());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR as u32);

    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// `true` within `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 as u128 <= BPS_DENOMINATOR
    }

    /// The remaining share of a whole, `10_000 - self`, or `None` above 100%.
    #[must_use]
    pub const fn complement(&self) -> Option<Self> {
        match (BPS_DENOMINATOR as u32).checked_sub(self.0) {
            Some(rest) => Some(Self(rest)),
            None => None,
        }
    }

    /// `amount * self / 10_000`, evaluated in 256 bits.
    pub(crate) fn scale(&self, amount: Amount, rounding: Rounding) -> Result<Amount> {
        mul_div(amount.get(), u128::from(self.0), BPS_DENOMINATOR, rounding).map(Amount::new)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn complement_of_slippage() {
        assert_eq!(BasisPoints::new(50).complement(), Some(BasisPoints::new(9_950)));
        assert_eq!(BasisPoints::MAX_PERCENT.complement(), Some(BasisPoints::ZERO));
        assert_eq!(BasisPoints::new(10_001).complement(), None);
    }

    #[test]
    fn fee_of_a_swap() {
        // 0.30% of 100 base, charged to the trader
        let Ok(up) = BasisPoints::new(30).scale(Amount::new(100), Rounding::Up) else {
            panic!("expected Ok");
        };
        let Ok(down) = BasisPoints::new(30).scale(Amount::new(100), Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!((up, down), (Amount::new(1), Amount::ZERO));
    }

    #[test]
    fn scaling_max_amount_stays_in_range() {
        let Ok(half) = BasisPoints::new(5_000).scale(Amount::MAX, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(half, Amount::new(u128::MAX / 2));
    }
}
