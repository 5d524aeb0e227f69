//! Swap fee expressed as an exact fraction.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints, Rounding};
use crate::error::AmmError;
use crate::math::mul_div;

/// Fraction of every swap input retained by the pool (`numerator / denominator`).
///
/// The fee never leaves the pool: it stays in the input-side reserve, which
/// is why the reserve product grows on every swap.  The default is
/// `3 / 1000` (0.30%).
///
/// # Examples
///
/// ```
/// use amm_ledger::domain::{BasisPoints, FeeRate};
///
/// let fee = FeeRate::new(3, 1_000).expect("proper fraction");
/// assert_eq!(fee.complement(), 997);
/// let bps = FeeRate::from_basis_points(BasisPoints::new(30)).expect("below 100%");
/// assert_eq!(bps.complement(), 9_970);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFeeRate", into = "RawFeeRate")]
pub struct FeeRate {
    numerator: u32,
    denominator: u32,
}

impl FeeRate {
    /// 0.30%, the conventional constant-product fee.
    pub const DEFAULT: Self = Self {
        numerator: 3,
        denominator: 1_000,
    };

    /// No fee.  The reserve product is then preserved up to floor rounding.
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// Creates a fee rate after checking it is a proper fraction.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFee`] if `denominator` is zero.
    /// - [`AmmError::InvalidFee`] if `numerator >= denominator` (a 100% fee
    ///   would make every swap output zero).
    pub const fn new(numerator: u32, denominator: u32) -> Result<Self, AmmError> {
        if denominator == 0 {
            return Err(AmmError::InvalidFee("fee denominator must be positive"));
        }
        if numerator >= denominator {
            return Err(AmmError::InvalidFee("fee must be below 100%"));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Builds a fee rate over a `10_000` denominator.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] for 100% or more.
    pub fn from_basis_points(bps: BasisPoints) -> Result<Self, AmmError> {
        Self::new(bps.get(), 10_000)
    }

    /// Fee numerator.
    #[must_use]
    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Fee denominator.
    #[must_use]
    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    /// `denominator - numerator`, the weight of the input that prices the swap.
    #[must_use]
    pub const fn complement(&self) -> u32 {
        self.denominator - self.numerator
    }

    /// Portion of `amount_in` retained by the pool, rounded up.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result does not fit.
    pub fn retained(&self, amount_in: Amount) -> crate::error::Result<Amount> {
        mul_div(
            amount_in.get(),
            u128::from(self.numerator),
            u128::from(self.denominator),
            Rounding::Up,
        )
        .map(Amount::new)
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[derive(Serialize, Deserialize)]
struct RawFeeRate {
    numerator: u32,
    denominator: u32,
}

impl TryFrom<RawFeeRate> for FeeRate {
    type Error = AmmError;

    fn try_from(raw: RawFeeRate) -> Result<Self, Self::Error> {
        Self::new(raw.numerator, raw.denominator)
    }
}

impl From<FeeRate> for RawFeeRate {
    fn from(fee: FeeRate) -> Self {
        Self {
            numerator: fee.numerator,
            denominator: fee.denominator,
        }
    }
}
