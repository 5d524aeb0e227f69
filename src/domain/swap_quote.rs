//! Swap quotes and caller-side slippage tolerance.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints, Rounding};
use crate::error::AmmError;

/// The priced outcome of a swap against a reserve snapshot.
///
/// `fee` is the part of `amount_in` retained by the pool. It is
/// informational: the fee is already reflected in `amount_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapQuote {
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapQuote {
    /// Creates a new quote.
    pub const fn new(amount_in: Amount, amount_out: Amount, fee: Amount) -> Self {
        Self {
            amount_in,
            amount_out,
            fee,
        }
    }

    /// Returns the input amount.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output amount.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the fee retained by the pool.
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for SwapQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapQuote(in={}, out={}, fee={})",
            self.amount_in, self.amount_out, self.fee
        )
    }
}

/// A client-chosen tolerance used to derive `min_amount_out` from a quote.
///
/// The ledger never applies a tolerance on its own; callers turn a fresh
/// quote into the `min_amount_out` they pass to a swap.
///
/// # Examples
///
/// ```
/// use amm_ledger::domain::{Amount, BasisPoints, SlippageTolerance};
///
/// let half_percent = SlippageTolerance::new(BasisPoints::new(50)).expect("valid");
/// let min_out = half_percent.min_amount_out(Amount::new(10_000)).expect("fits");
/// assert_eq!(min_out, Amount::new(9_950));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SlippageTolerance(BasisPoints);

impl SlippageTolerance {
    /// Creates a tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] above 100%.
    pub fn new(bps: BasisPoints) -> Result<Self, AmmError> {
        if !bps.is_valid_percent() {
            return Err(AmmError::InvalidConfiguration(format!(
                "slippage tolerance {bps} exceeds 100%"
            )));
        }
        Ok(Self(bps))
    }

    /// Returns the tolerance in basis points.
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// `floor(quoted * (10_000 - bps) / 10_000)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result does not fit.
    pub fn min_amount_out(&self, quoted: Amount) -> Result<Amount, AmmError> {
        let keep = self
            .0
            .complement()
            .ok_or(AmmError::InvariantViolation("slippage tolerance above 100%"))?;
        keep.scale(quoted, Rounding::Down)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn quote_accessors() {
        let q = SwapQuote::new(Amount::new(100), Amount::new(908), Amount::new(1));
        assert_eq!(q.amount_in(), Amount::new(100));
        assert_eq!(q.amount_out(), Amount::new(908));
        assert_eq!(q.fee(), Amount::new(1));
        assert_eq!(q.to_string(), "SwapQuote(in=100, out=908, fee=1)");
    }

    #[test]
    fn zero_tolerance_keeps_quote() {
        let Ok(tol) = SlippageTolerance::new(BasisPoints::ZERO) else {
            panic!("valid tolerance");
        };
        let Ok(min) = tol.min_amount_out(Amount::new(12_345)) else {
            panic!("expected Ok");
        };
        assert_eq!(min, Amount::new(12_345));
    }

    #[test]
    fn full_tolerance_accepts_anything() {
        let Ok(tol) = SlippageTolerance::new(BasisPoints::MAX_PERCENT) else {
            panic!("valid tolerance");
        };
        let Ok(min) = tol.min_amount_out(Amount::new(12_345)) else {
            panic!("expected Ok");
        };
        assert_eq!(min, Amount::ZERO);
    }

    #[test]
    fn tolerance_rounds_down() {
        let Ok(tol) = SlippageTolerance::new(BasisPoints::new(100)) else {
            panic!("valid tolerance");
        };
        // 999 * 0.99 = 989.01
        let Ok(min) = tol.min_amount_out(Amount::new(999)) else {
            panic!("expected Ok");
        };
        assert_eq!(min, Amount::new(989));
    }

    #[test]
    fn tolerance_above_hundred_percent_rejected() {
        assert!(SlippageTolerance::new(BasisPoints::new(10_001)).is_err());
    }
}
