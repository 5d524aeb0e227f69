//! Per-pool reserve balances and the constant-product guard.

use crate::domain::{Amount, Reserves};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

/// A signed change to one reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delta {
    /// Add to the reserve.
    Increase(Amount),
    /// Subtract from the reserve.
    Decrease(Amount),
}

impl Delta {
    /// No change.
    pub const NONE: Self = Self::Increase(Amount::ZERO);

    fn apply(self, reserve: Amount) -> Result<Amount> {
        match self {
            Self::Increase(amount) => reserve.safe_add(&amount),
            Self::Decrease(amount) => reserve
                .checked_sub(&amount)
                .ok_or(AmmError::InvariantViolation("reserve would go negative")),
        }
    }
}

/// Why reserves are changing.
///
/// Swaps must never shrink the reserve product; liquidity changes scale it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaKind {
    /// Deposit or withdrawal.
    Liquidity,
    /// Trade against the pool.
    Swap,
}

/// Reserve balances of one pool.
///
/// Every state this ledger can hold satisfies "both sides zero or both
/// positive".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReserveLedger {
    reserves: Reserves,
}

impl ReserveLedger {
    /// Empty reserves.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reserves: Reserves::EMPTY,
        }
    }

    /// Current balances.
    pub const fn get(&self) -> Reserves {
        self.reserves
    }

    /// Computes the post-state of applying both deltas without mutating.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvariantViolation`] if either side would go negative,
    ///   if exactly one side would be zero, or (for [`DeltaKind::Swap`]) if
    ///   the reserve product would decrease.
    /// - [`AmmError::Overflow`] if either side would exceed `u128`.
    pub fn with_delta(&self, token: Delta, base: Delta, kind: DeltaKind) -> Result<Reserves> {
        let next = Reserves::new(
            token.apply(self.reserves.token())?,
            base.apply(self.reserves.base())?,
        );
        if next.is_lopsided() {
            return Err(AmmError::InvariantViolation(
                "reserves must be both zero or both positive",
            ));
        }
        if kind == DeltaKind::Swap && next.product() < self.reserves.product() {
            return Err(AmmError::InvariantViolation("swap decreased reserve product"));
        }
        Ok(next)
    }

    /// Applies both deltas atomically and returns the new balances.
    ///
    /// # Errors
    ///
    /// Same as [`with_delta`](Self::with_delta); on error nothing changes.
    pub fn apply_delta(&mut self, token: Delta, base: Delta, kind: DeltaKind) -> Result<Reserves> {
        let next = self.with_delta(token, base, kind)?;
        self.reserves = next;
        Ok(next)
    }

    /// Installs a post-state previously produced by
    /// [`with_delta`](Self::with_delta) on this same ledger.
    pub(crate) const fn commit(&mut self, staged: Reserves) {
        self.reserves = staged;
    }
}
