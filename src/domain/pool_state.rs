//! Read-only views of a pool: reserves, lifecycle status and snapshots.

use core::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::{Amount, Shares, TokenAddress};
use crate::math::product;

/// The two reserve balances of one pool, in smallest units.
///
/// Either both sides are zero (empty pool) or both are positive.
///
/// # Examples
///
/// ```
/// use amm_ledger::domain::{Amount, Reserves, SwapDirection};
///
/// let r = Reserves::new(Amount::new(1_000), Amount::new(10));
/// assert_eq!(r.oriented(SwapDirection::BaseToToken), (Amount::new(10), Amount::new(1_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Reserves {
    token: Amount,
    base: Amount,
}

impl Reserves {
    /// Both sides zero.
    pub const EMPTY: Self = Self {
        token: Amount::ZERO,
        base: Amount::ZERO,
    };

    /// Creates a reserve pair.
    pub const fn new(token: Amount, base: Amount) -> Self {
        Self { token, base }
    }

    /// Token-side reserve.
    pub const fn token(&self) -> Amount {
        self.token
    }

    /// Base-side reserve.
    pub const fn base(&self) -> Amount {
        self.base
    }

    /// Returns `true` when both sides are zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.token.is_zero() && self.base.is_zero()
    }

    /// Returns `true` when exactly one side is zero.
    #[must_use]
    pub const fn is_lopsided(&self) -> bool {
        self.token.is_zero() != self.base.is_zero()
    }

    /// `token * base`, exact.
    #[must_use]
    pub fn product(&self) -> U256 {
        product(self.token, self.base)
    }

    /// Returns `(reserve_in, reserve_out)` for a swap in `direction`.
    pub const fn oriented(&self, direction: SwapDirection) -> (Amount, Amount) {
        match direction {
            SwapDirection::BaseToToken => (self.base, self.token),
            SwapDirection::TokenToBase => (self.token, self.base),
        }
    }
}

impl fmt::Display for Reserves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reserves(token={}, base={})", self.token, self.base)
    }
}

/// Which way a swap moves through a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapDirection {
    /// Base asset in, token out.
    BaseToToken,
    /// Token in, base asset out.
    TokenToBase,
}

/// Lifecycle of a pool.  A pool is never deleted, only emptied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolStatus {
    /// No reserves and no shares outstanding.
    Empty,
    /// Positive reserves on both sides and positive total shares.
    Funded,
}

/// Consistent point-in-time copy of one pool, taken under its lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Pool key.
    pub token: TokenAddress,
    /// Reserve balances.
    pub reserves: Reserves,
    /// Shares outstanding.
    pub total_shares: Shares,
    /// Number of providers with a non-zero position.
    pub providers: usize,
    /// Sequence of the last emitted event, `0` if none.
    pub last_sequence: u64,
}

impl PoolSnapshot {
    /// Derived lifecycle status.
    #[must_use]
    pub const fn status(&self) -> PoolStatus {
        if self.total_shares.is_zero() {
            PoolStatus::Empty
        } else {
            PoolStatus::Funded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_lopsided() {
        assert!(Reserves::EMPTY.is_empty());
        assert!(!Reserves::EMPTY.is_lopsided());
        assert!(Reserves::new(Amount::new(1), Amount::ZERO).is_lopsided());
        assert!(!Reserves::new(Amount::new(1), Amount::new(1)).is_empty());
    }

    #[test]
    fn orientation() {
        let r = Reserves::new(Amount::new(1_000), Amount::new(10));
        assert_eq!(
            r.oriented(SwapDirection::TokenToBase),
            (Amount::new(1_000), Amount::new(10))
        );
    }

    #[test]
    fn product_of_reserves() {
        let r = Reserves::new(Amount::new(92), Amount::new(110));
        assert_eq!(r.product(), U256::from(10_120u32));
    }

    #[test]
    fn snapshot_status_follows_shares() {
        let mut snap = PoolSnapshot {
            token: TokenAddress::from_bytes([1u8; 20]),
            reserves: Reserves::EMPTY,
            total_shares: Shares::ZERO,
            providers: 0,
            last_sequence: 0,
        };
        assert_eq!(snap.status(), PoolStatus::Empty);
        snap.total_shares = Shares::new(100);
        assert_eq!(snap.status(), PoolStatus::Funded);
    }
}
