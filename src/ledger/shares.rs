//! Per-pool share accounting.

use ahash::AHashMap;

use crate::domain::{AccountId, Shares};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

/// Provider balances and total supply of one pool's shares.
///
/// `total_shares` always equals the sum of all balances.  Providers whose
/// balance returns to zero are removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareLedger {
    balances: AHashMap<AccountId, Shares>,
    total: Shares,
}

impl ShareLedger {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares held by `provider`.
    pub fn balance_of(&self, provider: AccountId) -> Shares {
        self.balances.get(&provider).copied().unwrap_or_default()
    }

    /// Shares outstanding.
    pub const fn total_shares(&self) -> Shares {
        self.total
    }

    /// Number of providers with a non-zero balance.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.balances.len()
    }

    /// Non-zero positions ordered by account.
    #[must_use]
    pub fn providers(&self) -> Vec<(AccountId, Shares)> {
        let mut positions: Vec<_> = self.balances.iter().map(|(a, s)| (*a, *s)).collect();
        positions.sort_unstable_by_key(|(account, _)| *account);
        positions
    }

    /// Credits `amount` to `provider` and returns the new balance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroInput`] if `amount` is zero.
    /// - [`AmmError::Overflow`] if the balance or the total would exceed
    ///   `u128`.  Nothing changes on error.
    pub fn mint(&mut self, provider: AccountId, amount: Shares) -> Result<Shares> {
        if amount.is_zero() {
            return Err(AmmError::ZeroInput("cannot mint zero shares"));
        }
        let total = self.total.safe_add(&amount)?;
        let balance = self.balance_of(provider).safe_add(&amount)?;
        self.total = total;
        self.balances.insert(provider, balance);
        Ok(balance)
    }

    /// Checks that `provider` can burn `amount`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroInput`] if `amount` is zero.
    /// - [`AmmError::InsufficientShares`] if `amount` exceeds the balance.
    pub fn can_burn(&self, provider: AccountId, amount: Shares) -> Result<()> {
        if amount.is_zero() {
            return Err(AmmError::ZeroInput("cannot burn zero shares"));
        }
        let available = self.balance_of(provider);
        if amount > available {
            return Err(AmmError::InsufficientShares {
                requested: amount,
                available,
            });
        }
        Ok(())
    }

    /// Debits `amount` from `provider` and returns the remaining balance.
    ///
    /// # Errors
    ///
    /// Same as [`can_burn`](Self::can_burn).  Nothing changes on error.
    pub fn burn(&mut self, provider: AccountId, amount: Shares) -> Result<Shares> {
        self.can_burn(provider, amount)?;
        let remaining = self.balance_of(provider).safe_sub(&amount)?;
        let total = self.total.safe_sub(&amount)?;
        self.total = total;
        if remaining.is_zero() {
            self.balances.remove(&provider);
        } else {
            self.balances.insert(provider, remaining);
        }
        Ok(remaining)
    }
}
