//! One pool's complete state and its staged state transitions.
//!
//! Each transition computes every new value first, validates it, and only
//! then writes.  The caller holds the pool's lock for the whole sequence.

use crate::config::InitialShares;
use crate::domain::{
    AccountId, Amount, Asset, EventRecord, LiquidityAdded, LiquidityRemoved, PoolEvent,
    PoolSnapshot, Rounding, Shares, SwapDirection, SwapQuote, TokenAddress, TokenSwap,
};
use crate::error::{AmmError, Result};
use crate::math::mul_div;

use super::reserves::{Delta, DeltaKind, ReserveLedger};
use super::shares::ShareLedger;
use super::swap_engine::SwapEngine;

/// Reserves, shares and event log of one pool.
#[derive(Debug, Default)]
pub(crate) struct PoolBook {
    reserves: ReserveLedger,
    shares: ShareLedger,
    log: Vec<EventRecord>,
}

impl PoolBook {
    /// A pool is known once it has ever accepted a deposit.
    pub(crate) fn is_known(&self) -> bool {
        !self.log.is_empty()
    }

    pub(crate) const fn reserves(&self) -> &ReserveLedger {
        &self.reserves
    }

    pub(crate) const fn shares(&self) -> &ShareLedger {
        &self.shares
    }

    pub(crate) fn events(&self) -> &[EventRecord] {
        &self.log
    }

    /// Records with `sequence > after`.
    pub(crate) fn events_since(&self, after: u64) -> &[EventRecord] {
        let start = usize::try_from(after).unwrap_or(usize::MAX).min(self.log.len());
        &self.log[start..]
    }

    pub(crate) fn snapshot(&self, token: TokenAddress) -> PoolSnapshot {
        PoolSnapshot {
            token,
            reserves: self.reserves.get(),
            total_shares: self.shares.total_shares(),
            providers: self.shares.provider_count(),
            last_sequence: self.last_sequence(),
        }
    }

    fn last_sequence(&self) -> u64 {
        self.log.last().map_or(0, |r| r.sequence)
    }

    fn append(&mut self, token: TokenAddress, event: PoolEvent) -> EventRecord {
        let record = EventRecord {
            sequence: self.last_sequence() + 1,
            token,
            event,
        };
        self.log.push(record);
        record
    }

    /// Shares a deposit would mint, without touching state.
    pub(crate) fn shares_for_deposit(
        &self,
        token_amount: Amount,
        base_amount: Amount,
        policy: InitialShares,
        tolerance: Shares,
    ) -> Result<Shares> {
        let reserves = self.reserves.get();
        let total = self.shares.total_shares();

        if total.is_zero() {
            if !reserves.is_empty() {
                return Err(AmmError::InvariantViolation(
                    "reserves present without shares",
                ));
            }
            return policy.mint_for(token_amount, base_amount);
        }
        if reserves.token().is_zero() || reserves.base().is_zero() {
            return Err(AmmError::InvariantViolation(
                "shares outstanding against empty reserves",
            ));
        }

        let token_side = Shares::new(mul_div(
            total.get(),
            token_amount.get(),
            reserves.token().get(),
            Rounding::Down,
        )?);
        let base_side = Shares::new(mul_div(
            total.get(),
            base_amount.get(),
            reserves.base().get(),
            Rounding::Down,
        )?);
        if token_side.get().abs_diff(base_side.get()) > tolerance.get() {
            return Err(AmmError::RatioMismatch {
                token_side,
                base_side,
            });
        }
        let minted = token_side.min(base_side);
        if minted.is_zero() {
            return Err(AmmError::ZeroInput("deposit mints zero shares"));
        }
        Ok(minted)
    }

    pub(crate) fn deposit(
        &mut self,
        token: TokenAddress,
        provider: AccountId,
        token_amount: Amount,
        base_amount: Amount,
        policy: InitialShares,
        tolerance: Shares,
    ) -> Result<(EventRecord, LiquidityAdded)> {
        let minted = self.shares_for_deposit(token_amount, base_amount, policy, tolerance)?;
        let staged = self.reserves.with_delta(
            Delta::Increase(token_amount),
            Delta::Increase(base_amount),
            DeltaKind::Liquidity,
        )?;

        let _ = self.shares.mint(provider, minted)?;
        self.reserves.commit(staged);

        let event = LiquidityAdded {
            provider,
            token,
            token_amount,
            base_amount,
            shares_minted: minted,
        };
        Ok((self.append(token, event.into()), event))
    }

    /// Amounts paid out for burning `shares`, without touching state.
    ///
    /// Burning every outstanding share pays out the full reserves.
    pub(crate) fn payout_for(&self, shares: Shares) -> Result<(Amount, Amount)> {
        let reserves = self.reserves.get();
        let total = self.shares.total_shares();
        if shares == total {
            return Ok((reserves.token(), reserves.base()));
        }
        let token_out = mul_div(
            reserves.token().get(),
            shares.get(),
            total.get(),
            Rounding::Down,
        )?;
        let base_out = mul_div(
            reserves.base().get(),
            shares.get(),
            total.get(),
            Rounding::Down,
        )?;
        Ok((Amount::new(token_out), Amount::new(base_out)))
    }

    pub(crate) fn withdraw(
        &mut self,
        token: TokenAddress,
        provider: AccountId,
        shares: Shares,
    ) -> Result<(EventRecord, LiquidityRemoved)> {
        self.shares.can_burn(provider, shares)?;
        let (token_out, base_out) = self.payout_for(shares)?;
        if token_out.is_zero() && base_out.is_zero() {
            return Err(AmmError::ZeroInput("withdrawal pays out nothing"));
        }
        let staged = self.reserves.with_delta(
            Delta::Decrease(token_out),
            Delta::Decrease(base_out),
            DeltaKind::Liquidity,
        )?;

        let _ = self.shares.burn(provider, shares)?;
        self.reserves.commit(staged);

        let event = LiquidityRemoved {
            provider,
            token,
            token_amount: token_out,
            base_amount: base_out,
            shares_burned: shares,
        };
        Ok((self.append(token, event.into()), event))
    }

    /// Prices a swap against the live reserves.
    pub(crate) fn quote(
        &self,
        engine: &SwapEngine,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<SwapQuote> {
        let (reserve_in, reserve_out) = self.reserves.get().oriented(direction);
        engine.quote(amount_in, reserve_in, reserve_out)
    }

    /// Prices the minimal input for `amount_out` against the live reserves.
    pub(crate) fn quote_exact_out(
        &self,
        engine: &SwapEngine,
        direction: SwapDirection,
        amount_out: Amount,
    ) -> Result<SwapQuote> {
        let (reserve_in, reserve_out) = self.reserves.get().oriented(direction);
        engine.quote_exact_out(amount_out, reserve_in, reserve_out)
    }

    pub(crate) fn swap(
        &mut self,
        engine: &SwapEngine,
        token: TokenAddress,
        direction: SwapDirection,
        trader: AccountId,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<(EventRecord, TokenSwap)> {
        let quote = self.quote(engine, direction, amount_in)?;
        let amount_out = quote.amount_out();
        if amount_out.is_zero() {
            return Err(AmmError::ZeroInput("swap output rounds to zero"));
        }
        if amount_out < min_amount_out {
            return Err(AmmError::SlippageExceeded {
                expected_min: min_amount_out,
                actual: amount_out,
            });
        }

        let (token_delta, base_delta, token_in, token_out) = match direction {
            SwapDirection::BaseToToken => (
                Delta::Decrease(amount_out),
                Delta::Increase(amount_in),
                Asset::Base,
                Asset::Token(token),
            ),
            SwapDirection::TokenToBase => (
                Delta::Increase(amount_in),
                Delta::Decrease(amount_out),
                Asset::Token(token),
                Asset::Base,
            ),
        };
        self.reserves
            .apply_delta(token_delta, base_delta, DeltaKind::Swap)?;

        let event = TokenSwap {
            trader,
            token_in,
            token_out,
            amount_in,
            amount_out,
        };
        Ok((self.append(token, event.into()), event))
    }
}
