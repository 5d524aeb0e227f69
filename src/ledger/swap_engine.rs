//! Stateless constant-product pricing.
//!
//! # Formula
//!
//! With fee `N / D`:
//!
//! ```text
//! amount_in_with_fee = amount_in * (D - N)
//! amount_out = floor(amount_in_with_fee * reserve_out
//!                    / (reserve_in * D + amount_in_with_fee))
//! ```
//!
//! The fee stays in the input reserve, so the product of the post-swap
//! reserves is never smaller than before.  All intermediates are 256-bit.

use alloy_primitives::U256;

use crate::domain::{Amount, FeeRate, SwapQuote};
use crate::error::{AmmError, Result};
use crate::math::narrow;

/// Prices swaps against a reserve snapshot.  Never mutates state.
///
/// # Examples
///
/// ```
/// use amm_ledger::domain::{Amount, FeeRate};
/// use amm_ledger::ledger::SwapEngine;
///
/// let engine = SwapEngine::new(FeeRate::DEFAULT);
/// // 100 base in against 10 base / 1000 token.
/// let quote = engine
///     .quote(Amount::new(100), Amount::new(10), Amount::new(1_000))
///     .expect("priced");
/// assert_eq!(quote.amount_out(), Amount::new(908));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwapEngine {
    fee: FeeRate,
}

impl SwapEngine {
    /// Creates an engine charging `fee`.
    #[must_use]
    pub const fn new(fee: FeeRate) -> Self {
        Self { fee }
    }

    /// The fee this engine charges.
    #[must_use]
    pub const fn fee(&self) -> FeeRate {
        self.fee
    }

    /// Output for an exact input.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroInput`] if `amount_in` is zero.
    /// - [`AmmError::ZeroReserves`] if either reserve is zero.
    /// - [`AmmError::InvariantViolation`] if the output would drain the
    ///   output reserve.
    /// - [`AmmError::Overflow`] if an intermediate exceeds 256 bits.
    pub fn amount_out(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount> {
        if amount_in.is_zero() {
            return Err(AmmError::ZeroInput("amount in is zero"));
        }
        check_reserves(reserve_in, reserve_out)?;

        let with_fee = U256::from(amount_in.get()) * U256::from(self.fee.complement());
        let numerator = with_fee
            .checked_mul(U256::from(reserve_out.get()))
            .ok_or(AmmError::Overflow("swap numerator exceeds 256 bits"))?;
        let denominator =
            U256::from(reserve_in.get()) * U256::from(self.fee.denominator()) + with_fee;
        let out = Amount::new(narrow(numerator / denominator)?);

        if out >= reserve_out {
            return Err(AmmError::InvariantViolation("swap output drains reserve"));
        }
        Ok(out)
    }

    /// Full quote for an exact input, including the retained fee.
    ///
    /// # Errors
    ///
    /// Same as [`amount_out`](Self::amount_out).
    pub fn quote(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<SwapQuote> {
        let out = self.amount_out(amount_in, reserve_in, reserve_out)?;
        Ok(SwapQuote::new(amount_in, out, self.fee.retained(amount_in)?))
    }

    /// Minimal input that yields at least `amount_out`.
    ///
    /// ```text
    /// amount_in = ceil(reserve_in * amount_out * D
    ///                  / ((reserve_out - amount_out) * (D - N)))
    /// ```
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroInput`] if `amount_out` is zero.
    /// - [`AmmError::ZeroReserves`] if either reserve is zero.
    /// - [`AmmError::InvariantViolation`] if `amount_out >= reserve_out`.
    /// - [`AmmError::Overflow`] if the required input exceeds `u128`.
    pub fn quote_exact_out(
        &self,
        amount_out: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<SwapQuote> {
        if amount_out.is_zero() {
            return Err(AmmError::ZeroInput("amount out is zero"));
        }
        check_reserves(reserve_in, reserve_out)?;
        if amount_out >= reserve_out {
            return Err(AmmError::InvariantViolation("requested output drains reserve"));
        }

        let numerator = (U256::from(reserve_in.get()) * U256::from(amount_out.get()))
            .checked_mul(U256::from(self.fee.denominator()))
            .ok_or(AmmError::Overflow("exact-out numerator exceeds 256 bits"))?;
        let denominator = U256::from(reserve_out.get() - amount_out.get())
            * U256::from(self.fee.complement());
        let mut amount_in = numerator / denominator;
        if !(numerator % denominator).is_zero() {
            amount_in += U256::from(1u8);
        }
        let amount_in = Amount::new(narrow(amount_in)?);
        Ok(SwapQuote::new(
            amount_in,
            amount_out,
            self.fee.retained(amount_in)?,
        ))
    }
}

const fn check_reserves(reserve_in: Amount, reserve_out: Amount) -> Result<()> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::ZeroReserves);
    }
    Ok(())
}
