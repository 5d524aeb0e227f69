//! `Result`-returning arithmetic on ledger quantities.
//!
//! Balances move only by addition and subtraction, so that is all
//! [`CheckedArithmetic`] offers. Leaving `u128` is [`AmmError::Overflow`];
//! dropping below zero is an [`AmmError::InvariantViolation`], because every
//! caller checks sufficiency before it subtracts.
//!
//! ```
//! use amm_ledger::domain::Amount;
//! use amm_ledger::math::CheckedArithmetic;
//!
//! let reserve = Amount::new(10).safe_add(&Amount::new(100));
//! assert_eq!(reserve, Ok(Amount::new(110)));
//! ```

use crate::domain::{Amount, Shares};
use crate::error::AmmError;

/// Addition and subtraction that fail with an [`AmmError`] instead of
/// returning `None`.
pub trait CheckedArithmetic: Sized {
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if the sum exceeds `u128`.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// # Errors
    ///
    /// [`AmmError::InvariantViolation`] if `other > self`.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;
}

macro_rules! impl_checked {
    ($ty:ty, $overflow:literal, $negative:literal) => {
        impl CheckedArithmetic for $ty {
            #[inline]
            fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
                self.checked_add(other).ok_or(AmmError::Overflow($overflow))
            }

            #[inline]
            fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
                self.checked_sub(other)
                    .ok_or(AmmError::InvariantViolation($negative))
            }
        }
    };
}

impl_checked!(Amount, "reserve exceeds u128", "reserve would go negative");
impl_checked!(Shares, "share supply exceeds u128", "share balance would go negative");
