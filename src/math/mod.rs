//! Arithmetic utilities for ledger calculations.
//!
//! - [`CheckedArithmetic`] lifts checked `u128` arithmetic on
//!   [`Amount`](crate::domain::Amount) and [`Shares`](crate::domain::Shares)
//!   into `Result`s.
//! - [`mul_div`], [`product`], [`geometric_mean`] and [`isqrt`] evaluate
//!   intermediate products in 256 bits.
//!
//! # Rounding convention
//!
//! **Always round against the user**:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, withdrawal output | [`Rounding::Down`](crate::domain::Rounding::Down) |
//! | Minted shares | [`Rounding::Down`](crate::domain::Rounding::Down) |
//! | Exact-out input, retained fee | [`Rounding::Up`](crate::domain::Rounding::Up) |

mod checked;
mod wide;

pub use checked::CheckedArithmetic;
pub use wide::{geometric_mean, isqrt, mul_div, product};
pub(crate) use wide::narrow;
