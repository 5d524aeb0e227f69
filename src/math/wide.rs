//! 256-bit intermediate arithmetic.
//!
//! Every pricing formula in the ledger multiplies two `u128` quantities
//! before dividing (`amount * reserve`, `shares * reserve`,
//! `reserve * reserve`).  Those products are evaluated as [`U256`] so that
//! 18-decimal tokens with large supplies never overflow spuriously; only a
//! final result that does not fit `u128` is an error.
//!
//! # Examples
//!
//! ```
//! use amm_ledger::domain::Rounding;
//! use amm_ledger::math::mul_div;
//!
//! // u128::MAX * 3 overflows u128, but the quotient fits.
//! assert_eq!(mul_div(u128::MAX, 3, 6, Rounding::Down), Ok(u128::MAX / 2));
//! assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
//! ```

use alloy_primitives::U256;

use crate::domain::{Amount, Rounding};
use crate::error::{AmmError, Result};

/// `a * b / denominator` with a 256-bit intermediate and explicit rounding.
///
/// # Errors
///
/// - [`AmmError::InvariantViolation`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit `u128`.
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    if denominator == 0 {
        return Err(AmmError::InvariantViolation("mul_div by zero"));
    }
    let product = U256::from(a) * U256::from(b);
    let denominator = U256::from(denominator);
    let mut quotient = product / denominator;
    if rounding.is_up() && !(product % denominator).is_zero() {
        quotient += U256::from(1u8);
    }
    narrow(quotient)
}

/// The reserve product `x * y`, exact.
#[must_use]
pub fn product(x: Amount, y: Amount) -> U256 {
    U256::from(x.get()) * U256::from(y.get())
}

/// `floor(sqrt(a * b))`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if the root does not fit `u128`, which
/// cannot happen for `u128` inputs.
pub fn geometric_mean(a: u128, b: u128) -> Result<u128> {
    narrow(isqrt(U256::from(a) * U256::from(b)))
}

/// Integer square root, `floor(sqrt(n))`, by Newton's method.
#[must_use]
pub fn isqrt(n: U256) -> U256 {
    if n.is_zero() {
        return U256::ZERO;
    }
    let two = U256::from(2u8);
    let mut x = n;
    let mut y = n / two + n % two;
    while y < x {
        x = y;
        y = (x + n / x) / two;
    }
    x
}

/// Narrows a 256-bit result back to `u128`.
pub(crate) fn narrow(value: U256) -> Result<u128> {
    u128::try_from(value).map_err(|_| AmmError::Overflow("result exceeds u128"))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_floor_and_ceil() {
        assert_eq!(mul_div(10, 10, 3, Rounding::Down), Ok(33));
        assert_eq!(mul_div(10, 10, 3, Rounding::Up), Ok(34));
        assert_eq!(mul_div(9, 1, 3, Rounding::Up), Ok(3));
    }

    #[test]
    fn mul_div_survives_wide_intermediate() {
        let Ok(r) = mul_div(u128::MAX, u128::MAX, u128::MAX, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(r, u128::MAX);
    }

    #[test]
    fn mul_div_overflowing_quotient() {
        let Err(err) = mul_div(u128::MAX, 2, 1, Rounding::Down) else {
            panic!("expected Err");
        };
        assert!(matches!(err, AmmError::Overflow(_)));
    }

    #[test]
    fn mul_div_zero_denominator() {
        let Err(err) = mul_div(1, 1, 0, Rounding::Down) else {
            panic!("expected Err");
        };
        assert!(err.is_fatal());
    }

    #[test]
    fn swap_scenario_numbers() {
        // 100 base in at 3/1000 against (10 base, 1000 token).
        let with_fee = 100 * 997;
        assert_eq!(
            mul_div(with_fee, 1_000, 10 * 1_000 + with_fee, Rounding::Down),
            Ok(908)
        );
    }

    #[test]
    fn isqrt_exact_and_floor() {
        assert_eq!(isqrt(U256::ZERO), U256::ZERO);
        assert_eq!(isqrt(U256::from(1u8)), U256::from(1u8));
        assert_eq!(isqrt(U256::from(10_000u32)), U256::from(100u32));
        assert_eq!(isqrt(U256::from(99u32)), U256::from(9u32));
        assert_eq!(isqrt(U256::MAX), U256::from(u128::MAX));
    }

    #[test]
    fn geometric_mean_of_large_reserves() {
        assert_eq!(geometric_mean(1_000, 10), Ok(100));
        assert_eq!(geometric_mean(u128::MAX, u128::MAX), Ok(u128::MAX));
        assert_eq!(geometric_mean(0, 5), Ok(0));
    }

    #[test]
    fn product_is_exact() {
        let p = product(Amount::MAX, Amount::new(2));
        assert_eq!(p, U256::from(u128::MAX) * U256::from(2u8));
    }
}
