//! Unified error types for the AMM ledger.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, ensuring a consistent error handling experience for consumers.
//!
//! # Severity
//!
//! Errors fall into two groups:
//!
//! - **Recoverable**: user-facing conditions the calling layer surfaces back
//!   to the end user (adjust the amount, the slippage tolerance, or pick a
//!   supported token).
//! - **Fatal**: [`AmmError::InvariantViolation`] and [`AmmError::Overflow`]
//!   signal a broken internal contract and are unreachable for correct
//!   inputs.  See [`AmmError::is_fatal`].
//!
//! No operation is retried internally and no failure leaves partial state.

use crate::domain::{AccountId, Amount, Shares, TokenAddress};

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Every failure the ledger can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmmError {
    /// The token is not on the whitelist.
    #[error("unsupported token: {0}")]
    UnsupportedToken(TokenAddress),

    /// The swap does not pair the base asset with exactly one token.
    #[error("unsupported route: {0}")]
    UnsupportedRoute(&'static str),

    /// The token is whitelisted but its pool never received liquidity.
    #[error("unknown pool for token {0}")]
    UnknownPool(TokenAddress),

    /// A required input amount is zero, or rounds to zero.
    #[error("zero input: {0}")]
    ZeroInput(&'static str),

    /// Pricing was requested against an empty reserve.
    #[error("zero reserves")]
    ZeroReserves,

    /// A deposit into a funded pool does not match the pool's price ratio.
    #[error("ratio mismatch: token side mints {token_side} shares, base side mints {base_side}")]
    RatioMismatch {
        /// Shares implied by the token-side deposit.
        token_side: Shares,
        /// Shares implied by the base-side deposit.
        base_side: Shares,
    },

    /// A provider tried to burn more shares than they hold.
    #[error("insufficient shares: requested {requested}, available {available}")]
    InsufficientShares {
        /// Shares the caller asked to burn.
        requested: Shares,
        /// Shares the provider currently holds.
        available: Shares,
    },

    /// The realized swap output is below the caller's minimum.
    #[error("slippage exceeded: expected at least {expected_min}, got {actual}")]
    SlippageExceeded {
        /// Caller-supplied minimum output.
        expected_min: Amount,
        /// Output the pool would actually deliver.
        actual: Amount,
    },

    /// An internal ledger invariant would be broken.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    /// An intermediate or final value exceeds the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// The caller is not the whitelist operator.
    #[error("unauthorized caller {0}")]
    Unauthorized(AccountId),

    /// Decimal precision outside `0..=18`.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// Fee rate is not a proper fraction.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// Ledger configuration is malformed or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl AmmError {
    /// Returns `true` for contract breaches that should never happen for
    /// correct inputs ([`InvariantViolation`](Self::InvariantViolation) and
    /// [`Overflow`](Self::Overflow)).
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_) | Self::Overflow(_))
    }

    /// Returns `true` for conditions the caller can fix and retry.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }
}
