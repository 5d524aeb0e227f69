//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use amm_ledger::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, Amount, Asset, BasisPoints, Decimals, EventRecord, FeeRate, LiquidityAdded,
    LiquidityRemoved, PoolEvent, PoolSnapshot, PoolStatus, Reserves, Rounding, Shares,
    SlippageTolerance, SwapQuote, Token, TokenAddress, TokenSwap,
};

pub use crate::config::{BaseAsset, InitialShares, LedgerConfig};

pub use crate::ledger::{PoolManager, SwapEngine};

pub use crate::math::CheckedArithmetic;

pub use crate::traits::{EventSink, SubscriptionId};

pub use crate::error::{AmmError, Result};
