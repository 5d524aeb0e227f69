//! The stateful ledger.
//!
//! | Component | Role |
//! |-----------|------|
//! | [`TokenWhitelist`] | Tokens eligible for pooling; operator-only, append-only |
//! | [`ReserveLedger`] | One pool's reserve pair and the constant-product guard |
//! | [`ShareLedger`] | One pool's provider balances and total supply |
//! | [`SwapEngine`] | Stateless pricing over a reserve snapshot |
//! | [`PoolManager`] | Atomic deposit / withdraw / swap across all pools |
//!
//! Only [`PoolManager`] is meant to mutate live pools; the other components
//! are public so they can be used and tested on their own.

mod manager;
mod pool_book;
mod reserves;
mod shares;
mod swap_engine;
mod whitelist;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use manager::PoolManager;
pub use reserves::{Delta, DeltaKind, ReserveLedger};
pub use shares::ShareLedger;
pub use swap_engine::SwapEngine;
pub use whitelist::TokenWhitelist;
