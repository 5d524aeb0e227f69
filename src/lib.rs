//! # AMM Ledger
//!
//! A constant-product automated-market-maker ledger.  Every whitelisted
//! token is paired against a single base asset in its own pool; liquidity
//! providers deposit both sides in exchange for proportional pool shares,
//! and traders swap base ↔ token at a price set by `x · y = k` with a fee
//! retained in the pool.
//!
//! The ledger holds all state and enforces all invariants.  Identity
//! resolution, amount formatting and slippage selection belong to the
//! caller, which drives [`PoolManager`](ledger::PoolManager) and renders the
//! events it emits.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `toml-config` | yes | [`LedgerConfig::from_toml_str`](config::LedgerConfig::from_toml_str) |
//!
//! # Quick Start
//!
//! ```rust
//! use amm_ledger::prelude::*;
//!
//! let operator = AccountId::from_bytes([0xaa; 20]);
//! let alice = AccountId::from_bytes([0x01; 20]);
//! let bob = AccountId::from_bytes([0x02; 20]);
//! let usdc = TokenAddress::from_bytes([0x10; 20]);
//!
//! // 1. Configure the ledger: 0.30% fee, USDC whitelisted.
//! let config = LedgerConfig::new(operator)
//!     .with_fee(FeeRate::new(3, 1_000).expect("proper fraction"))
//!     .with_token(Token::new(usdc, Decimals::new(6).expect("valid decimals"), "USDC"));
//! let ledger = PoolManager::new(config).expect("valid config");
//!
//! // 2. Alice funds the pool; the first deposit sets the price.
//! let added = ledger
//!     .add_liquidity(usdc, Amount::new(1_000), Amount::new(10), alice)
//!     .expect("deposit");
//! assert_eq!(added.shares_minted, Shares::new(100));
//!
//! // 3. Bob quotes, applies a 1% tolerance, and swaps 100 base for USDC.
//! let quote = ledger
//!     .quote_swap(Asset::Base, Asset::Token(usdc), Amount::new(100))
//!     .expect("quote");
//! let min_out = SlippageTolerance::new(BasisPoints::new(100))
//!     .and_then(|tol| tol.min_amount_out(quote.amount_out()))
//!     .expect("tolerance");
//! let swap = ledger
//!     .swap(Asset::Base, Asset::Token(usdc), Amount::new(100), min_out, bob)
//!     .expect("swap");
//!
//! assert_eq!(swap.amount_out, Amount::new(908));
//! assert_eq!(
//!     ledger.get_reserves(usdc),
//!     Ok(Reserves::new(Amount::new(92), Amount::new(110)))
//! );
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Caller    │  wallet session, formatting, slippage choice
//! └──────┬───────┘
//!        │ add_liquidity / remove_liquidity / swap / queries
//!        ▼
//! ┌──────────────┐      ┌────────────────┐
//! │ PoolManager  │─────►│ TokenWhitelist │
//! └──────┬───────┘      └────────────────┘
//!        │ one Mutex per pool
//!        ▼
//! ┌──────────────┐      ┌────────────────┐
//! │   PoolBook   │─────►│   SwapEngine   │  pure pricing
//! │ ReserveLedger│      └────────────────┘
//! │ ShareLedger  │
//! │ event log    │──────► EventSinks
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`Token`](domain::Token), events, … |
//! | [`ledger`] | [`PoolManager`](ledger::PoolManager) and its components |
//! | [`config`] | [`LedgerConfig`](config::LedgerConfig) and the initial-share policy |
//! | [`traits`] | [`EventSink`](traits::EventSink) |
//! | [`math`]   | Checked and 256-bit arithmetic |
//! | [`error`]  | [`AmmError`](error::AmmError) |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod prelude;
pub mod traits;
