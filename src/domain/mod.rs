//! Value types of the ledger domain.
//!
//! Quantities, identities, fees, reserve views and event payloads.  Types
//! with invariants use validated constructors; plain data carriers (events,
//! snapshots) expose public fields.

mod amount;
mod basis_points;
mod decimals;
mod event;
mod fee_rate;
mod pool_state;
mod rounding;
mod shares;
mod swap_quote;
mod token;
mod token_address;

pub use amount::Amount;
pub use basis_points::BasisPoints;
pub use decimals::Decimals;
pub use event::{EventRecord, LiquidityAdded, LiquidityRemoved, PoolEvent, TokenSwap};
pub use fee_rate::FeeRate;
pub use pool_state::{PoolSnapshot, PoolStatus, Reserves, SwapDirection};
pub use rounding::Rounding;
pub use shares::Shares;
pub use swap_quote::{SlippageTolerance, SwapQuote};
pub use token::{Asset, Token};
pub use token_address::{AccountId, TokenAddress};
