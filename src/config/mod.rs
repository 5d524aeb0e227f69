//! Ledger configuration.
//!
//! [`LedgerConfig`] bundles the operator identity, fee rate, initial-share
//! policy, deposit ratio tolerance, base-asset metadata and the seed
//! whitelist.  It is validated on load and immutable afterwards.

mod initial_shares;
mod ledger_config;

pub use initial_shares::InitialShares;
pub use ledger_config::{BaseAsset, LedgerConfig};

use serde::{Deserialize, Deserializer};

use crate::domain::Shares;

/// Reads a share count written as a plain integer.
///
/// TOML integers are 64-bit, so configuration share counts go through `u64`
/// rather than the `u128` representation used on the event wire.
pub(crate) fn shares_from_u64<'de, D>(deserializer: D) -> Result<Shares, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(|v| Shares::new(u128::from(v)))
}
