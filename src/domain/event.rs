//! Events emitted by committed pool operations.
//!
//! Every successful deposit, withdrawal and swap produces exactly one
//! [`PoolEvent`], wrapped in an [`EventRecord`] that carries the pool key and
//! a per-pool sequence number.  Sequences start at `1` and are gap-free
//! within a pool.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{AccountId, Amount, Asset, Shares, TokenAddress};

/// A provider deposited into a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityAdded {
    /// Depositing account.
    pub provider: AccountId,
    /// Pool key.
    pub token: TokenAddress,
    /// Token units deposited.
    pub token_amount: Amount,
    /// Base units deposited.
    pub base_amount: Amount,
    /// Shares credited to the provider.
    pub shares_minted: Shares,
}

/// A provider withdrew from a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityRemoved {
    /// Withdrawing account.
    pub provider: AccountId,
    /// Pool key.
    pub token: TokenAddress,
    /// Token units paid out.
    pub token_amount: Amount,
    /// Base units paid out.
    pub base_amount: Amount,
    /// Shares debited from the provider.
    pub shares_burned: Shares,
}

/// A trader swapped through a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenSwap {
    /// Trading account.
    pub trader: AccountId,
    /// Asset paid into the pool.
    pub token_in: Asset,
    /// Asset paid out of the pool.
    pub token_out: Asset,
    /// Units paid in.
    pub amount_in: Amount,
    /// Units paid out.
    pub amount_out: Amount,
}

/// The event payload of a committed operation.
///
/// Externally tagged on the wire (`{"token_swap": {...}}`) so amounts above
/// `u64::MAX` deserialize straight from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolEvent {
    /// See [`LiquidityAdded`].
    LiquidityAdded(LiquidityAdded),
    /// See [`LiquidityRemoved`].
    LiquidityRemoved(LiquidityRemoved),
    /// See [`TokenSwap`].
    TokenSwap(TokenSwap),
}

impl PoolEvent {
    /// Short name of the event kind, used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LiquidityAdded(_) => "liquidity_added",
            Self::LiquidityRemoved(_) => "liquidity_removed",
            Self::TokenSwap(_) => "token_swap",
        }
    }
}

impl From<LiquidityAdded> for PoolEvent {
    fn from(event: LiquidityAdded) -> Self {
        Self::LiquidityAdded(event)
    }
}

impl From<LiquidityRemoved> for PoolEvent {
    fn from(event: LiquidityRemoved) -> Self {
        Self::LiquidityRemoved(event)
    }
}

impl From<TokenSwap> for PoolEvent {
    fn from(event: TokenSwap) -> Self {
        Self::TokenSwap(event)
    }
}

/// A [`PoolEvent`] positioned in its pool's append-only log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the pool's log, starting at `1`.
    pub sequence: u64,
    /// Pool key.
    pub token: TokenAddress,
    /// Payload.
    pub event: PoolEvent,
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} {}", self.sequence, self.token, self.event.kind())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn swap_record() -> EventRecord {
        let token = TokenAddress::from_bytes([9u8; 20]);
        EventRecord {
            sequence: 2,
            token,
            event: TokenSwap {
                trader: AccountId::from_bytes([1u8; 20]),
                token_in: Asset::Base,
                token_out: Asset::Token(token),
                amount_in: Amount::new(100),
                amount_out: Amount::new(908),
            }
            .into(),
        }
    }

    #[test]
    fn kind_names() {
        assert_eq!(swap_record().event.kind(), "token_swap");
    }

    #[test]
    fn json_is_tagged() {
        let Ok(json) = serde_json::to_value(swap_record()) else {
            panic!("serialize");
        };
        assert_eq!(json["event"]["token_swap"]["amount_out"], 908);
        assert_eq!(json["sequence"], 2);
    }

    #[test]
    fn json_round_trip() {
        let record = swap_record();
        let Ok(json) = serde_json::to_string(&record) else {
            panic!("serialize");
        };
        let Ok(back) = serde_json::from_str::<EventRecord>(&json) else {
            panic!("deserialize");
        };
        assert_eq!(back, record);
    }

    #[test]
    fn json_round_trip_above_u64() {
        // 200 000 and 100 whole units at 18 decimals
        let token = TokenAddress::from_bytes([9u8; 20]);
        let record = EventRecord {
            sequence: 1,
            token,
            event: LiquidityAdded {
                provider: AccountId::from_bytes([1u8; 20]),
                token,
                token_amount: Amount::new(200_000 * 10u128.pow(18)),
                base_amount: Amount::new(100 * 10u128.pow(18)),
                shares_minted: Shares::new(u128::from(u64::MAX) + 1),
            }
            .into(),
        };
        let Ok(json) = serde_json::to_string(&[record]) else {
            panic!("serialize");
        };
        assert!(json.contains("200000000000000000000000"));
        let Ok(back) = serde_json::from_str::<Vec<EventRecord>>(&json) else {
            panic!("deserialize");
        };
        assert_eq!(back, [record]);
    }
}
