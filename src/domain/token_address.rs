//! EVM-style identifiers for tokens and accounts.

use core::{fmt, str::FromStr};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Address identifying a token contract; the key of its pool.
///
/// Wraps a 20-byte [`Address`]. Parsing accepts `0x`-prefixed hex in any
/// case; display uses the checksummed form.
///
/// # Examples
///
/// ```
/// use amm_ledger::domain::TokenAddress;
///
/// let usdc: TokenAddress = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".parse().expect("hex");
/// assert_eq!(usdc, TokenAddress::from_bytes(usdc.as_bytes()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAddress(Address);

impl TokenAddress {
    /// Creates a `TokenAddress` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(Address::new(bytes))
    }

    /// Returns the underlying 20-byte representation.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; 20] {
        self.0.into()
    }

    /// Returns the wrapped [`Address`].
    #[must_use]
    pub const fn address(&self) -> Address {
        self.0
    }
}

impl From<Address> for TokenAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl FromStr for TokenAddress {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Address>()
            .map(Self)
            .map_err(|e| AmmError::InvalidConfiguration(format!("invalid token address {s}: {e}")))
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a liquidity provider, trader, or the whitelist operator.
///
/// Resolving a wallet session to an `AccountId` is the caller's job; the
/// ledger only compares identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Address);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(Address::new(bytes))
    }

    /// Returns the wrapped [`Address`].
    #[must_use]
    pub const fn address(&self) -> Address {
        self.0
    }
}

impl From<Address> for AccountId {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl FromStr for AccountId {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Address>()
            .map(Self)
            .map_err(|e| AmmError::InvalidConfiguration(format!("invalid account {s}: {e}")))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
