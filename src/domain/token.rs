//! Token identity and the base-asset / token choice used by swaps.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Decimals, TokenAddress};
use crate::error::AmmError;

/// A token eligible for pooling against the base asset.
///
/// Identity is the [`TokenAddress`]; `decimals` and `symbol` are metadata
/// the presentation layer uses for formatting. A token is immutable once
/// whitelisted.
///
/// # Examples
///
/// ```
/// use amm_ledger::domain::{Decimals, Token, TokenAddress};
///
/// let addr = TokenAddress::from_bytes([1u8; 20]);
/// let tok  = Token::new(addr, Decimals::new(6).expect("valid"), "USDC");
///
/// assert_eq!(tok.address(), addr);
/// assert_eq!(tok.symbol(), "USDC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    address: TokenAddress,
    decimals: Decimals,
    symbol: String,
}

impl Token {
    /// Creates a new `Token`.
    #[must_use]
    pub fn new(address: TokenAddress, decimals: Decimals, symbol: impl Into<String>) -> Self {
        Self {
            address,
            decimals,
            symbol: symbol.into(),
        }
    }

    /// Returns the token address.
    #[must_use]
    pub const fn address(&self) -> TokenAddress {
        self.address
    }

    /// Returns the declared decimals.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Returns the display symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Checks the metadata a caller needs to display the token.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidConfiguration`] for an empty or blank symbol.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.symbol.trim().is_empty() {
            return Err(AmmError::InvalidConfiguration(format!(
                "token {} has an empty symbol",
                self.address
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(symbol={}, address={})", self.symbol, self.address)
    }
}

/// One side of a swap: the base asset or a specific token.
///
/// Every pool pairs exactly one token with the base asset, so a valid swap
/// always has `Base` on one side and a `Token` on the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    /// The common counter-asset (e.g. the chain's native coin).
    Base,
    /// A whitelisted token, identified by address.
    Token(TokenAddress),
}

impl Asset {
    /// Returns `true` for [`Asset::Base`].
    #[must_use]
    pub const fn is_base(&self) -> bool {
        matches!(self, Self::Base)
    }

    /// Returns the token address, or `None` for the base asset.
    #[must_use]
    pub const fn token(&self) -> Option<TokenAddress> {
        match self {
            Self::Base => None,
            Self::Token(address) => Some(*address),
        }
    }
}

impl From<TokenAddress> for Asset {
    fn from(address: TokenAddress) -> Self {
        Self::Token(address)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "BASE"),
            Self::Token(address) => write!(f, "{address}"),
        }
    }
}
