//! The set of tokens eligible for pooling.

use ahash::AHashMap;
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::domain::{AccountId, Token, TokenAddress};
use crate::error::{AmmError, Result};

/// Authoritative, append-only whitelist guarded by a single operator.
///
/// Lookups take a shared lock; additions take the exclusive lock briefly.
/// There is no removal.
///
/// # Examples
///
/// ```
/// use amm_ledger::domain::{AccountId, Decimals, Token, TokenAddress};
/// use amm_ledger::ledger::TokenWhitelist;
///
/// let operator = AccountId::from_bytes([0xaa; 20]);
/// let whitelist = TokenWhitelist::new(operator);
/// let usdc = Token::new(TokenAddress::from_bytes([1; 20]), Decimals::new(6).expect("valid"), "USDC");
///
/// assert_eq!(whitelist.add_token(operator, usdc.clone()), Ok(true));
/// assert_eq!(whitelist.add_token(operator, usdc.clone()), Ok(false));
/// assert!(whitelist.is_supported(usdc.address()));
/// ```
#[derive(Debug)]
pub struct TokenWhitelist {
    operator: AccountId,
    tokens: RwLock<AHashMap<TokenAddress, Token>>,
}

impl TokenWhitelist {
    /// Creates an empty whitelist controlled by `operator`.
    #[must_use]
    pub fn new(operator: AccountId) -> Self {
        Self {
            operator,
            tokens: RwLock::new(AHashMap::new()),
        }
    }

    /// Creates a whitelist pre-populated with `tokens`.
    ///
    /// Later duplicates of an address are ignored.
    #[must_use]
    pub fn with_tokens(operator: AccountId, tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut map = AHashMap::new();
        for token in tokens {
            map.entry(token.address()).or_insert(token);
        }
        Self {
            operator,
            tokens: RwLock::new(map),
        }
    }

    /// The only account allowed to add tokens.
    #[must_use]
    pub const fn operator(&self) -> AccountId {
        self.operator
    }

    /// Returns `true` if `address` is whitelisted.
    #[must_use]
    pub fn is_supported(&self, address: TokenAddress) -> bool {
        self.tokens.read().contains_key(&address)
    }

    /// Adds `token`.  Idempotent.
    ///
    /// Returns `Ok(true)` if the token was newly added and `Ok(false)` if its
    /// address was already present.  An existing entry is never replaced.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if `caller` is not the operator.
    /// - [`AmmError::InvalidConfiguration`] if the token has a blank symbol.
    pub fn add_token(&self, caller: AccountId, token: Token) -> Result<bool> {
        if caller != self.operator {
            warn!(caller = %caller, token = %token.address(), "whitelist change rejected");
            return Err(AmmError::Unauthorized(caller));
        }
        if let Err(e) = token.validate() {
            warn!(token = %token.address(), error = %e, "whitelist change rejected");
            return Err(e);
        }
        let mut tokens = self.tokens.write();
        if let Some(existing) = tokens.get(&token.address()) {
            if *existing != token {
                warn!(
                    token = %token.address(),
                    kept = existing.symbol(),
                    ignored = token.symbol(),
                    "token already whitelisted with different metadata"
                );
            }
            return Ok(false);
        }
        info!(
            token = %token.address(),
            symbol = token.symbol(),
            decimals = token.decimals().get(),
            "token whitelisted"
        );
        tokens.insert(token.address(), token);
        Ok(true)
    }

    /// Metadata of a whitelisted token.
    #[must_use]
    pub fn token(&self, address: TokenAddress) -> Option<Token> {
        self.tokens.read().get(&address).cloned()
    }

    /// All whitelisted tokens, ordered by address.
    #[must_use]
    pub fn tokens(&self) -> Vec<Token> {
        let mut tokens: Vec<Token> = self.tokens.read().values().cloned().collect();
        tokens.sort_by_key(Token::address);
        tokens
    }

    /// Number of whitelisted tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.read().len()
    }

    /// Returns `true` if nothing is whitelisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.read().is_empty()
    }
}
