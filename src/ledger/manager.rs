//! The ledger entry point.
//!
//! [`PoolManager`] owns every pool and funnels all mutation through a
//! per-pool critical section:
//!
//! ```text
//! caller ──► PoolManager ──► TokenWhitelist   (is the token eligible?)
//!                 │
//!                 ├──► DashMap<TokenAddress, Arc<Mutex<PoolBook>>>
//!                 │         lock one pool ─► stage ─► validate ─► commit
//!                 │                                              │
//!                 │                                  append EventRecord
//!                 │                                              │
//!                 └──────────────────────────────── notify EventSinks
//! ```
//!
//! Operations on the same pool are strictly serialized; operations on
//! different pools never contend beyond a map shard lookup.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::config::LedgerConfig;
use crate::domain::{
    AccountId, Amount, Asset, EventRecord, LiquidityAdded, LiquidityRemoved, PoolSnapshot,
    PoolStatus, Reserves, Shares, SwapDirection, SwapQuote, Token, TokenAddress, TokenSwap,
};
use crate::error::{AmmError, Result};
use crate::traits::{EventSink, SubscriptionId};

use super::pool_book::PoolBook;
use super::swap_engine::SwapEngine;
use super::whitelist::TokenWhitelist;

type PoolHandle = Arc<Mutex<PoolBook>>;

/// Orchestrates deposits, withdrawals and swaps across all pools.
///
/// `PoolManager` is `Send + Sync`; share it behind an [`Arc`].
///
/// # Examples
///
/// ```
/// use amm_ledger::config::LedgerConfig;
/// use amm_ledger::domain::{AccountId, Amount, Asset, Decimals, Shares, Token, TokenAddress};
/// use amm_ledger::ledger::PoolManager;
///
/// let operator = AccountId::from_bytes([0xaa; 20]);
/// let alice = AccountId::from_bytes([0x01; 20]);
/// let usdc = TokenAddress::from_bytes([0x10; 20]);
///
/// let config = LedgerConfig::new(operator)
///     .with_token(Token::new(usdc, Decimals::new(6).expect("valid"), "USDC"));
/// let ledger = PoolManager::new(config).expect("valid config");
///
/// let added = ledger
///     .add_liquidity(usdc, Amount::new(1_000), Amount::new(10), alice)
///     .expect("deposit");
/// assert_eq!(added.shares_minted, Shares::new(100));
///
/// let swap = ledger
///     .swap(Asset::Base, Asset::Token(usdc), Amount::new(100), Amount::new(900), alice)
///     .expect("swap");
/// assert_eq!(swap.amount_out, Amount::new(908));
/// ```
pub struct PoolManager {
    config: LedgerConfig,
    whitelist: TokenWhitelist,
    engine: SwapEngine,
    pools: DashMap<TokenAddress, PoolHandle, ahash::RandomState>,
    sinks: RwLock<Vec<(SubscriptionId, Arc<dyn EventSink>)>>,
    next_subscription: AtomicU64,
}

impl PoolManager {
    /// Builds a ledger from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`LedgerConfig::validate`].
    pub fn new(config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        let whitelist =
            TokenWhitelist::with_tokens(config.operator(), config.whitelist().iter().cloned());
        info!(
            operator = %config.operator(),
            fee = %config.fee(),
            initial_shares = %config.initial_shares(),
            ratio_tolerance = %config.ratio_tolerance(),
            tokens = whitelist.len(),
            "ledger initialised"
        );
        Ok(Self {
            engine: SwapEngine::new(config.fee()),
            whitelist,
            config,
            pools: DashMap::with_hasher(ahash::RandomState::new()),
            sinks: RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        })
    }

    /// The configuration this ledger was built from.
    #[must_use]
    pub const fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The pricing engine used for quotes and swaps.
    #[must_use]
    pub const fn engine(&self) -> &SwapEngine {
        &self.engine
    }

    // -- whitelist ---------------------------------------------------------

    /// Returns `true` if `token` is whitelisted.
    #[must_use]
    pub fn is_supported(&self, token: TokenAddress) -> bool {
        self.whitelist.is_supported(token)
    }

    /// Whitelists `token`.  See [`TokenWhitelist::add_token`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Unauthorized`] unless `caller` is the operator,
    /// and [`AmmError::InvalidConfiguration`] for a blank symbol.
    pub fn add_token(&self, caller: AccountId, token: Token) -> Result<bool> {
        self.whitelist.add_token(caller, token)
    }

    /// Metadata of a whitelisted token.
    #[must_use]
    pub fn whitelisted_token(&self, token: TokenAddress) -> Option<Token> {
        self.whitelist.token(token)
    }

    /// All whitelisted tokens, ordered by address.
    #[must_use]
    pub fn tokens(&self) -> Vec<Token> {
        self.whitelist.tokens()
    }

    // -- events ------------------------------------------------------------

    /// Registers a sink that receives every record committed from now on,
    /// until it is passed to [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe(&self, sink: impl EventSink + 'static) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.sinks.write().push((id, Arc::new(sink)));
        debug!(subscription = %id, "sink subscribed");
        id
    }

    /// Stops delivery to a sink. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut sinks = self.sinks.write();
        let before = sinks.len();
        sinks.retain(|(sub, _)| *sub != id);
        let removed = sinks.len() != before;
        if removed {
            debug!(subscription = %id, "sink unsubscribed");
        }
        removed
    }

    /// The full event log of a pool, oldest first.  Empty for unknown pools.
    #[must_use]
    pub fn events(&self, token: TokenAddress) -> Vec<EventRecord> {
        self.read_or_default(token, |book| book.events().to_vec())
    }

    /// Records with `sequence > after`, oldest first.
    #[must_use]
    pub fn events_since(&self, token: TokenAddress, after: u64) -> Vec<EventRecord> {
        self.read_or_default(token, |book| book.events_since(after).to_vec())
    }

    // -- queries -----------------------------------------------------------

    /// Current `(token, base)` reserves.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownPool`] if the token never received
    /// liquidity.
    pub fn get_reserves(&self, token: TokenAddress) -> Result<Reserves> {
        self.read_known(token, |book| book.reserves().get())
    }

    /// Consistent snapshot of one pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownPool`] if the token never received
    /// liquidity.
    pub fn pool(&self, token: TokenAddress) -> Result<PoolSnapshot> {
        self.read_known(token, |book| book.snapshot(token))
    }

    /// Lifecycle status of one pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownPool`] if the token never received
    /// liquidity.
    pub fn pool_status(&self, token: TokenAddress) -> Result<PoolStatus> {
        self.pool(token).map(|snapshot| snapshot.status())
    }

    /// Shares `provider` holds in `token`'s pool; zero if none.
    pub fn balance_of(&self, token: TokenAddress, provider: AccountId) -> Shares {
        self.read_or_default(token, |book| book.shares().balance_of(provider))
    }

    /// Shares outstanding in `token`'s pool; zero if none.
    pub fn total_shares(&self, token: TokenAddress) -> Shares {
        self.read_or_default(token, |book| book.shares().total_shares())
    }

    /// Prices an exact input against explicit reserves.
    ///
    /// # Errors
    ///
    /// See [`SwapEngine::quote`].
    pub fn quote(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<SwapQuote> {
        self.engine.quote(amount_in, reserve_in, reserve_out)
    }

    /// Prices an exact input against the live pool, as
    /// [`swap`](Self::swap) would execute it now.
    ///
    /// # Errors
    ///
    /// `UnsupportedRoute`, `UnsupportedToken`, `UnknownPool`, plus the
    /// errors of [`SwapEngine::quote`].
    pub fn quote_swap(
        &self,
        token_in: Asset,
        token_out: Asset,
        amount_in: Amount,
    ) -> Result<SwapQuote> {
        let (token, direction) = self.route(token_in, token_out)?;
        self.read_known(token, |book| book.quote(&self.engine, direction, amount_in))?
    }

    /// Minimal input for at least `amount_out` against the live pool.
    ///
    /// # Errors
    ///
    /// `UnsupportedRoute`, `UnsupportedToken`, `UnknownPool`, plus the
    /// errors of [`SwapEngine::quote_exact_out`].
    pub fn quote_swap_exact_out(
        &self,
        token_in: Asset,
        token_out: Asset,
        amount_out: Amount,
    ) -> Result<SwapQuote> {
        let (token, direction) = self.route(token_in, token_out)?;
        self.read_known(token, |book| {
            book.quote_exact_out(&self.engine, direction, amount_out)
        })?
    }

    // -- mutations ---------------------------------------------------------

    /// Deposits `(token_amount, base_amount)` and mints shares to `provider`.
    ///
    /// The first deposit into an empty pool sets its price and mints shares
    /// by the configured [`InitialShares`](crate::config::InitialShares)
    /// policy.  Later deposits must match the pool ratio within the
    /// configured tolerance; the smaller of the two per-side share figures
    /// is minted.
    ///
    /// # Errors
    ///
    /// `UnsupportedToken`, `ZeroInput`, `RatioMismatch`,
    /// `InvariantViolation`, `Overflow`.  No state changes on error.
    pub fn add_liquidity(
        &self,
        token: TokenAddress,
        token_amount: Amount,
        base_amount: Amount,
        provider: AccountId,
    ) -> Result<LiquidityAdded> {
        let result = self.try_add_liquidity(token, token_amount, base_amount, provider);
        log_outcome("add_liquidity", token, result)
    }

    fn try_add_liquidity(
        &self,
        token: TokenAddress,
        token_amount: Amount,
        base_amount: Amount,
        provider: AccountId,
    ) -> Result<LiquidityAdded> {
        self.ensure_supported(token)?;
        if token_amount.is_zero() || base_amount.is_zero() {
            return Err(AmmError::ZeroInput("deposit amounts must be positive"));
        }

        let pool = self.entry(token);
        let mut book = pool.lock();
        let was_empty = book.shares().total_shares().is_zero();
        let (record, event) = book.deposit(
            token,
            provider,
            token_amount,
            base_amount,
            self.config.initial_shares(),
            self.config.ratio_tolerance(),
        )?;
        if was_empty {
            info!(token = %token, reserves = %book.reserves().get(), "pool funded");
        }
        self.notify(&record);

        debug!(
            token = %token,
            provider = %provider,
            token_amount = %event.token_amount,
            base_amount = %event.base_amount,
            shares = %event.shares_minted,
            sequence = record.sequence,
            "liquidity added"
        );
        Ok(event)
    }

    /// Burns `shares` of `provider` and pays out the proportional reserves.
    ///
    /// Burning the last outstanding shares pays out the entire reserves and
    /// leaves the pool empty.
    ///
    /// # Errors
    ///
    /// `ZeroInput` (also when the payout floors to zero on both sides),
    /// `UnknownPool`, `InsufficientShares`, `InvariantViolation`,
    /// `Overflow`.  No state changes on error.
    pub fn remove_liquidity(
        &self,
        token: TokenAddress,
        shares: Shares,
        provider: AccountId,
    ) -> Result<LiquidityRemoved> {
        let result = self.try_remove_liquidity(token, shares, provider);
        log_outcome("remove_liquidity", token, result)
    }

    fn try_remove_liquidity(
        &self,
        token: TokenAddress,
        shares: Shares,
        provider: AccountId,
    ) -> Result<LiquidityRemoved> {
        if shares.is_zero() {
            return Err(AmmError::ZeroInput("shares to burn must be positive"));
        }
        let pool = self.known(token)?;
        let mut book = pool.lock();
        if !book.is_known() {
            return Err(AmmError::UnknownPool(token));
        }
        let (record, event) = book.withdraw(token, provider, shares)?;
        if book.shares().total_shares().is_zero() {
            info!(token = %token, "pool emptied");
        }
        self.notify(&record);

        debug!(
            token = %token,
            provider = %provider,
            token_amount = %event.token_amount,
            base_amount = %event.base_amount,
            shares = %event.shares_burned,
            sequence = record.sequence,
            "liquidity removed"
        );
        Ok(event)
    }

    /// Swaps `amount_in` of `token_in` for at least `min_amount_out` of
    /// `token_out`.  Exactly one side must be [`Asset::Base`].
    ///
    /// # Errors
    ///
    /// `UnsupportedRoute`, `UnsupportedToken`, `UnknownPool`, `ZeroInput`,
    /// `ZeroReserves`, `SlippageExceeded`, `InvariantViolation`,
    /// `Overflow`.  No state changes on error.
    pub fn swap(
        &self,
        token_in: Asset,
        token_out: Asset,
        amount_in: Amount,
        min_amount_out: Amount,
        trader: AccountId,
    ) -> Result<TokenSwap> {
        let pool_key = token_in.token().or(token_out.token());
        let result = self.try_swap(token_in, token_out, amount_in, min_amount_out, trader);
        match pool_key {
            Some(token) => log_outcome("swap", token, result),
            None => {
                if let Err(e) = &result {
                    warn!(error = %e, "swap rejected");
                }
                result
            }
        }
    }

    fn try_swap(
        &self,
        token_in: Asset,
        token_out: Asset,
        amount_in: Amount,
        min_amount_out: Amount,
        trader: AccountId,
    ) -> Result<TokenSwap> {
        let (token, direction) = self.route(token_in, token_out)?;
        if amount_in.is_zero() {
            return Err(AmmError::ZeroInput("swap input must be positive"));
        }
        let pool = self.known(token)?;
        let mut book = pool.lock();
        if !book.is_known() {
            return Err(AmmError::UnknownPool(token));
        }
        let (record, event) = book.swap(
            &self.engine,
            token,
            direction,
            trader,
            amount_in,
            min_amount_out,
        )?;
        self.notify(&record);

        debug!(
            token = %token,
            trader = %trader,
            token_in = %event.token_in,
            token_out = %event.token_out,
            amount_in = %event.amount_in,
            amount_out = %event.amount_out,
            sequence = record.sequence,
            "swap executed"
        );
        Ok(event)
    }

    // -- internals ---------------------------------------------------------

    /// Resolves a base ↔ token route to its pool key and direction.
    fn route(&self, token_in: Asset, token_out: Asset) -> Result<(TokenAddress, SwapDirection)> {
        let (token, direction) = match (token_in, token_out) {
            (Asset::Base, Asset::Token(t)) => (t, SwapDirection::BaseToToken),
            (Asset::Token(t), Asset::Base) => (t, SwapDirection::TokenToBase),
            (Asset::Base, Asset::Base) => {
                return Err(AmmError::UnsupportedRoute("base to base"));
            }
            (Asset::Token(_), Asset::Token(_)) => {
                return Err(AmmError::UnsupportedRoute(
                    "token to token; route through the base asset",
                ));
            }
        };
        self.ensure_supported(token)?;
        Ok((token, direction))
    }

    fn ensure_supported(&self, token: TokenAddress) -> Result<()> {
        if self.whitelist.is_supported(token) {
            Ok(())
        } else {
            Err(AmmError::UnsupportedToken(token))
        }
    }

    /// Clones a pool handle and releases the map shard immediately.
    fn existing(&self, token: TokenAddress) -> Option<PoolHandle> {
        self.pools.get(&token).map(|entry| Arc::clone(entry.value()))
    }

    fn known(&self, token: TokenAddress) -> Result<PoolHandle> {
        self.existing(token).ok_or(AmmError::UnknownPool(token))
    }

    fn entry(&self, token: TokenAddress) -> PoolHandle {
        Arc::clone(self.pools.entry(token).or_default().value())
    }

    fn read_known<T>(&self, token: TokenAddress, read: impl FnOnce(&PoolBook) -> T) -> Result<T> {
        let pool = self.known(token)?;
        let book = pool.lock();
        if !book.is_known() {
            return Err(AmmError::UnknownPool(token));
        }
        Ok(read(&book))
    }

    fn read_or_default<T: Default>(
        &self,
        token: TokenAddress,
        read: impl FnOnce(&PoolBook) -> T,
    ) -> T {
        match self.existing(token) {
            Some(pool) => {
                let book = pool.lock();
                read(&book)
            }
            None => T::default(),
        }
    }

    fn notify(&self, record: &EventRecord) {
        for (_, sink) in self.sinks.read().iter() {
            sink.publish(record);
        }
    }
}

fn log_outcome<T>(op: &'static str, token: TokenAddress, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        if e.is_fatal() {
            error!(op, token = %token, error = %e, "ledger contract breached");
        } else {
            warn!(op, token = %token, error = %e, "operation rejected");
        }
    }
    result
}

impl fmt::Debug for PoolManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolManager")
            .field("config", &self.config)
            .field("pools", &self.pools.len())
            .field("sinks", &self.sinks.read().len())
            .finish_non_exhaustive()
    }
}
