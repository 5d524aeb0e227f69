//! Ledger-wide configuration.
//!
//! [`LedgerConfig`] is the declarative blueprint for a
//! [`PoolManager`](crate::ledger::PoolManager): who may whitelist tokens, how
//! swaps are charged, how the first deposit is converted to shares, and which
//! tokens are whitelisted from the start.
//!
//! # Loading from TOML
//!
//! With the `toml-config` feature (on by default):
//!
//! ```
//! # #[cfg(feature = "toml-config")] {
//! use amm_ledger::config::{InitialShares, LedgerConfig};
//!
//! let cfg = LedgerConfig::from_toml_str(r#"
//!     operator = "0x00000000000000000000000000000000000000aa"
//!     fee = { numerator = 25, denominator = 10000 }
//!     initial_shares = "geometric_mean"
//!     ratio_tolerance = 2
//!
//!     [base_asset]
//!     symbol = "ETH"
//!     decimals = 18
//!
//!     [[whitelist]]
//!     address = "0x00000000000000000000000000000000000000bb"
//!     decimals = 6
//!     symbol = "USDC"
//! "#).expect("valid config");
//!
//! assert_eq!(cfg.fee().to_string(), "25/10000");
//! assert_eq!(cfg.initial_shares(), InitialShares::GeometricMean);
//! assert_eq!(cfg.whitelist().len(), 1);
//! # }
//! ```

use serde::{Deserialize, Serialize};

use super::InitialShares;
use crate::domain::{AccountId, Decimals, FeeRate, Shares, Token};
use crate::error::{AmmError, Result};

/// Display metadata of the base asset every token is paired against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseAsset {
    symbol: String,
    decimals: Decimals,
}

impl BaseAsset {
    /// Creates base-asset metadata.
    #[must_use]
    pub fn new(symbol: impl Into<String>, decimals: Decimals) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Display symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Declared decimals.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }
}

impl Default for BaseAsset {
    fn default() -> Self {
        Self::new("ETH", Decimals::MAX)
    }
}

const fn default_ratio_tolerance() -> Shares {
    Shares::new(1)
}

/// Configuration of a ledger instance.
///
/// # Validation
///
/// - The base-asset symbol is non-empty.
/// - `initial_shares` is valid (see [`InitialShares::validate`]).
/// - Every whitelisted token has a non-empty symbol and a distinct address.
///
/// The fee rate and decimals are validated by their own types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    operator: AccountId,
    #[serde(default)]
    base_asset: BaseAsset,
    #[serde(default)]
    fee: FeeRate,
    #[serde(default)]
    initial_shares: InitialShares,
    #[serde(
        default = "default_ratio_tolerance",
        deserialize_with = "super::shares_from_u64"
    )]
    ratio_tolerance: Shares,
    #[serde(default)]
    whitelist: Vec<Token>,
}

impl LedgerConfig {
    /// Creates a configuration with default economics and an empty whitelist.
    #[must_use]
    pub fn new(operator: AccountId) -> Self {
        Self {
            operator,
            base_asset: BaseAsset::default(),
            fee: FeeRate::DEFAULT,
            initial_shares: InitialShares::GeometricMean,
            ratio_tolerance: default_ratio_tolerance(),
            whitelist: Vec::new(),
        }
    }

    /// Sets the swap fee.
    #[must_use]
    pub const fn with_fee(mut self, fee: FeeRate) -> Self {
        self.fee = fee;
        self
    }

    /// Sets the initial-share policy.
    #[must_use]
    pub const fn with_initial_shares(mut self, policy: InitialShares) -> Self {
        self.initial_shares = policy;
        self
    }

    /// Sets how far, in shares, the two sides of a deposit may disagree.
    #[must_use]
    pub const fn with_ratio_tolerance(mut self, tolerance: Shares) -> Self {
        self.ratio_tolerance = tolerance;
        self
    }

    /// Sets the base-asset metadata.
    #[must_use]
    pub fn with_base_asset(mut self, base_asset: BaseAsset) -> Self {
        self.base_asset = base_asset;
        self
    }

    /// Appends a token to the seed whitelist.
    #[must_use]
    pub fn with_token(mut self, token: Token) -> Self {
        self.whitelist.push(token);
        self
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] on parse errors, unknown
    /// fields or failed validation, and the typed error of any field whose
    /// own validation fails.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| AmmError::InvalidConfiguration(format!("toml: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] describing the first
    /// problem found.
    pub fn validate(&self) -> Result<()> {
        if self.base_asset.symbol.trim().is_empty() {
            return Err(AmmError::InvalidConfiguration(
                "base asset symbol is empty".to_owned(),
            ));
        }
        self.initial_shares.validate()?;

        let mut seen = ahash::AHashSet::with_capacity(self.whitelist.len());
        for token in &self.whitelist {
            token.validate()?;
            if !seen.insert(token.address()) {
                return Err(AmmError::InvalidConfiguration(format!(
                    "token {} whitelisted twice",
                    token.address()
                )));
            }
        }
        Ok(())
    }

    /// The whitelist operator.
    #[must_use]
    pub const fn operator(&self) -> AccountId {
        self.operator
    }

    /// Base-asset metadata.
    #[must_use]
    pub const fn base_asset(&self) -> &BaseAsset {
        &self.base_asset
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee(&self) -> FeeRate {
        self.fee
    }

    /// Initial-share policy.
    #[must_use]
    pub const fn initial_shares(&self) -> InitialShares {
        self.initial_shares
    }

    /// Allowed disagreement between the two sides of a deposit.
    pub const fn ratio_tolerance(&self) -> Shares {
        self.ratio_tolerance
    }

    /// Seed whitelist.
    #[must_use]
    pub fn whitelist(&self) -> &[Token] {
        &self.whitelist
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::TokenAddress;

    fn operator() -> AccountId {
        AccountId::from_bytes([0xaa; 20])
    }

    fn usdc() -> Token {
        let Ok(d) = Decimals::new(6) else {
            panic!("valid decimals");
        };
        Token::new(TokenAddress::from_bytes([0xbb; 20]), d, "USDC")
    }

    #[test]
    fn defaults() {
        let cfg = LedgerConfig::new(operator());
        assert_eq!(cfg.fee(), FeeRate::DEFAULT);
        assert_eq!(cfg.initial_shares(), InitialShares::GeometricMean);
        assert_eq!(cfg.ratio_tolerance(), Shares::new(1));
        assert_eq!(cfg.base_asset().symbol(), "ETH");
        assert_eq!(cfg.base_asset().decimals().get(), 18);
        assert!(cfg.whitelist().is_empty());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn duplicate_token_rejected() {
        let cfg = LedgerConfig::new(operator())
            .with_token(usdc())
            .with_token(usdc());
        let Err(AmmError::InvalidConfiguration(msg)) = cfg.validate() else {
            panic!("expected InvalidConfiguration");
        };
        assert!(msg.contains("twice"));
    }

    #[test]
    fn empty_symbol_rejected() {
        let tok = Token::new(TokenAddress::from_bytes([1; 20]), Decimals::default(), " ");
        assert!(LedgerConfig::new(operator()).with_token(tok).validate().is_err());
        let cfg =
            LedgerConfig::new(operator()).with_base_asset(BaseAsset::new("", Decimals::MAX));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn fixed_zero_initial_shares_rejected() {
        let cfg =
            LedgerConfig::new(operator()).with_initial_shares(InitialShares::Fixed(Shares::ZERO));
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "toml-config")]
    mod toml_loading {
        use super::*;

        #[test]
        fn minimal_document_uses_defaults() {
            let Ok(cfg) = LedgerConfig::from_toml_str(
                r#"operator = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa""#,
            ) else {
                panic!("expected Ok");
            };
            assert_eq!(cfg, LedgerConfig::new(operator()));
        }

        #[test]
        fn full_document() {
            let src = r#"
                operator = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
                fee = { numerator = 1, denominator = 100 }
                initial_shares = { fixed = 1000 }
                ratio_tolerance = 0

                [base_asset]
                symbol = "MATIC"
                decimals = 18

                [[whitelist]]
                address = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"
                decimals = 6
                symbol = "USDC"
            "#;
            let Ok(cfg) = LedgerConfig::from_toml_str(src) else {
                panic!("expected Ok");
            };
            assert_eq!(cfg.fee().to_string(), "1/100");
            assert_eq!(cfg.initial_shares(), InitialShares::Fixed(Shares::new(1_000)));
            assert_eq!(cfg.ratio_tolerance(), Shares::ZERO);
            assert_eq!(cfg.base_asset().symbol(), "MATIC");
            assert_eq!(cfg.whitelist(), &[usdc()]);
        }

        #[test]
        fn invalid_fee_rejected() {
            let src = r#"
                operator = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
                fee = { numerator = 10, denominator = 10 }
            "#;
            assert!(matches!(
                LedgerConfig::from_toml_str(src),
                Err(AmmError::InvalidConfiguration(_))
            ));
        }

        #[test]
        fn unknown_field_rejected() {
            let src = r#"
                operator = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
                spot_price = 3
            "#;
            assert!(LedgerConfig::from_toml_str(src).is_err());
        }

        #[test]
        fn excessive_decimals_rejected() {
            let src = r#"
                operator = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
                [[whitelist]]
                address = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"
                decimals = 19
                symbol = "BAD"
            "#;
            assert!(LedgerConfig::from_toml_str(src).is_err());
        }
    }
}
