//! How the first deposit into an empty pool is converted to shares.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Shares};
use crate::error::{AmmError, Result};
use crate::math::geometric_mean;

/// Share-minting policy for a deposit into an empty pool.
///
/// The first deposit sets the pool price; the number of shares it mints
/// only fixes the unit of account for later providers.
///
/// In TOML:
///
/// ```toml
/// initial_shares = "geometric_mean"
/// # or
/// initial_shares = { fixed = 1000 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialShares {
    /// `floor(sqrt(token_amount * base_amount))`.
    #[default]
    GeometricMean,
    /// A constant number of shares regardless of deposit size.
    Fixed(#[serde(deserialize_with = "super::shares_from_u64")] Shares),
}

impl InitialShares {
    /// Shares minted for a first deposit of `(token_amount, base_amount)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroInput`] if the geometric mean rounds to zero.
    pub fn mint_for(&self, token_amount: Amount, base_amount: Amount) -> Result<Shares> {
        match self {
            Self::GeometricMean => {
                let root = geometric_mean(token_amount.get(), base_amount.get())?;
                if root == 0 {
                    return Err(AmmError::ZeroInput("initial deposit mints zero shares"));
                }
                Ok(Shares::new(root))
            }
            Self::Fixed(shares) => Ok(*shares),
        }
    }

    /// Validates the policy.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] for `Fixed(0)`.
    pub fn validate(&self) -> Result<()> {
        if matches!(self, Self::Fixed(s) if s.is_zero()) {
            return Err(AmmError::InvalidConfiguration(
                "fixed initial shares must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for InitialShares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GeometricMean => write!(f, "geometric_mean"),
            Self::Fixed(shares) => write!(f, "fixed({shares})"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn geometric_mean_policy() {
        let Ok(s) = InitialShares::GeometricMean.mint_for(Amount::new(1_000), Amount::new(10))
        else {
            panic!("expected Ok");
        };
        assert_eq!(s, Shares::new(100));
    }

    #[test]
    fn fixed_policy_ignores_size() {
        let policy = InitialShares::Fixed(Shares::new(1_000));
        assert_eq!(
            policy.mint_for(Amount::new(1), Amount::new(1)),
            Ok(Shares::new(1_000))
        );
    }

    #[test]
    fn fixed_zero_is_invalid() {
        assert!(InitialShares::Fixed(Shares::ZERO).validate().is_err());
        assert!(InitialShares::GeometricMean.validate().is_ok());
    }

    #[test]
    fn display() {
        assert_eq!(InitialShares::GeometricMean.to_string(), "geometric_mean");
        assert_eq!(InitialShares::Fixed(Shares::new(5)).to_string(), "fixed(5)");
    }
}
