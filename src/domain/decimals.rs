//! Declared token precision.

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

const MAX_DECIMALS: u8 = 18;

/// Decimal places a token declares, `0..=18`.
///
/// Pool arithmetic never looks at it. It rides along with the whitelisted
/// [`Token`](super::Token) so a caller can render `1_500_000` as `1.5 USDC`.
///
/// ```
/// use amm_ledger::domain::Decimals;
///
/// let usdc = Decimals::new(6).expect("in range");
/// assert_eq!(1_500_000 / usdc.unit(), 1);
/// assert!(Decimals::new(19).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decimals(u8);

impl Decimals {
    /// Eighteen places, the native-coin convention and the base-asset default.
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// # Errors
    ///
    /// [`AmmError::InvalidPrecision`] above 18.
    pub const fn new(value: u8) -> Result<Self, AmmError> {
        if value > MAX_DECIMALS {
            return Err(AmmError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Smallest units per whole token, `10^decimals`.
    #[must_use]
    pub const fn unit(&self) -> u128 {
        10u128.pow(self.0 as u32)
    }
}

impl TryFrom<u8> for Decimals {
    type Error = AmmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(value: Decimals) -> Self {
        value.0
    }
}
