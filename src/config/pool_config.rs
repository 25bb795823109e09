//! Configuration shared by every pool a factory creates.

use crate::domain::{FeeTier, Liquidity};
use crate::error::{AmmError, Result};

/// Default number of LP shares locked to the null address at genesis.
pub const DEFAULT_MINIMUM_LIQUIDITY: Liquidity = Liquidity::new(1_000);

/// Immutable parameters of a constant-product pool (`x · y = k`).
///
/// # Derived Values
///
/// - Swap invariant: `(b0·D − in0·f)(b1·D − in1·f) ≥ r0·r1·D²` where `f` is
///   [`fee_tier`](Self::fee_tier) in basis points and `D = 10 000`.
/// - Genesis LP supply: `isqrt(amount0 · amount1)`, of which
///   [`minimum_liquidity`](Self::minimum_liquidity) is burned to
///   [`Address::ZERO`](crate::domain::Address::ZERO).
///
/// # Validation
///
/// - The fee must be strictly below 100%.
/// - The minimum liquidity must be non-zero.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::config::PoolConfig;
/// use hydra_cpmm::domain::{FeeTier, Liquidity};
///
/// let config = PoolConfig::default();
/// assert_eq!(config.fee_tier(), FeeTier::TIER_0_30_PERCENT);
/// assert_eq!(config.minimum_liquidity(), Liquidity::new(1_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPoolConfig"))]
pub struct PoolConfig {
    fee_tier: FeeTier,
    minimum_liquidity: Liquidity,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the fee is 100% or
    /// more, or if `minimum_liquidity` is zero.
    pub fn new(fee_tier: FeeTier, minimum_liquidity: Liquidity) -> Result<Self> {
        let config = Self {
            fee_tier,
            minimum_liquidity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn validate(&self) -> Result<()> {
        self.fee_tier.retained_multiplier()?;
        if self.minimum_liquidity.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "minimum liquidity must be non-zero",
            ));
        }
        Ok(())
    }

    /// Returns the swap fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Returns the LP shares locked at genesis.
    #[must_use]
    pub const fn minimum_liquidity(&self) -> Liquidity {
        self.minimum_liquidity
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPoolConfig {
    fee_tier: FeeTier,
    minimum_liquidity: Liquidity,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPoolConfig> for PoolConfig {
    type Error = AmmError;

    fn try_from(raw: RawPoolConfig) -> Result<Self> {
        Self::new(raw.fee_tier, raw.minimum_liquidity)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            fee_tier: FeeTier::TIER_0_30_PERCENT,
            minimum_liquidity: DEFAULT_MINIMUM_LIQUIDITY,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::BasisPoints;

    #[test]
    fn valid_config() {
        let Ok(cfg) = PoolConfig::new(FeeTier::TIER_0_05_PERCENT, Liquidity::new(10)) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.fee_tier().basis_points().get(), 5);
        assert_eq!(cfg.minimum_liquidity(), Liquidity::new(10));
    }

    #[test]
    fn zero_fee_allowed() {
        assert!(PoolConfig::new(FeeTier::new(BasisPoints::ZERO), Liquidity::new(1)).is_ok());
    }

    #[test]
    fn full_fee_rejected() {
        let Err(AmmError::InvalidConfiguration(_)) =
            PoolConfig::new(FeeTier::new(BasisPoints::MAX_PERCENT), Liquidity::new(1_000))
        else {
            panic!("expected InvalidConfiguration");
        };
    }

    #[test]
    fn zero_minimum_liquidity_rejected() {
        let Err(AmmError::InvalidConfiguration(_)) =
            PoolConfig::new(FeeTier::default(), Liquidity::ZERO)
        else {
            panic!("expected InvalidConfiguration");
        };
    }

    #[test]
    fn default_validates() {
        assert_eq!(PoolConfig::default().validate(), Ok(()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_validates() {
        let Ok(mut value) = serde_json::to_value(PoolConfig::default()) else {
            panic!("expected Ok");
        };
        let Ok(restored) = serde_json::from_value::<PoolConfig>(value.clone()) else {
            panic!("expected Ok");
        };
        assert_eq!(restored, PoolConfig::default());

        value["minimum_liquidity"] = serde_json::json!(0);
        assert!(serde_json::from_value::<PoolConfig>(value).is_err());
    }
}
