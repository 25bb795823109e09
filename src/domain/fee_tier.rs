//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use super::basis_points::BPS_DENOMINATOR;
use super::BasisPoints;
use crate::error::{AmmError, Result};

/// The swap fee charged on the input side of every hop.
///
/// The pool's invariant check and the router's quoting formula both derive
/// their constants from the same tier, so a quote the router accepts is a
/// swap the pool accepts.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::FeeTier;
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// assert_eq!(tier.basis_points().get(), 30);
/// assert_eq!(tier.fee_multiplier(), 30);
/// assert_eq!(tier.retained_multiplier().ok(), Some(9_970));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// 0.05% fee (5 bp).
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30% fee (30 bp), the classic constant-product fee.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee (100 bp).
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Scale all fee arithmetic is expressed in.
    pub const DENOMINATOR: u128 = BPS_DENOMINATOR;

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Fee numerator over [`DENOMINATOR`](Self::DENOMINATOR).
    #[must_use]
    pub const fn fee_multiplier(&self) -> u128 {
        self.0.get() as u128
    }

    /// Share of the input that counts towards the invariant, over
    /// [`DENOMINATOR`](Self::DENOMINATOR).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the fee is 100% or
    /// more, since no input would then reach the curve.
    pub const fn retained_multiplier(&self) -> Result<u128> {
        match self.0.complement() {
            Some(0) | None => Err(AmmError::InvalidConfiguration(
                "fee must be below 100%",
            )),
            Some(v) => Ok(v),
        }
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
