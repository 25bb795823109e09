//! Basis-point representation for percentages.

use core::fmt;

/// Denominator for basis-point math (10 000 bp = 100%).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%).
///
/// All `u32` values can be represented; [`is_valid_percent`](Self::is_valid_percent)
/// tells whether the value is a sensible percentage.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::BasisPoints;
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.get(), 30);
/// assert_eq!(bp.complement(), Some(9_970));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR as u32);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 as u128 <= BPS_DENOMINATOR
    }

    /// Returns `10_000 - self`, or `None` above 100%.
    #[must_use]
    pub const fn complement(&self) -> Option<u128> {
        BPS_DENOMINATOR.checked_sub(self.0 as u128)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(BasisPoints::ZERO.get(), 0);
        assert_eq!(BasisPoints::MAX_PERCENT.get(), 10_000);
        assert_eq!(BasisPoints::default(), BasisPoints::ZERO);
    }

    #[test]
    fn valid_percent_range() {
        assert!(BasisPoints::MAX_PERCENT.is_valid_percent());
        assert!(!BasisPoints::new(10_001).is_valid_percent());
    }

    #[test]
    fn complement() {
        assert_eq!(BasisPoints::new(30).complement(), Some(9_970));
        assert_eq!(BasisPoints::MAX_PERCENT.complement(), Some(0));
        assert_eq!(BasisPoints::new(10_001).complement(), None);
    }

    #[test]
    fn display() {
        assert_eq!(BasisPoints::new(30).to_string(), "30bp");
    }
}
