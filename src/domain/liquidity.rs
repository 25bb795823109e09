//! LP share quantities.

use core::fmt;

use super::Amount;

/// A quantity of LP shares issued by a pool.
///
/// Kept distinct from [`Amount`] so token quantities and pool shares cannot
/// be mixed up at call sites such as
/// [`Router::remove_liquidity`](crate::router::Router::remove_liquidity).
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::Liquidity;
///
/// let a = Liquidity::new(1_000);
/// let b = Liquidity::new(2_000);
/// assert_eq!(a.checked_add(&b), Some(Liquidity::new(3_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Liquidity(u128);

impl Liquidity {
    /// No liquidity.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Liquidity` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the liquidity is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Reinterprets the share count as a raw [`Amount`] for mixed
    /// share/token arithmetic.
    pub const fn as_amount(&self) -> Amount {
        Amount::new(self.0)
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
