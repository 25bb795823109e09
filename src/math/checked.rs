//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning checked operations of
//! [`Amount`] and [`Liquidity`] into `Result`s carrying a specific
//! [`AmmError`] variant, so pool code can use `?` throughout.
//!
//! # Examples
//!
//! ```
//! use hydra_cpmm::domain::Amount;
//! use hydra_cpmm::math::CheckedArithmetic;
//!
//! let balance = Amount::new(1_500);
//! let reserve = Amount::new(1_000);
//! assert_eq!(balance.safe_sub(&reserve), Ok(Amount::new(500)));
//! assert!(reserve.safe_sub(&balance).is_err());
//! ```

use crate::domain::{Amount, Liquidity};
use crate::error::{AmmError, Result};

/// Fallible arithmetic for domain wrapper types.
///
/// No method panics or saturates; every failure surfaces as an error.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result is not representable.
    fn safe_add(&self, other: &Self) -> Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("liquidity addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("liquidity subtraction underflow"))
    }
}
