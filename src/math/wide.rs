//! 256-bit intermediate arithmetic.
//!
//! Products of two reserves (or a reserve and an LP supply) do not fit in
//! `u128`.  These helpers widen to [`U256`], perform the operation exactly,
//! and narrow the result back with an explicit overflow error.

use alloy_primitives::U256;

use crate::domain::Rounding;
use crate::error::{AmmError, Result};

/// Computes `a * b / denominator` without intermediate overflow.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::Rounding;
/// use hydra_cpmm::math::mul_div;
///
/// let e18 = 10u128.pow(18);
/// // 4e36 / 3 would overflow nothing, but the product alone is 4e36.
/// assert_eq!(mul_div(2 * e18, 2 * e18, e18, Rounding::Down), Ok(4 * e18));
/// assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
/// ```
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    if denominator == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let product = U256::from(a) * U256::from(b);
    let denominator = U256::from(denominator);
    let mut quotient = product / denominator;
    if rounding.is_up() && !(product % denominator).is_zero() {
        quotient += U256::from(1u8);
    }
    u128::try_from(quotient).map_err(|_| AmmError::Overflow("mul_div result exceeds 128 bits"))
}

/// Integer square root (floor) via Newton's method.
#[must_use]
pub fn isqrt(n: U256) -> U256 {
    if n.is_zero() {
        return U256::ZERO;
    }
    let one = U256::from(1u8);
    let mut x = n;
    let mut y = (n >> 1) + (n & one);
    while y < x {
        x = y;
        y = (x + n / x) >> 1;
    }
    x
}

/// Computes `floor(sqrt(a * b))` exactly.
///
/// The result always fits in `u128` since `a * b < 2^256`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] only if narrowing fails, which cannot
/// happen for valid inputs.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::math::sqrt_product;
///
/// let e18 = 10u128.pow(18);
/// assert_eq!(sqrt_product(e18, 4 * e18), Ok(2 * e18));
/// assert_eq!(sqrt_product(u128::MAX, u128::MAX), Ok(u128::MAX));
/// ```
pub fn sqrt_product(a: u128, b: u128) -> Result<u128> {
    let root = isqrt(U256::from(a) * U256::from(b));
    u128::try_from(root).map_err(|_| AmmError::Overflow("square root exceeds 128 bits"))
}
