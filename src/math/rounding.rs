//! Rounding helpers for integer division.
//!
//! [`div_round`] is the low-level building block behind
//! [`Amount::checked_div`](crate::domain::Amount::checked_div) and the
//! quoting functions in [`router::library`](crate::router::library).
//!
//! # Convention
//!
//! Round against the caller:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Pool output, LP minted, tokens returned on burn | [`Rounding::Down`] |
//! | Input required for an exact output | [`Rounding::Up`] |

use crate::domain::Rounding;

/// Integer division of `u128` values with explicit rounding direction.
///
/// Returns [`None`] if `denominator` is zero.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::Rounding;
/// use hydra_cpmm::math::div_round;
///
/// assert_eq!(div_round(7, 2, Rounding::Down), Some(3));
/// assert_eq!(div_round(7, 2, Rounding::Up), Some(4));
/// assert_eq!(div_round(7, 0, Rounding::Up), None);
/// ```
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let quotient = numerator / denominator;
    match rounding {
        Rounding::Down => Some(quotient),
        // quotient + 1 cannot overflow: a non-zero remainder implies
        // denominator > 1, so quotient < u128::MAX.
        Rounding::Up if numerator % denominator != 0 => Some(quotient + 1),
        Rounding::Up => Some(quotient),
    }
}
