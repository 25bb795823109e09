//! Arithmetic utilities for pool and router math.
//!
//! - [`CheckedArithmetic`]: `Result`-returning add/sub on domain types.
//! - [`div_round`]: `u128` division with explicit [`Rounding`](crate::domain::Rounding).
//! - [`mul_div`], [`sqrt_product`], [`isqrt`]: exact 256-bit intermediates
//!   for reserve products.

mod checked;
mod rounding;
mod wide;

pub use checked::CheckedArithmetic;
pub use rounding::div_round;
pub use wide::{isqrt, mul_div, sqrt_product};
