//! Read-only quoting math shared by the router entry points.
//!
//! Every function here is pure given the reserves it reads.  The fee used
//! for path quotes is the factory's [`PoolConfig`](crate::config::PoolConfig)
//! fee, the same one each pool checks swaps against, so an amount quoted
//! here is an amount the pool accepts.
//!
//! # Formulas (`D = 10 000`, `f` = fee in basis points)
//!
//! ```text
//! quote          = amount_a · reserve_b / reserve_a
//! get_amount_out = in·(D−f)·r_out / (r_in·D + in·(D−f))
//! get_amount_in  = r_in·out·D / ((r_out−out)·(D−f)) + 1
//! ```

use std::sync::Arc;

use alloy_primitives::U256;

use crate::domain::{Address, Amount, FeeTier, Rounding, SwapPath};
use crate::error::{AmmError, Result};
use crate::factory::PairFactory;
use crate::math::mul_div;
use crate::pools::Pool;

fn narrow(value: U256) -> Result<Amount> {
    u128::try_from(value)
        .map(Amount::new)
        .map_err(|_| AmmError::Overflow("quote exceeds 128 bits"))
}

fn mul(a: U256, b: U256) -> Result<U256> {
    a.checked_mul(b)
        .ok_or(AmmError::Overflow("quote intermediate exceeds 256 bits"))
}

/// Amount of token B equivalent to `amount_a` at the current reserve ratio.
///
/// # Errors
///
/// - [`AmmError::InsufficientAmount`] if `amount_a` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::Amount;
/// use hydra_cpmm::router::library::quote;
///
/// let b = quote(Amount::new(1_000), Amount::new(10_000), Amount::new(20_000));
/// assert_eq!(b, Ok(Amount::new(2_000)));
/// ```
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount> {
    if amount_a.is_zero() {
        return Err(AmmError::InsufficientAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    mul_div(
        amount_a.get(),
        reserve_b.get(),
        reserve_a.get(),
        Rounding::Down,
    )
    .map(Amount::new)
}

/// Maximum output for an exact input, after the fee.
///
/// # Errors
///
/// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
/// - [`AmmError::InvalidConfiguration`] if the fee is 100% or more.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::{Amount, FeeTier};
/// use hydra_cpmm::router::library::get_amount_out;
///
/// let e18 = 10u128.pow(18);
/// let out = get_amount_out(
///     Amount::new(e18),
///     Amount::new(10 * e18),
///     Amount::new(10 * e18),
///     FeeTier::TIER_0_30_PERCENT,
/// );
/// assert_eq!(out, Ok(Amount::new(906_610_893_880_149_131)));
/// ```
pub fn get_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount> {
    if amount_in.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let retained = U256::from(fee.retained_multiplier()?);
    let in_with_fee = U256::from(amount_in.get()) * retained;
    let numerator = mul(in_with_fee, U256::from(reserve_out.get()))?;
    let denominator =
        U256::from(reserve_in.get()) * U256::from(FeeTier::DENOMINATOR) + in_with_fee;
    narrow(numerator / denominator)
}

/// Minimum input for an exact output, after the fee.
///
/// # Errors
///
/// - [`AmmError::InsufficientOutputAmount`] if `amount_out` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero or
///   `amount_out` is not below `reserve_out`.
/// - [`AmmError::InvalidConfiguration`] if the fee is 100% or more.
pub fn get_amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount> {
    if amount_out.is_zero() {
        return Err(AmmError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    let retained = U256::from(fee.retained_multiplier()?);
    let numerator = mul(
        U256::from(reserve_in.get()) * U256::from(amount_out.get()),
        U256::from(FeeTier::DENOMINATOR),
    )?;
    let denominator = U256::from(reserve_out.get() - amount_out.get()) * retained;
    narrow(numerator / denominator + U256::from(1u8))
}

/// Looks up the registered pool for `(token_a, token_b)`.
///
/// # Errors
///
/// [`AmmError::PairNotFound`] if no pool is registered.
pub fn pair_for(factory: &PairFactory, token_a: Address, token_b: Address) -> Result<Arc<Pool>> {
    factory
        .get_pair(token_a, token_b)
        .ok_or(AmmError::PairNotFound)
}

/// Reserves of `pool` ordered as `(token_a side, other side)`.
#[must_use]
pub fn oriented_reserves(pool: &Pool, token_a: Address) -> (Amount, Amount) {
    let (reserve0, reserve1) = pool.get_reserves();
    if token_a == pool.token0() {
        (reserve0, reserve1)
    } else {
        (reserve1, reserve0)
    }
}

/// Reserves of the `(token_a, token_b)` pool, ordered as the arguments.
///
/// # Errors
///
/// [`AmmError::PairNotFound`] if no pool is registered.
pub fn get_reserves(
    factory: &PairFactory,
    token_a: Address,
    token_b: Address,
) -> Result<(Amount, Amount)> {
    let pool = pair_for(factory, token_a, token_b)?;
    Ok(oriented_reserves(&pool, token_a))
}

/// Amounts at every step of `path` for an exact input.
///
/// The first element is `amount_in`; the last is the final output.
///
/// # Errors
///
/// [`AmmError::PairNotFound`] for a missing hop, plus any error of
/// [`get_amount_out`].
pub fn get_amounts_out(
    factory: &PairFactory,
    amount_in: Amount,
    path: &SwapPath,
) -> Result<Vec<Amount>> {
    let fee = factory.config().fee_tier();
    let mut amounts = Vec::with_capacity(path.len());
    amounts.push(amount_in);
    let mut current = amount_in;
    for (input, output) in path.hops() {
        let (reserve_in, reserve_out) = get_reserves(factory, input, output)?;
        current = get_amount_out(current, reserve_in, reserve_out, fee)?;
        amounts.push(current);
    }
    Ok(amounts)
}

/// Amounts at every step of `path` for an exact output, computed from the
/// last hop backwards.
///
/// The first element is the required input; the last is `amount_out`.
///
/// # Errors
///
/// [`AmmError::PairNotFound`] for a missing hop, plus any error of
/// [`get_amount_in`].
pub fn get_amounts_in(
    factory: &PairFactory,
    amount_out: Amount,
    path: &SwapPath,
) -> Result<Vec<Amount>> {
    let fee = factory.config().fee_tier();
    let mut amounts = Vec::with_capacity(path.len());
    amounts.push(amount_out);
    let mut current = amount_out;
    for (input, output) in path.hops().rev() {
        let (reserve_in, reserve_out) = get_reserves(factory, input, output)?;
        current = get_amount_in(current, reserve_in, reserve_out, fee)?;
        amounts.push(current);
    }
    amounts.reverse();
    Ok(amounts)
}
