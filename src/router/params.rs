//! Argument bundles for the router entry points.
//!
//! Every bundle carries the recipient `to` and a [`Deadline`]; the caller
//! and the attached native value come from the
//! [`CallContext`](crate::domain::CallContext).  For the native-asset entry
//! points the native amount is always `ctx.value`.

use crate::domain::{Address, Amount, Deadline, Liquidity, SwapPath};

/// Arguments of [`Router::add_liquidity`](super::Router::add_liquidity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidity {
    pub token_a: Address,
    pub token_b: Address,
    pub amount_a_desired: Amount,
    pub amount_b_desired: Amount,
    pub amount_a_min: Amount,
    pub amount_b_min: Amount,
    pub to: Address,
    pub deadline: Deadline,
}

/// Arguments of [`Router::add_liquidity_eth`](super::Router::add_liquidity_eth).
///
/// The desired native amount is `ctx.value`; any part of it not deposited
/// is refunded to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidityEth {
    pub token: Address,
    pub amount_token_desired: Amount,
    pub amount_token_min: Amount,
    pub amount_eth_min: Amount,
    pub to: Address,
    pub deadline: Deadline,
}

/// Arguments of [`Router::remove_liquidity`](super::Router::remove_liquidity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLiquidity {
    pub token_a: Address,
    pub token_b: Address,
    pub liquidity: Liquidity,
    pub amount_a_min: Amount,
    pub amount_b_min: Amount,
    pub to: Address,
    pub deadline: Deadline,
}

/// Arguments of [`Router::remove_liquidity_eth`](super::Router::remove_liquidity_eth).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLiquidityEth {
    pub token: Address,
    pub liquidity: Liquidity,
    pub amount_token_min: Amount,
    pub amount_eth_min: Amount,
    pub to: Address,
    pub deadline: Deadline,
}

/// Exact-input swap along `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactIn {
    pub amount_in: Amount,
    pub amount_out_min: Amount,
    pub path: SwapPath,
    pub to: Address,
    pub deadline: Deadline,
}

/// Exact-output swap along `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactOut {
    pub amount_out: Amount,
    pub amount_in_max: Amount,
    pub path: SwapPath,
    pub to: Address,
    pub deadline: Deadline,
}

/// Exact native input (`ctx.value`) swapped along `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactEthIn {
    pub amount_out_min: Amount,
    pub path: SwapPath,
    pub to: Address,
    pub deadline: Deadline,
}

/// Exact output bought with at most `ctx.value` native input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapEthForExactOut {
    pub amount_out: Amount,
    pub path: SwapPath,
    pub to: Address,
    pub deadline: Deadline,
}

/// Outcome of an add-liquidity call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityAdded {
    /// Amount of the first token (or the non-native token) deposited.
    pub amount_a: Amount,
    /// Amount of the second token (or native value) deposited.
    pub amount_b: Amount,
    /// LP shares minted to `to`.
    pub liquidity: Liquidity,
}
