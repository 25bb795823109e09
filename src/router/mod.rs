//! Stateless orchestration over the pair registry.
//!
//! The [`Router`] turns user intents (deposit, withdraw, swap along a path)
//! into the push-then-call sequences the pools expect.  It computes every
//! amount and checks every slippage bound before the first transfer, then
//! moves tokens with the caller's allowance and drives each pool in path
//! order.
//!
//! Entry points are grouped as:
//!
//! | Group | Entry points |
//! |-------|--------------|
//! | Liquidity | [`add_liquidity`](Router::add_liquidity), [`add_liquidity_eth`](Router::add_liquidity_eth), [`remove_liquidity`](Router::remove_liquidity), [`remove_liquidity_eth`](Router::remove_liquidity_eth) |
//! | Token swaps | [`swap_exact_tokens_for_tokens`](Router::swap_exact_tokens_for_tokens), [`swap_tokens_for_exact_tokens`](Router::swap_tokens_for_exact_tokens) |
//! | Native swaps | [`swap_exact_eth_for_tokens`](Router::swap_exact_eth_for_tokens), [`swap_eth_for_exact_tokens`](Router::swap_eth_for_exact_tokens), [`swap_exact_tokens_for_eth`](Router::swap_exact_tokens_for_eth), [`swap_tokens_for_exact_eth`](Router::swap_tokens_for_exact_eth) |
//! | Quotes | [`library`] |
//!
//! # Allowances
//!
//! Tokens and LP shares are pulled from `ctx.caller` with `transfer_from`
//! using the router's address as spender, so callers approve the router
//! first.

pub mod library;
mod liquidity;
mod params;
mod swap;

use std::sync::Arc;

pub use params::{
    AddLiquidity, AddLiquidityEth, LiquidityAdded, RemoveLiquidity, RemoveLiquidityEth,
    SwapEthForExactOut, SwapExactEthIn, SwapExactIn, SwapExactOut,
};

use crate::domain::{Address, Amount, CallContext, SwapPath};
use crate::error::{AmmError, Result};
use crate::factory::PairFactory;
use crate::traits::NativeWrapper;

/// Multi-hop swap and liquidity router.
///
/// Holds no state of its own beyond immutable wiring: its ledger address,
/// a handle to the [`PairFactory`] and the wrapped native token id.
#[derive(Debug, Clone)]
pub struct Router {
    address: Address,
    factory: Arc<PairFactory>,
    wrapped_native: Address,
}

impl Router {
    /// Creates a router over `factory`.
    #[must_use]
    pub fn new(address: Address, factory: Arc<PairFactory>, wrapped_native: Address) -> Self {
        Self {
            address,
            factory,
            wrapped_native,
        }
    }

    /// The router's own ledger address, used as spender for allowances.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The pair registry the router trades against.
    #[must_use]
    pub const fn factory(&self) -> &Arc<PairFactory> {
        &self.factory
    }

    /// Ledger id of the wrapped native token.
    #[must_use]
    pub const fn wrapped_native(&self) -> Address {
        self.wrapped_native
    }

    /// Amounts at every step of `path` for an exact input.
    ///
    /// # Errors
    ///
    /// See [`library::get_amounts_out`].
    pub fn get_amounts_out(&self, amount_in: Amount, path: &SwapPath) -> Result<Vec<Amount>> {
        library::get_amounts_out(&self.factory, amount_in, path)
    }

    /// Amounts at every step of `path` for an exact output.
    ///
    /// # Errors
    ///
    /// See [`library::get_amounts_in`].
    pub fn get_amounts_in(&self, amount_out: Amount, path: &SwapPath) -> Result<Vec<Amount>> {
        library::get_amounts_in(&self.factory, amount_out, path)
    }

    /// Reserves of the `(token_a, token_b)` pool in argument order.
    ///
    /// # Errors
    ///
    /// [`AmmError::PairNotFound`] if the pair is not registered.
    pub fn get_reserves(&self, token_a: Address, token_b: Address) -> Result<(Amount, Amount)> {
        library::get_reserves(&self.factory, token_a, token_b)
    }

    fn ensure_wrapper<L>(&self, ledger: &L) -> Result<()>
    where
        L: NativeWrapper + ?Sized,
    {
        if ledger.wrapped_token() != self.wrapped_native {
            return Err(AmmError::InvalidConfiguration(
                "ledger wraps a different native token",
            ));
        }
        Ok(())
    }

    /// Moves the call's attached native value from the caller to the
    /// router.
    fn collect_native<L>(&self, ledger: &mut L, ctx: &CallContext) -> Result<()>
    where
        L: NativeWrapper + ?Sized,
    {
        if ctx.value.is_zero() {
            return Ok(());
        }
        ledger.send_native(ctx.caller, self.address, ctx.value)
    }

    fn refund_native<L>(&self, ledger: &mut L, to: Address, amount: Amount) -> Result<()>
    where
        L: NativeWrapper + ?Sized,
    {
        if amount.is_zero() {
            return Ok(());
        }
        ledger.send_native(self.address, to, amount)
    }
}
