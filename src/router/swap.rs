//! Swap entry points.
//!
//! Each entry point quotes the whole path first, checks the caller's bound,
//! pushes the input into the first pool and then calls
//! [`Pool::swap`](crate::pools::Pool::swap) hop by hop.  Intermediate
//! outputs go straight to the next pool; only the last hop pays `to`.

use std::sync::Arc;

use tracing::debug;

use super::library::{self, pair_for};
use super::{Router, SwapEthForExactOut, SwapExactEthIn, SwapExactIn, SwapExactOut};
use crate::domain::{Address, Amount, CallContext, SwapPath};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;
use crate::pools::Pool;
use crate::traits::{NativeWrapper, TokenLedger};

fn final_amount(amounts: &[Amount]) -> Result<Amount> {
    amounts
        .last()
        .copied()
        .ok_or(AmmError::InvalidPath("path needs at least two tokens"))
}

fn first_amount(amounts: &[Amount]) -> Result<Amount> {
    amounts
        .first()
        .copied()
        .ok_or(AmmError::InvalidPath("path needs at least two tokens"))
}

impl Router {
    fn first_pool(&self, path: &SwapPath) -> Result<Arc<Pool>> {
        let (input, output) = path
            .hops()
            .next()
            .ok_or(AmmError::InvalidPath("path needs at least two tokens"))?;
        pair_for(&self.factory, input, output)
    }

    fn ensure_starts_native(&self, path: &SwapPath) -> Result<()> {
        if path.first() != self.wrapped_native {
            return Err(AmmError::InvalidPath(
                "path must start with the wrapped native token",
            ));
        }
        Ok(())
    }

    fn ensure_ends_native(&self, path: &SwapPath) -> Result<()> {
        if path.last() != self.wrapped_native {
            return Err(AmmError::InvalidPath(
                "path must end with the wrapped native token",
            ));
        }
        Ok(())
    }

    /// Runs the swaps of a fully quoted path.  The input must already sit
    /// in the first pool.
    fn execute_path<L>(
        &self,
        ledger: &mut L,
        amounts: &[Amount],
        path: &SwapPath,
        to: Address,
    ) -> Result<()>
    where
        L: TokenLedger + ?Sized,
    {
        let pools = path
            .hops()
            .map(|(input, output)| pair_for(&self.factory, input, output))
            .collect::<Result<Vec<_>>>()?;
        let hops = pools.iter().zip(path.hops()).zip(amounts.iter().skip(1));
        for (index, ((pool, (input, _)), &amount_out)) in hops.enumerate() {
            let (amount0_out, amount1_out) = if input == pool.token0() {
                (Amount::ZERO, amount_out)
            } else {
                (amount_out, Amount::ZERO)
            };
            let recipient = pools.get(index + 1).map_or(to, |next| next.address());
            let (amount0_in, amount1_in) =
                pool.swap(ledger, amount0_out, amount1_out, recipient)?;
            let amount_in = if input == pool.token0() {
                amount0_in
            } else {
                amount1_in
            };
            debug_assert!(
                amounts.get(index).map_or(true, |quoted| amount_in >= *quoted),
                "pool received less than the quoted hop input"
            );
        }
        Ok(())
    }

    /// Swaps an exact input along `params.path`.
    ///
    /// Returns the amount at every step of the path.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if the deadline has passed.
    /// - [`AmmError::PairNotFound`] if a hop has no pool.
    /// - [`AmmError::InsufficientOutputAmount`] if the final output is below
    ///   `params.amount_out_min`.
    /// - Ledger and pool errors from the transfers and swaps.
    pub fn swap_exact_tokens_for_tokens<L>(
        &self,
        ledger: &mut L,
        ctx: &CallContext,
        params: &SwapExactIn,
    ) -> Result<Vec<Amount>>
    where
        L: TokenLedger + ?Sized,
    {
        params.deadline.ensure_not_expired(ctx.timestamp)?;
        let amounts = library::get_amounts_out(&self.factory, params.amount_in, &params.path)?;
        let amount_out = final_amount(&amounts)?;
        if amount_out < params.amount_out_min {
            return Err(AmmError::InsufficientOutputAmount);
        }

        let first = self.first_pool(&params.path)?;
        ledger.transfer_from(
            params.path.first(),
            self.address,
            ctx.caller,
            first.address(),
            params.amount_in,
        )?;
        self.execute_path(ledger, &amounts, &params.path, params.to)?;
        debug!(
            caller = %ctx.caller,
            hops = params.path.hop_count(),
            amount_in = %params.amount_in,
            %amount_out,
            "swapped exact input"
        );
        Ok(amounts)
    }

    /// Swaps as little input as needed for an exact output along
    /// `params.path`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if the deadline has passed.
    /// - [`AmmError::PairNotFound`] if a hop has no pool.
    /// - [`AmmError::ExcessiveInputAmount`] if the required input exceeds
    ///   `params.amount_in_max`.
    /// - Ledger and pool errors from the transfers and swaps.
    pub fn swap_tokens_for_exact_tokens<L>(
        &self,
        ledger: &mut L,
        ctx: &CallContext,
        params: &SwapExactOut,
    ) -> Result<Vec<Amount>>
    where
        L: TokenLedger + ?Sized,
    {
        params.deadline.ensure_not_expired(ctx.timestamp)?;
        let amounts = library::get_amounts_in(&self.factory, params.amount_out, &params.path)?;
        let amount_in = first_amount(&amounts)?;
        if amount_in > params.amount_in_max {
            return Err(AmmError::ExcessiveInputAmount);
        }

        let first = self.first_pool(&params.path)?;
        ledger.transfer_from(
            params.path.first(),
            self.address,
            ctx.caller,
            first.address(),
            amount_in,
        )?;
        self.execute_path(ledger, &amounts, &params.path, params.to)?;
        debug!(
            caller = %ctx.caller,
            hops = params.path.hop_count(),
            %amount_in,
            amount_out = %params.amount_out,
            "swapped for exact output"
        );
        Ok(amounts)
    }

    /// Swaps the attached native value (`ctx.value`) along a path starting
    /// with the wrapped native token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPath`] if the path does not start with the
    ///   wrapped native token.
    /// - Same as [`swap_exact_tokens_for_tokens`](Self::swap_exact_tokens_for_tokens).
    pub fn swap_exact_eth_for_tokens<L>(
        &self,
        ledger: &mut L,
        ctx: &CallContext,
        params: &SwapExactEthIn,
    ) -> Result<Vec<Amount>>
    where
        L: NativeWrapper + ?Sized,
    {
        params.deadline.ensure_not_expired(ctx.timestamp)?;
        self.ensure_wrapper(ledger)?;
        self.ensure_starts_native(&params.path)?;
        let amounts = library::get_amounts_out(&self.factory, ctx.value, &params.path)?;
        let amount_out = final_amount(&amounts)?;
        if amount_out < params.amount_out_min {
            return Err(AmmError::InsufficientOutputAmount);
        }

        let first = self.first_pool(&params.path)?;
        self.collect_native(ledger, ctx)?;
        ledger.deposit(self.address, ctx.value)?;
        ledger.transfer(self.wrapped_native, self.address, first.address(), ctx.value)?;
        self.execute_path(ledger, &amounts, &params.path, params.to)?;
        debug!(
            caller = %ctx.caller,
            hops = params.path.hop_count(),
            amount_in = %ctx.value,
            %amount_out,
            "swapped exact native input"
        );
        Ok(amounts)
    }

    /// Buys an exact output with at most the attached native value,
    /// refunding the unused part to the caller.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPath`] if the path does not start with the
    ///   wrapped native token.
    /// - [`AmmError::ExcessiveInputAmount`] if the required input exceeds
    ///   `ctx.value`.
    /// - Same as [`swap_tokens_for_exact_tokens`](Self::swap_tokens_for_exact_tokens).
    pub fn swap_eth_for_exact_tokens<L>(
        &self,
        ledger: &mut L,
        ctx: &CallContext,
        params: &SwapEthForExactOut,
    ) -> Result<Vec<Amount>>
    where
        L: NativeWrapper + ?Sized,
    {
        params.deadline.ensure_not_expired(ctx.timestamp)?;
        self.ensure_wrapper(ledger)?;
        self.ensure_starts_native(&params.path)?;
        let amounts = library::get_amounts_in(&self.factory, params.amount_out, &params.path)?;
        let amount_in = first_amount(&amounts)?;
        if amount_in > ctx.value {
            return Err(AmmError::ExcessiveInputAmount);
        }
        let refund = ctx.value.safe_sub(&amount_in)?;

        let first = self.first_pool(&params.path)?;
        self.collect_native(ledger, ctx)?;
        ledger.deposit(self.address, amount_in)?;
        ledger.transfer(self.wrapped_native, self.address, first.address(), amount_in)?;
        self.execute_path(ledger, &amounts, &params.path, params.to)?;
        self.refund_native(ledger, ctx.caller, refund)?;
        debug!(
            caller = %ctx.caller,
            hops = params.path.hop_count(),
            %amount_in,
            %refund,
            amount_out = %params.amount_out,
            "swapped native for exact output"
        );
        Ok(amounts)
    }

    /// Swaps an exact token input along a path ending with the wrapped
    /// native token, and sends the unwrapped output to `params.to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPath`] if the path does not end with the
    ///   wrapped native token.
    /// - Same as [`swap_exact_tokens_for_tokens`](Self::swap_exact_tokens_for_tokens).
    pub fn swap_exact_tokens_for_eth<L>(
        &self,
        ledger: &mut L,
        ctx: &CallContext,
        params: &SwapExactIn,
    ) -> Result<Vec<Amount>>
    where
        L: NativeWrapper + ?Sized,
    {
        params.deadline.ensure_not_expired(ctx.timestamp)?;
        self.ensure_wrapper(ledger)?;
        self.ensure_ends_native(&params.path)?;
        let amounts = library::get_amounts_out(&self.factory, params.amount_in, &params.path)?;
        let amount_out = final_amount(&amounts)?;
        if amount_out < params.amount_out_min {
            return Err(AmmError::InsufficientOutputAmount);
        }

        let first = self.first_pool(&params.path)?;
        ledger.transfer_from(
            params.path.first(),
            self.address,
            ctx.caller,
            first.address(),
            params.amount_in,
        )?;
        self.execute_path(ledger, &amounts, &params.path, self.address)?;
        ledger.withdraw(self.address, amount_out)?;
        ledger.send_native(self.address, params.to, amount_out)?;
        debug!(
            caller = %ctx.caller,
            hops = params.path.hop_count(),
            amount_in = %params.amount_in,
            %amount_out,
            "swapped exact input for native"
        );
        Ok(amounts)
    }

    /// Swaps as little token input as needed for an exact native output.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPath`] if the path does not end with the
    ///   wrapped native token.
    /// - Same as [`swap_tokens_for_exact_tokens`](Self::swap_tokens_for_exact_tokens).
    pub fn swap_tokens_for_exact_eth<L>(
        &self,
        ledger: &mut L,
        ctx: &CallContext,
        params: &SwapExactOut,
    ) -> Result<Vec<Amount>>
    where
        L: NativeWrapper + ?Sized,
    {
        params.deadline.ensure_not_expired(ctx.timestamp)?;
        self.ensure_wrapper(ledger)?;
        self.ensure_ends_native(&params.path)?;
        let amounts = library::get_amounts_in(&self.factory, params.amount_out, &params.path)?;
        let amount_in = first_amount(&amounts)?;
        if amount_in > params.amount_in_max {
            return Err(AmmError::ExcessiveInputAmount);
        }

        let first = self.first_pool(&params.path)?;
        ledger.transfer_from(
            params.path.first(),
            self.address,
            ctx.caller,
            first.address(),
            amount_in,
        )?;
        self.execute_path(ledger, &amounts, &params.path, self.address)?;
        ledger.withdraw(self.address, params.amount_out)?;
        ledger.send_native(self.address, params.to, params.amount_out)?;
        debug!(
            caller = %ctx.caller,
            hops = params.path.hop_count(),
            %amount_in,
            amount_out = %params.amount_out,
            "swapped for exact native output"
        );
        Ok(amounts)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;
    use crate::domain::{Deadline, Timestamp};
    use crate::factory::PairFactory;
    use crate::host::MemoryLedger;

    const E18: u128 = 1_000_000_000_000_000_000;
    const TOKEN_A: Address = Address::repeat_byte(1);
    const TOKEN_B: Address = Address::repeat_byte(2);
    const WETH: Address = Address::repeat_byte(0xee);
    const ROUTER: Address = Address::repeat_byte(0x70);
    const ALICE: Address = Address::repeat_byte(0xa1);
    const BOB: Address = Address::repeat_byte(0xb0);

    fn seed(router: &Router, ledger: &mut MemoryLedger, a: Address, b: Address) {
        let Ok(pool) = router.factory().create_pair(a, b) else {
            panic!("expected Ok");
        };
        let (Ok(()), Ok(())) = (
            ledger.mint(a, pool.address(), Amount::new(10 * E18)),
            ledger.mint(b, pool.address(), Amount::new(10 * E18)),
        ) else {
            panic!("expected Ok");
        };
        let Ok(_) = pool.mint(ledger, ALICE) else {
            panic!("expected Ok");
        };
    }

    fn setup() -> (Router, MemoryLedger) {
        let factory = Arc::new(PairFactory::new(
            Address::repeat_byte(0xfa),
            PoolConfig::default(),
        ));
        let router = Router::new(ROUTER, factory, WETH);
        let mut ledger = MemoryLedger::new(WETH);
        seed(&router, &mut ledger, TOKEN_A, TOKEN_B);
        seed(&router, &mut ledger, WETH, TOKEN_B);
        let (Ok(()), Ok(()), Ok(())) = (
            ledger.mint(TOKEN_A, ALICE, Amount::new(100 * E18)),
            ledger.approve(TOKEN_A, ALICE, ROUTER, Amount::MAX),
            ledger.credit_native(ALICE, Amount::new(100 * E18)),
        ) else {
            panic!("expected Ok");
        };
        (router, ledger)
    }

    fn ctx() -> CallContext {
        CallContext::new(ALICE, Timestamp::from_secs(1_000))
    }

    fn path(tokens: &[Address]) -> SwapPath {
        let Ok(path) = SwapPath::new(tokens.to_vec()) else {
            panic!("valid path");
        };
        path
    }

    #[test]
    fn exact_input_single_hop() {
        let (router, mut ledger) = setup();
        let params = SwapExactIn {
            amount_in: Amount::new(E18),
            amount_out_min: Amount::ZERO,
            path: path(&[TOKEN_A, TOKEN_B]),
            to: BOB,
            deadline: Deadline::NEVER,
        };
        let Ok(amounts) = router.swap_exact_tokens_for_tokens(&mut ledger, &ctx(), &params)
        else {
            panic!("expected Ok");
        };
        let out = Amount::new(906_610_893_880_149_131);
        assert_eq!(amounts, vec![Amount::new(E18), out]);
        assert_eq!(ledger.balance_of(TOKEN_B, BOB), out);
        assert_eq!(ledger.balance_of(TOKEN_A, ALICE), Amount::new(99 * E18));
    }

    #[test]
    fn slippage_checked_before_transfer() {
        let (router, mut ledger) = setup();
        let params = SwapExactIn {
            amount_in: Amount::new(E18),
            amount_out_min: Amount::new(E18),
            path: path(&[TOKEN_A, TOKEN_B]),
            to: BOB,
            deadline: Deadline::NEVER,
        };
        assert_eq!(
            router
                .swap_exact_tokens_for_tokens(&mut ledger, &ctx(), &params)
                .err(),
            Some(AmmError::InsufficientOutputAmount)
        );
        assert_eq!(ledger.balance_of(TOKEN_A, ALICE), Amount::new(100 * E18));
    }

    #[test]
    fn exact_output_respects_maximum() {
        let (router, mut ledger) = setup();
        let params = SwapExactOut {
            amount_out: Amount::new(E18),
            amount_in_max: Amount::new(E18),
            path: path(&[TOKEN_A, TOKEN_B]),
            to: BOB,
            deadline: Deadline::NEVER,
        };
        assert_eq!(
            router
                .swap_tokens_for_exact_tokens(&mut ledger, &ctx(), &params)
                .err(),
            Some(AmmError::ExcessiveInputAmount)
        );
        let params = SwapExactOut {
            amount_in_max: Amount::new(2 * E18),
            ..params
        };
        let Ok(amounts) = router.swap_tokens_for_exact_tokens(&mut ledger, &ctx(), &params)
        else {
            panic!("expected Ok");
        };
        assert_eq!(amounts.last(), Some(&Amount::new(E18)));
        assert_eq!(ledger.balance_of(TOKEN_B, BOB), Amount::new(E18));
    }

    #[test]
    fn native_paths_must_touch_wrapped_token() {
        let (router, mut ledger) = setup();
        let params = SwapExactEthIn {
            amount_out_min: Amount::ZERO,
            path: path(&[TOKEN_A, TOKEN_B]),
            to: BOB,
            deadline: Deadline::NEVER,
        };
        let ctx = ctx().with_value(Amount::new(E18));
        let Err(AmmError::InvalidPath(_)) =
            router.swap_exact_eth_for_tokens(&mut ledger, &ctx, &params)
        else {
            panic!("expected InvalidPath");
        };
        let params = SwapExactIn {
            amount_in: Amount::new(E18),
            amount_out_min: Amount::ZERO,
            path: path(&[TOKEN_A, TOKEN_B]),
            to: BOB,
            deadline: Deadline::NEVER,
        };
        let Err(AmmError::InvalidPath(_)) =
            router.swap_exact_tokens_for_eth(&mut ledger, &ctx, &params)
        else {
            panic!("expected InvalidPath");
        };
    }

    #[test]
    fn native_in_two_hops() {
        let (router, mut ledger) = setup();
        let params = SwapExactEthIn {
            amount_out_min: Amount::ZERO,
            path: path(&[WETH, TOKEN_B, TOKEN_A]),
            to: BOB,
            deadline: Deadline::NEVER,
        };
        let ctx = ctx().with_value(Amount::new(E18));
        let Ok(amounts) = router.swap_exact_eth_for_tokens(&mut ledger, &ctx, &params) else {
            panic!("expected Ok");
        };
        assert_eq!(
            amounts.last(),
            Some(&Amount::new(828_961_933_061_679_796))
        );
        assert_eq!(ledger.native_balance_of(ALICE), Amount::new(99 * E18));
        assert_eq!(
            ledger.balance_of(TOKEN_A, BOB),
            Amount::new(828_961_933_061_679_796)
        );
        assert!(ledger.balance_of(WETH, ROUTER).is_zero());
    }

    #[test]
    fn tokens_for_exact_native() {
        let (router, mut ledger) = setup();
        let params = SwapExactOut {
            amount_out: Amount::new(E18 / 2),
            amount_in_max: Amount::new(10 * E18),
            path: path(&[TOKEN_A, TOKEN_B, WETH]),
            to: BOB,
            deadline: Deadline::NEVER,
        };
        let Ok(_) = router.swap_tokens_for_exact_eth(&mut ledger, &ctx(), &params) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.native_balance_of(BOB), Amount::new(E18 / 2));
        assert!(ledger.native_balance_of(ROUTER).is_zero());
        assert!(ledger.balance_of(WETH, ROUTER).is_zero());
    }

    #[test]
    fn native_for_exact_tokens_refunds_excess() {
        let (router, mut ledger) = setup();
        let params = SwapEthForExactOut {
            amount_out: Amount::new(E18),
            path: path(&[WETH, TOKEN_B]),
            to: BOB,
            deadline: Deadline::NEVER,
        };
        let paid = Amount::new(1_114_454_474_534_715_257);
        let short = ctx().with_value(Amount::new(E18));
        assert_eq!(
            router
                .swap_eth_for_exact_tokens(&mut ledger, &short, &params)
                .err(),
            Some(AmmError::ExcessiveInputAmount)
        );

        let ctx = ctx().with_value(Amount::new(2 * E18));
        let Ok(amounts) = router.swap_eth_for_exact_tokens(&mut ledger, &ctx, &params) else {
            panic!("expected Ok");
        };
        assert_eq!(amounts, vec![paid, Amount::new(E18)]);
        assert_eq!(ledger.balance_of(TOKEN_B, BOB), Amount::new(E18));
        assert_eq!(
            ledger.native_balance_of(ALICE),
            Amount::new(100 * E18 - paid.get())
        );
        assert!(ledger.native_balance_of(ROUTER).is_zero());
    }
}
