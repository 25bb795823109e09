//! Liquidity entry points.

use std::sync::Arc;

use tracing::debug;

use super::library::{self, oriented_reserves};
use super::{AddLiquidity, AddLiquidityEth, LiquidityAdded, RemoveLiquidity, RemoveLiquidityEth};
use super::Router;
use crate::domain::{Address, Amount, CallContext, Liquidity};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;
use crate::pools::Pool;
use crate::traits::{NativeWrapper, TokenLedger};

/// Deposit amounts for `token_a` and its counterpart that keep the pool's
/// current ratio without exceeding either desired amount.
///
/// An empty pool takes both desired amounts as they are.
fn optimal_amounts(
    pool: &Pool,
    token_a: Address,
    (a_desired, b_desired): (Amount, Amount),
    (a_min, b_min): (Amount, Amount),
) -> Result<(Amount, Amount)> {
    let (reserve_a, reserve_b) = oriented_reserves(pool, token_a);
    if reserve_a.is_zero() && reserve_b.is_zero() {
        return Ok((a_desired, b_desired));
    }
    let b_optimal = library::quote(a_desired, reserve_a, reserve_b)?;
    if b_optimal <= b_desired {
        if b_optimal < b_min {
            return Err(AmmError::InsufficientBAmount);
        }
        return Ok((a_desired, b_optimal));
    }
    let a_optimal = library::quote(b_desired, reserve_b, reserve_a)?;
    if a_optimal > a_desired || a_optimal < a_min {
        return Err(AmmError::InsufficientAAmount);
    }
    Ok((a_optimal, b_desired))
}

fn orient(pool: &Pool, token_a: Address, (amount0, amount1): (Amount, Amount)) -> (Amount, Amount) {
    if token_a == pool.token0() {
        (amount0, amount1)
    } else {
        (amount1, amount0)
    }
}

impl Router {
    fn pair_or_create(&self, token_a: Address, token_b: Address) -> Result<Arc<Pool>> {
        match self.factory.get_pair(token_a, token_b) {
            Some(pool) => Ok(pool),
            None => self.factory.create_pair(token_a, token_b),
        }
    }

    /// Deposits both tokens at the pool's current ratio and mints LP shares
    /// to `params.to`, creating the pair first if it does not exist.
    ///
    /// Both tokens are pulled from `ctx.caller` with the router as spender.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if the deadline has passed.
    /// - [`AmmError::InsufficientAAmount`] / [`AmmError::InsufficientBAmount`]
    ///   if the ratio-adjusted amount falls below its minimum.
    /// - Validation errors from [`PairFactory::create_pair`](crate::factory::PairFactory::create_pair).
    /// - Ledger and pool errors from the transfers and the mint.
    pub fn add_liquidity<L>(
        &self,
        ledger: &mut L,
        ctx: &CallContext,
        params: &AddLiquidity,
    ) -> Result<LiquidityAdded>
    where
        L: TokenLedger + ?Sized,
    {
        params.deadline.ensure_not_expired(ctx.timestamp)?;
        let pool = self.pair_or_create(params.token_a, params.token_b)?;
        let (amount_a, amount_b) = optimal_amounts(
            &pool,
            params.token_a,
            (params.amount_a_desired, params.amount_b_desired),
            (params.amount_a_min, params.amount_b_min),
        )?;

        ledger.transfer_from(
            params.token_a,
            self.address,
            ctx.caller,
            pool.address(),
            amount_a,
        )?;
        ledger.transfer_from(
            params.token_b,
            self.address,
            ctx.caller,
            pool.address(),
            amount_b,
        )?;
        let liquidity = pool.mint(ledger, params.to)?;
        debug!(
            pool = %pool.address(),
            caller = %ctx.caller,
            %amount_a,
            %amount_b,
            %liquidity,
            "added liquidity"
        );
        Ok(LiquidityAdded {
            amount_a,
            amount_b,
            liquidity,
        })
    }

    /// Deposits a token against attached native value.
    ///
    /// `ctx.value` is the desired native amount.  It is collected in full,
    /// the ratio-adjusted part is wrapped and deposited, and the rest is
    /// refunded to the caller.  In the result, `amount_a` is the token and
    /// `amount_b` the native amount.
    ///
    /// # Errors
    ///
    /// Same as [`add_liquidity`](Self::add_liquidity), plus
    /// [`AmmError::InvalidConfiguration`] if the ledger wraps a different
    /// native token than the router.
    pub fn add_liquidity_eth<L>(
        &self,
        ledger: &mut L,
        ctx: &CallContext,
        params: &AddLiquidityEth,
    ) -> Result<LiquidityAdded>
    where
        L: NativeWrapper + ?Sized,
    {
        params.deadline.ensure_not_expired(ctx.timestamp)?;
        self.ensure_wrapper(ledger)?;
        let pool = self.pair_or_create(params.token, self.wrapped_native)?;
        let (amount_token, amount_eth) = optimal_amounts(
            &pool,
            params.token,
            (params.amount_token_desired, ctx.value),
            (params.amount_token_min, params.amount_eth_min),
        )?;
        let refund = ctx.value.safe_sub(&amount_eth)?;

        ledger.transfer_from(
            params.token,
            self.address,
            ctx.caller,
            pool.address(),
            amount_token,
        )?;
        self.collect_native(ledger, ctx)?;
        ledger.deposit(self.address, amount_eth)?;
        ledger.transfer(self.wrapped_native, self.address, pool.address(), amount_eth)?;
        let liquidity = pool.mint(ledger, params.to)?;
        self.refund_native(ledger, ctx.caller, refund)?;
        debug!(
            pool = %pool.address(),
            caller = %ctx.caller,
            %amount_token,
            %amount_eth,
            %refund,
            %liquidity,
            "added liquidity with native value"
        );
        Ok(LiquidityAdded {
            amount_a: amount_token,
            amount_b: amount_eth,
            liquidity,
        })
    }

    /// Burns `liquidity` of the caller's LP shares and sends both tokens to
    /// `params.to`.
    ///
    /// Returns `(amount_a, amount_b)` in argument order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if the deadline has passed.
    /// - [`AmmError::PairNotFound`] if the pair is not registered.
    /// - [`AmmError::InsufficientAAmount`] / [`AmmError::InsufficientBAmount`]
    ///   if an amount falls below its minimum.
    /// - [`AmmError::InsufficientAllowance`] if the caller has not approved
    ///   the router for the LP shares.
    pub fn remove_liquidity<L>(
        &self,
        ledger: &mut L,
        ctx: &CallContext,
        params: &RemoveLiquidity,
    ) -> Result<(Amount, Amount)>
    where
        L: TokenLedger + ?Sized,
    {
        params.deadline.ensure_not_expired(ctx.timestamp)?;
        let (amount_a, amount_b) = self.withdraw_to(
            ledger,
            ctx,
            (params.token_a, params.token_b),
            params.liquidity,
            (params.amount_a_min, params.amount_b_min),
            params.to,
        )?;
        debug!(
            caller = %ctx.caller,
            liquidity = %params.liquidity,
            %amount_a,
            %amount_b,
            "removed liquidity"
        );
        Ok((amount_a, amount_b))
    }

    /// Burns LP shares of a token/wrapped-native pool, sends the token to
    /// `params.to` and unwraps the native side to it.
    ///
    /// Returns `(amount_token, amount_eth)`.
    ///
    /// # Errors
    ///
    /// Same as [`remove_liquidity`](Self::remove_liquidity), plus
    /// [`AmmError::InvalidConfiguration`] if the ledger wraps a different
    /// native token than the router.
    pub fn remove_liquidity_eth<L>(
        &self,
        ledger: &mut L,
        ctx: &CallContext,
        params: &RemoveLiquidityEth,
    ) -> Result<(Amount, Amount)>
    where
        L: NativeWrapper + ?Sized,
    {
        params.deadline.ensure_not_expired(ctx.timestamp)?;
        self.ensure_wrapper(ledger)?;
        let (amount_token, amount_eth) = self.withdraw_to(
            ledger,
            ctx,
            (params.token, self.wrapped_native),
            params.liquidity,
            (params.amount_token_min, params.amount_eth_min),
            self.address,
        )?;
        ledger.transfer(params.token, self.address, params.to, amount_token)?;
        ledger.withdraw(self.address, amount_eth)?;
        ledger.send_native(self.address, params.to, amount_eth)?;
        debug!(
            caller = %ctx.caller,
            liquidity = %params.liquidity,
            %amount_token,
            %amount_eth,
            "removed liquidity with native value"
        );
        Ok((amount_token, amount_eth))
    }

    fn withdraw_to<L>(
        &self,
        ledger: &mut L,
        ctx: &CallContext,
        (token_a, token_b): (Address, Address),
        liquidity: Liquidity,
        (a_min, b_min): (Amount, Amount),
        to: Address,
    ) -> Result<(Amount, Amount)>
    where
        L: TokenLedger + ?Sized,
    {
        let pool = library::pair_for(&self.factory, token_a, token_b)?;
        let burned = pool.balance_of(pool.address()).safe_add(&liquidity)?;
        let (amount_a, amount_b) = orient(&pool, token_a, pool.preview_burn(burned)?);
        if amount_a < a_min {
            return Err(AmmError::InsufficientAAmount);
        }
        if amount_b < b_min {
            return Err(AmmError::InsufficientBAmount);
        }

        pool.transfer_from(self.address, ctx.caller, pool.address(), liquidity)?;
        let returned = pool.burn(ledger, to)?;
        Ok(orient(&pool, token_a, returned))
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

    fn setup() -> (Router, MemoryLedger) {
        let factory = Arc::new(PairFactory::new(
            Address::repeat_byte(0xfa),
            PoolConfig::default(),
        ));
        let router = Router::new(ROUTER, factory, WETH);
        let mut ledger = MemoryLedger::new(WETH);
        for token in [TOKEN_A, TOKEN_B] {
            let (Ok(()), Ok(())) = (
                ledger.mint(token, ALICE, Amount::new(1_000 * E18)),
                ledger.approve(token, ALICE, ROUTER, Amount::MAX),
            ) else {
                panic!("expected Ok");
            };
        }
        (router, ledger)
    }

    fn ctx() -> CallContext {
        CallContext::new(ALICE, Timestamp::from_secs(1_000))
    }

    fn add(amount_a: u128, amount_b: u128, min_a: u128, min_b: u128) -> AddLiquidity {
        AddLiquidity {
            token_a: TOKEN_A,
            token_b: TOKEN_B,
            amount_a_desired: Amount::new(amount_a),
            amount_b_desired: Amount::new(amount_b),
            amount_a_min: Amount::new(min_a),
            amount_b_min: Amount::new(min_b),
            to: ALICE,
            deadline: Deadline::NEVER,
        }
    }

    #[test]
    fn first_deposit_creates_pair() {
        let (router, mut ledger) = setup();
        let Ok(added) = router.add_liquidity(&mut ledger, &ctx(), &add(E18, 4 * E18, 0, 0)) else {
            panic!("expected Ok");
        };
        assert_eq!(added.liquidity, Liquidity::new(2 * E18 - 1_000));
        assert_eq!(router.factory().all_pairs_length(), 1);
        assert_eq!(
            router.get_reserves(TOKEN_B, TOKEN_A),
            Ok((Amount::new(4 * E18), Amount::new(E18)))
        );
    }

    #[test]
    fn second_deposit_keeps_ratio() {
        let (router, mut ledger) = setup();
        let Ok(_) = router.add_liquidity(&mut ledger, &ctx(), &add(E18, 2 * E18, 0, 0)) else {
            panic!("expected Ok");
        };
        // Desired B exceeds the ratio: A is taken in full.
        let Ok(added) = router.add_liquidity(&mut ledger, &ctx(), &add(E18, 5 * E18, 0, 0)) else {
            panic!("expected Ok");
        };
        assert_eq!(
            (added.amount_a, added.amount_b),
            (Amount::new(E18), Amount::new(2 * E18))
        );
        // Desired A exceeds the ratio: B is taken in full.
        let Ok(added) = router.add_liquidity(&mut ledger, &ctx(), &add(5 * E18, 2 * E18, 0, 0)) else {
            panic!("expected Ok");
        };
        assert_eq!(
            (added.amount_a, added.amount_b),
            (Amount::new(E18), Amount::new(2 * E18))
        );
    }

    #[test]
    fn ratio_minimums_enforced() {
        let (router, mut ledger) = setup();
        let Ok(_) = router.add_liquidity(&mut ledger, &ctx(), &add(E18, 2 * E18, 0, 0)) else {
            panic!("expected Ok");
        };
        assert_eq!(
            router
                .add_liquidity(&mut ledger, &ctx(), &add(E18, 5 * E18, 0, 3 * E18))
                .err(),
            Some(AmmError::InsufficientBAmount)
        );
        assert_eq!(
            router
                .add_liquidity(&mut ledger, &ctx(), &add(5 * E18, 2 * E18, 2 * E18, 0))
                .err(),
            Some(AmmError::InsufficientAAmount)
        );
    }

    #[test]
    fn expired_deadline_rejected() {
        let (router, mut ledger) = setup();
        let mut params = add(E18, E18, 0, 0);
        params.deadline = Deadline::at(Timestamp::from_secs(999));
        assert_eq!(
            router.add_liquidity(&mut ledger, &ctx(), &params).err(),
            Some(AmmError::Expired)
        );
        assert_eq!(router.factory().all_pairs_length(), 0);
    }

    #[test]
    fn remove_checks_minimums_before_burning() {
        let (router, mut ledger) = setup();
        let Ok(added) = router.add_liquidity(&mut ledger, &ctx(), &add(E18, E18, 0, 0)) else {
            panic!("expected Ok");
        };
        let Some(pool) = router.factory().get_pair(TOKEN_A, TOKEN_B) else {
            panic!("pair exists");
        };
        pool.approve(ALICE, ROUTER, added.liquidity);
        let params = RemoveLiquidity {
            token_a: TOKEN_A,
            token_b: TOKEN_B,
            liquidity: added.liquidity,
            amount_a_min: Amount::new(E18),
            amount_b_min: Amount::ZERO,
            to: ALICE,
            deadline: Deadline::NEVER,
        };
        assert_eq!(
            router.remove_liquidity(&mut ledger, &ctx(), &params).err(),
            Some(AmmError::InsufficientAAmount)
        );
        assert_eq!(pool.balance_of(ALICE), added.liquidity);

        let params = RemoveLiquidity {
            amount_a_min: Amount::ZERO,
            ..params
        };
        assert_eq!(
            router.remove_liquidity(&mut ledger, &ctx(), &params),
            Ok((Amount::new(E18 - 1_000), Amount::new(E18 - 1_000)))
        );
    }
}
