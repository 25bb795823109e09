//! Constant Product pool (Uniswap V2 style).
//!
//! The pool holds two token balances on a [`TokenLedger`] and tracks the
//! last-synced copies as reserves.  Callers push tokens (or LP shares)
//! into the pool first and then call [`Pool::mint`], [`Pool::burn`] or
//! [`Pool::swap`]; the pool infers what it received by diffing its balances
//! against its reserves.  It never pulls funds.
//!
//! # Swap Check (token amounts in raw units)
//!
//! With `D = 10 000`, `f` the fee in basis points, `b` the post-transfer
//! balances, `in` the inferred inputs and `r` the pre-swap reserves:
//!
//! ```text
//! (b0·D − in0·f) · (b1·D − in1·f)  ≥  r0 · r1 · D²
//! ```
//!
//! All products are evaluated in 256-bit integers.  Reserves are capped at
//! 112 bits so every term fits.
//!
//! # Locking
//!
//! Mutating entry points take the pool's reentrancy guard for their whole
//! duration.  The state mutex is only held for short, ledger-free
//! sections, so read-only getters stay callable from ledger callbacks and
//! always report the last-synced reserves.

use std::sync::{Mutex, MutexGuard, PoisonError};

use alloy_primitives::U256;
use tracing::debug;

use super::guard::ReentrancyGuard;
use super::lp_shares::LpShares;
use crate::config::PoolConfig;
use crate::domain::{Address, Amount, FeeTier, Liquidity, Rounding, TokenPair};
use crate::error::{AmmError, Result};
use crate::math::{mul_div, sqrt_product, CheckedArithmetic};
use crate::traits::TokenLedger;

/// Largest value a reserve may hold (`2^112 − 1`).
pub const MAX_RESERVE: u128 = (1u128 << 112) - 1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PoolState {
    reserve0: Amount,
    reserve1: Amount,
    shares: LpShares,
}

impl PoolState {
    fn set_reserves(&mut self, balance0: Amount, balance1: Amount) {
        self.reserve0 = balance0;
        self.reserve1 = balance1;
    }
}

/// A copy of a pool's mutable state, restorable with [`Pool::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot(PoolState);

/// A constant-product liquidity pool for one canonical token pair.
///
/// Pools are created by a [`PairFactory`](crate::factory::PairFactory) and
/// shared as `Arc<Pool>`.  Every method takes `&self`; mutable state sits
/// behind an internal mutex and a reentrancy guard.
///
/// # State
///
/// - `reserve0` / `reserve1`: last-synced balances of `token0` / `token1`
/// - LP shares: total supply, holder balances and allowances
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use hydra_cpmm::config::PoolConfig;
/// use hydra_cpmm::domain::{Address, Amount, Liquidity};
/// use hydra_cpmm::factory::PairFactory;
/// use hydra_cpmm::host::MemoryLedger;
/// use hydra_cpmm::traits::TokenLedger;
///
/// let (token_a, token_b) = (Address::repeat_byte(1), Address::repeat_byte(2));
/// let lp = Address::repeat_byte(0xa1);
/// let factory = PairFactory::new(Address::repeat_byte(0xfa), PoolConfig::default());
/// let pool = factory.create_pair(token_a, token_b).expect("new pair");
///
/// let mut ledger = MemoryLedger::new(Address::repeat_byte(0xee));
/// let e18 = 10u128.pow(18);
/// ledger.mint(token_a, pool.address(), Amount::new(e18)).expect("fund");
/// ledger.mint(token_b, pool.address(), Amount::new(4 * e18)).expect("fund");
///
/// let minted = pool.mint(&mut ledger, lp).expect("mint");
/// assert_eq!(minted, Liquidity::new(2 * e18 - 1_000));
/// assert_eq!(pool.get_reserves(), (Amount::new(e18), Amount::new(4 * e18)));
/// ```
#[derive(Debug)]
pub struct Pool {
    address: Address,
    pair: TokenPair,
    config: PoolConfig,
    guard: ReentrancyGuard,
    state: Mutex<PoolState>,
}

impl Pool {
    pub(crate) fn new(address: Address, pair: TokenPair, config: PoolConfig) -> Self {
        Self {
            address,
            pair,
            config,
            guard: ReentrancyGuard::new(),
            state: Mutex::new(PoolState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The pool's own ledger address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The canonically ordered token pair.
    #[must_use]
    pub const fn pair(&self) -> TokenPair {
        self.pair
    }

    /// The smaller token of the pair.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.pair.token0()
    }

    /// The larger token of the pair.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.pair.token1()
    }

    /// The configuration the pool was created with.
    #[must_use]
    pub const fn config(&self) -> PoolConfig {
        self.config
    }

    /// The swap fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.config.fee_tier()
    }

    /// Last-synced reserves in canonical `(token0, token1)` order.
    #[must_use]
    pub fn get_reserves(&self) -> (Amount, Amount) {
        let state = self.state();
        (state.reserve0, state.reserve1)
    }

    /// Outstanding LP shares, including the locked minimum.
    #[must_use]
    pub fn total_supply(&self) -> Liquidity {
        self.state().shares.total_supply()
    }

    /// LP shares held by `owner`.
    #[must_use]
    pub fn balance_of(&self, owner: Address) -> Liquidity {
        self.state().shares.balance_of(owner)
    }

    /// LP shares `spender` may move on behalf of `owner`.
    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> Liquidity {
        self.state().shares.allowance(owner, spender)
    }

    /// Moves LP shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`] if `from` holds fewer than `amount`.
    pub fn transfer(&self, from: Address, to: Address, amount: Liquidity) -> Result<()> {
        self.state().shares.transfer(from, to, amount)
    }

    /// Sets `spender`'s LP allowance over `owner` to `amount`.
    pub fn approve(&self, owner: Address, spender: Address, amount: Liquidity) {
        self.state().shares.approve(owner, spender, amount);
    }

    /// Moves LP shares from `from` to `to` using `spender`'s allowance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientAllowance`] if the allowance is too small.
    /// - [`AmmError::InsufficientBalance`] if `from` holds fewer than
    ///   `amount`.
    pub fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Liquidity,
    ) -> Result<()> {
        self.state().shares.transfer_from(spender, from, to, amount)
    }

    /// Mints LP shares to `to` for the tokens pushed in since the last sync.
    ///
    /// At genesis the shares are `isqrt(amount0 · amount1)` minus the
    /// configured minimum liquidity, which is locked to [`Address::ZERO`].
    /// Afterwards they are the smaller of the two proportional shares,
    /// floor-rounded.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] if the pool is already executing a mutation.
    /// - [`AmmError::InsufficientLiquidityMinted`] if the deposit would mint
    ///   zero shares.
    /// - [`AmmError::Overflow`] if a resulting reserve exceeds 112 bits.
    pub fn mint<L>(&self, ledger: &mut L, to: Address) -> Result<Liquidity>
    where
        L: TokenLedger + ?Sized,
    {
        let _token = self.guard.enter()?;
        let (reserve0, reserve1, total_supply) = {
            let state = self.state();
            (state.reserve0, state.reserve1, state.shares.total_supply())
        };
        let (balance0, balance1) = self.balances(ledger);
        ensure_reserves_fit(balance0, balance1)?;
        let amount0 = balance0.safe_sub(&reserve0)?;
        let amount1 = balance1.safe_sub(&reserve1)?;

        let minimum = self.config.minimum_liquidity();
        let genesis = total_supply.is_zero();
        let liquidity = if genesis {
            sqrt_product(amount0.get(), amount1.get())?
                .checked_sub(minimum.get())
                .unwrap_or(0)
        } else {
            let by0 = mul_div(
                amount0.get(),
                total_supply.get(),
                reserve0.get(),
                Rounding::Down,
            )?;
            let by1 = mul_div(
                amount1.get(),
                total_supply.get(),
                reserve1.get(),
                Rounding::Down,
            )?;
            by0.min(by1)
        };
        if liquidity == 0 {
            return Err(AmmError::InsufficientLiquidityMinted);
        }
        let liquidity = Liquidity::new(liquidity);

        let mut state = self.state();
        if genesis {
            state.shares.mint(Address::ZERO, minimum)?;
        }
        state.shares.mint(to, liquidity)?;
        state.set_reserves(balance0, balance1);
        debug!(
            pool = %self.address,
            %to,
            %amount0,
            %amount1,
            %liquidity,
            reserve0 = %balance0,
            reserve1 = %balance1,
            "minted liquidity"
        );
        Ok(liquidity)
    }

    /// Token amounts that burning `liquidity` shares would return, without
    /// any effect.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientLiquidityBurned`] if either amount would be
    /// zero.
    pub fn preview_burn(&self, liquidity: Liquidity) -> Result<(Amount, Amount)> {
        let state = self.state();
        share_of_reserves(
            liquidity,
            state.reserve0,
            state.reserve1,
            state.shares.total_supply(),
        )
    }

    /// Burns the LP shares held by the pool itself and sends the matching
    /// share of both reserves to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] if the pool is already executing a mutation.
    /// - [`AmmError::InsufficientLiquidityBurned`] if either amount would be
    ///   zero.
    /// - Any error the ledger returns for the outgoing transfers.
    pub fn burn<L>(&self, ledger: &mut L, to: Address) -> Result<(Amount, Amount)>
    where
        L: TokenLedger + ?Sized,
    {
        let _token = self.guard.enter()?;
        let (held, amount0, amount1) = {
            let mut state = self.state();
            let held = state.shares.balance_of(self.address);
            let (amount0, amount1) = share_of_reserves(
                held,
                state.reserve0,
                state.reserve1,
                state.shares.total_supply(),
            )?;
            state.shares.burn(self.address, held)?;
            (held, amount0, amount1)
        };

        ledger.transfer(self.token0(), self.address, to, amount0)?;
        ledger.transfer(self.token1(), self.address, to, amount1)?;

        let (balance0, balance1) = self.balances(ledger);
        ensure_reserves_fit(balance0, balance1)?;
        self.state().set_reserves(balance0, balance1);
        debug!(
            pool = %self.address,
            %to,
            liquidity = %held,
            %amount0,
            %amount1,
            reserve0 = %balance0,
            reserve1 = %balance1,
            "burned liquidity"
        );
        Ok((amount0, amount1))
    }

    /// Sends the requested outputs to `to`, then checks that the inputs
    /// pushed in beforehand keep the fee-adjusted constant product.
    ///
    /// Returns the inferred `(amount0_in, amount1_in)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] if the pool is already executing a mutation.
    /// - [`AmmError::InsufficientOutputAmount`] if both outputs are zero.
    /// - [`AmmError::InsufficientLiquidity`] unless each output is strictly
    ///   below its reserve.
    /// - [`AmmError::InvalidRecipient`] if `to` is the null address or one
    ///   of the pool's tokens.
    /// - [`AmmError::InsufficientInputAmount`] if nothing was pushed in.
    /// - [`AmmError::InvariantViolation`] if the product check fails.
    pub fn swap<L>(
        &self,
        ledger: &mut L,
        amount0_out: Amount,
        amount1_out: Amount,
        to: Address,
    ) -> Result<(Amount, Amount)>
    where
        L: TokenLedger + ?Sized,
    {
        let _token = self.guard.enter()?;
        if amount0_out.is_zero() && amount1_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        let (reserve0, reserve1) = self.get_reserves();
        if amount0_out >= reserve0 || amount1_out >= reserve1 {
            return Err(AmmError::InsufficientLiquidity);
        }
        if to.is_zero() {
            return Err(AmmError::InvalidRecipient("null address"));
        }
        if self.pair.contains(to) {
            return Err(AmmError::InvalidRecipient("recipient is a pool token"));
        }

        if !amount0_out.is_zero() {
            ledger.transfer(self.token0(), self.address, to, amount0_out)?;
        }
        if !amount1_out.is_zero() {
            ledger.transfer(self.token1(), self.address, to, amount1_out)?;
        }

        let (balance0, balance1) = self.balances(ledger);
        let amount0_in = balance0.saturating_sub(&reserve0.saturating_sub(&amount0_out));
        let amount1_in = balance1.saturating_sub(&reserve1.saturating_sub(&amount1_out));
        if amount0_in.is_zero() && amount1_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        ensure_reserves_fit(balance0, balance1)?;
        self.check_product(
            (balance0, balance1),
            (amount0_in, amount1_in),
            (reserve0, reserve1),
        )?;

        self.state().set_reserves(balance0, balance1);
        debug!(
            pool = %self.address,
            %to,
            %amount0_in,
            %amount1_in,
            %amount0_out,
            %amount1_out,
            reserve0 = %balance0,
            reserve1 = %balance1,
            "swapped"
        );
        Ok((amount0_in, amount1_in))
    }

    /// Sends any balance above the reserves to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] if the pool is already executing a mutation.
    /// - Any error the ledger returns for the outgoing transfers.
    pub fn skim<L>(&self, ledger: &mut L, to: Address) -> Result<(Amount, Amount)>
    where
        L: TokenLedger + ?Sized,
    {
        let _token = self.guard.enter()?;
        let (reserve0, reserve1) = self.get_reserves();
        let (balance0, balance1) = self.balances(ledger);
        let excess0 = balance0.saturating_sub(&reserve0);
        let excess1 = balance1.saturating_sub(&reserve1);
        if !excess0.is_zero() {
            ledger.transfer(self.token0(), self.address, to, excess0)?;
        }
        if !excess1.is_zero() {
            ledger.transfer(self.token1(), self.address, to, excess1)?;
        }
        debug!(pool = %self.address, %to, %excess0, %excess1, "skimmed");
        Ok((excess0, excess1))
    }

    /// Sets the reserves to the pool's current balances.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] if the pool is already executing a mutation.
    /// - [`AmmError::Overflow`] if a balance exceeds 112 bits.
    pub fn sync<L>(&self, ledger: &mut L) -> Result<()>
    where
        L: TokenLedger + ?Sized,
    {
        let _token = self.guard.enter()?;
        let (balance0, balance1) = self.balances(ledger);
        ensure_reserves_fit(balance0, balance1)?;
        self.state().set_reserves(balance0, balance1);
        debug!(
            pool = %self.address,
            reserve0 = %balance0,
            reserve1 = %balance1,
            "synced"
        );
        Ok(())
    }

    /// Captures the pool's mutable state.
    #[must_use]
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot(self.state().clone())
    }

    /// Replaces the pool's mutable state with a snapshot.
    pub fn restore(&self, snapshot: &PoolSnapshot) {
        *self.state() = snapshot.0.clone();
    }

    fn balances<L>(&self, ledger: &L) -> (Amount, Amount)
    where
        L: TokenLedger + ?Sized,
    {
        (
            ledger.balance_of(self.token0(), self.address),
            ledger.balance_of(self.token1(), self.address),
        )
    }

    fn check_product(
        &self,
        (balance0, balance1): (Amount, Amount),
        (amount0_in, amount1_in): (Amount, Amount),
        (reserve0, reserve1): (Amount, Amount),
    ) -> Result<()> {
        let scale = U256::from(FeeTier::DENOMINATOR);
        let fee = U256::from(self.fee_tier().fee_multiplier());
        let adjusted0 = U256::from(balance0.get()) * scale - U256::from(amount0_in.get()) * fee;
        let adjusted1 = U256::from(balance1.get()) * scale - U256::from(amount1_in.get()) * fee;
        let k_before = U256::from(reserve0.get()) * U256::from(reserve1.get()) * scale * scale;
        if adjusted0 * adjusted1 < k_before {
            return Err(AmmError::InvariantViolation);
        }
        Ok(())
    }
}

fn ensure_reserves_fit(balance0: Amount, balance1: Amount) -> Result<()> {
    if balance0.get() > MAX_RESERVE || balance1.get() > MAX_RESERVE {
        return Err(AmmError::Overflow("reserve exceeds 112 bits"));
    }
    Ok(())
}

fn share_of_reserves(
    liquidity: Liquidity,
    reserve0: Amount,
    reserve1: Amount,
    total_supply: Liquidity,
) -> Result<(Amount, Amount)> {
    if total_supply.is_zero() {
        return Err(AmmError::InsufficientLiquidityBurned);
    }
    let amount0 = mul_div(
        liquidity.get(),
        reserve0.get(),
        total_supply.get(),
        Rounding::Down,
    )?;
    let amount1 = mul_div(
        liquidity.get(),
        reserve1.get(),
        total_supply.get(),
        Rounding::Down,
    )?;
    if amount0 == 0 || amount1 == 0 {
        return Err(AmmError::InsufficientLiquidityBurned);
    }
    Ok((Amount::new(amount0), Amount::new(amount1)))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::BasisPoints;
    use crate::host::MemoryLedger;

    const E18: u128 = 1_000_000_000_000_000_000;
    const TOKEN0: Address = Address::repeat_byte(1);
    const TOKEN1: Address = Address::repeat_byte(2);
    const POOL: Address = Address::repeat_byte(0x50);
    const ALICE: Address = Address::repeat_byte(0xa1);
    const BOB: Address = Address::repeat_byte(0xb0);

    fn make_pool() -> Pool {
        let Ok(pair) = TokenPair::new(TOKEN0, TOKEN1) else {
            panic!("valid pair");
        };
        Pool::new(POOL, pair, PoolConfig::default())
    }

    fn push(ledger: &mut MemoryLedger, token: Address, amount: u128) {
        let Ok(()) = ledger.mint(token, POOL, Amount::new(amount)) else {
            panic!("expected Ok");
        };
    }

    fn seeded(amount0: u128, amount1: u128) -> (Pool, MemoryLedger) {
        let pool = make_pool();
        let mut ledger = MemoryLedger::new(Address::repeat_byte(0xee));
        push(&mut ledger, TOKEN0, amount0);
        push(&mut ledger, TOKEN1, amount1);
        let Ok(_) = pool.mint(&mut ledger, ALICE) else {
            panic!("expected Ok");
        };
        (pool, ledger)
    }

    #[test]
    fn genesis_mint_locks_minimum() {
        let pool = make_pool();
        let mut ledger = MemoryLedger::new(Address::repeat_byte(0xee));
        push(&mut ledger, TOKEN0, E18);
        push(&mut ledger, TOKEN1, 4 * E18);
        let Ok(minted) = pool.mint(&mut ledger, ALICE) else {
            panic!("expected Ok");
        };
        assert_eq!(minted, Liquidity::new(2 * E18 - 1_000));
        assert_eq!(pool.balance_of(ALICE), minted);
        assert_eq!(pool.balance_of(Address::ZERO), Liquidity::new(1_000));
        assert_eq!(pool.total_supply(), Liquidity::new(2 * E18));
        assert_eq!(pool.get_reserves(), (Amount::new(E18), Amount::new(4 * E18)));
    }

    #[test]
    fn genesis_at_minimum_rejected() {
        let pool = make_pool();
        let mut ledger = MemoryLedger::new(Address::repeat_byte(0xee));
        push(&mut ledger, TOKEN0, 1_000);
        push(&mut ledger, TOKEN1, 1_000);
        assert_eq!(
            pool.mint(&mut ledger, ALICE),
            Err(AmmError::InsufficientLiquidityMinted)
        );
        assert!(pool.total_supply().is_zero());
    }

    #[test]
    fn mint_without_deposit_rejected() {
        let (pool, mut ledger) = seeded(E18, E18);
        assert_eq!(
            pool.mint(&mut ledger, ALICE),
            Err(AmmError::InsufficientLiquidityMinted)
        );
    }

    #[test]
    fn proportional_mint_takes_smaller_share() {
        let (pool, mut ledger) = seeded(E18, 4 * E18);
        push(&mut ledger, TOKEN0, E18);
        push(&mut ledger, TOKEN1, 8 * E18);
        let Ok(minted) = pool.mint(&mut ledger, BOB) else {
            panic!("expected Ok");
        };
        // token0 side doubles the pool; the extra token1 is donated.
        assert_eq!(minted, Liquidity::new(2 * E18));
        assert_eq!(
            pool.get_reserves(),
            (Amount::new(2 * E18), Amount::new(12 * E18))
        );
    }

    #[test]
    fn burn_all_returns_deposit_minus_locked() {
        let (pool, mut ledger) = seeded(10 * E18, 10 * E18);
        let held = pool.balance_of(ALICE);
        let Ok(()) = pool.transfer(ALICE, POOL, held) else {
            panic!("expected Ok");
        };
        let Ok((amount0, amount1)) = pool.burn(&mut ledger, ALICE) else {
            panic!("expected Ok");
        };
        assert_eq!(amount0, Amount::new(10 * E18 - 1_000));
        assert_eq!(amount1, Amount::new(10 * E18 - 1_000));
        assert_eq!(ledger.balance_of(TOKEN0, ALICE), amount0);
        assert_eq!(pool.total_supply(), Liquidity::new(1_000));
        assert_eq!(pool.get_reserves(), (Amount::new(1_000), Amount::new(1_000)));
    }

    #[test]
    fn burn_nothing_rejected() {
        let (pool, mut ledger) = seeded(E18, E18);
        assert_eq!(
            pool.burn(&mut ledger, ALICE),
            Err(AmmError::InsufficientLiquidityBurned)
        );
    }

    #[test]
    fn preview_matches_burn() {
        let (pool, mut ledger) = seeded(3 * E18, 7 * E18);
        let lp = Liquidity::new(E18);
        let Ok(preview) = pool.preview_burn(lp) else {
            panic!("expected Ok");
        };
        let Ok(()) = pool.transfer(ALICE, POOL, lp) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.burn(&mut ledger, BOB), Ok(preview));
    }

    #[test]
    fn preview_on_empty_pool_rejected() {
        let pool = make_pool();
        assert_eq!(
            pool.preview_burn(Liquidity::new(1)),
            Err(AmmError::InsufficientLiquidityBurned)
        );
    }

    #[test]
    fn swap_updates_reserves_exactly() {
        let (pool, mut ledger) = seeded(10 * E18, 20 * E18);
        push(&mut ledger, TOKEN0, E18);
        let out = Amount::new(1_500_000_000_000_000_000);
        let Ok(inputs) = pool.swap(&mut ledger, Amount::ZERO, out, BOB) else {
            panic!("expected Ok");
        };
        assert_eq!(inputs, (Amount::new(E18), Amount::ZERO));
        assert_eq!(
            pool.get_reserves(),
            (
                Amount::new(11 * E18),
                Amount::new(18_500_000_000_000_000_000)
            )
        );
        assert_eq!(ledger.balance_of(TOKEN1, BOB), out);
    }

    #[test]
    fn swap_output_at_reserve_rejected() {
        let (pool, mut ledger) = seeded(10 * E18, 20 * E18);
        push(&mut ledger, TOKEN0, E18);
        assert_eq!(
            pool.swap(&mut ledger, Amount::ZERO, Amount::new(20 * E18), BOB),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn swap_zero_outputs_rejected() {
        let (pool, mut ledger) = seeded(E18, E18);
        assert_eq!(
            pool.swap(&mut ledger, Amount::ZERO, Amount::ZERO, BOB),
            Err(AmmError::InsufficientOutputAmount)
        );
    }

    #[test]
    fn swap_forbidden_recipients() {
        let (pool, mut ledger) = seeded(10 * E18, 10 * E18);
        push(&mut ledger, TOKEN0, E18);
        for to in [Address::ZERO, TOKEN0, TOKEN1] {
            let Err(AmmError::InvalidRecipient(_)) =
                pool.swap(&mut ledger, Amount::ZERO, Amount::new(1), to)
            else {
                panic!("expected InvalidRecipient for {to}");
            };
        }
    }

    #[test]
    fn swap_without_input_rejected() {
        let (pool, mut ledger) = seeded(10 * E18, 10 * E18);
        assert_eq!(
            pool.swap(&mut ledger, Amount::new(1), Amount::ZERO, BOB),
            Err(AmmError::InsufficientInputAmount)
        );
    }

    #[test]
    fn swap_breaking_product_rejected() {
        let (pool, mut ledger) = seeded(10 * E18, 20 * E18);
        push(&mut ledger, TOKEN0, E18);
        // The fee-adjusted quote for 1e18 in is ~1.8132e18.
        let greedy = Amount::new(1_820_000_000_000_000_000);
        assert_eq!(
            pool.swap(&mut ledger, Amount::ZERO, greedy, BOB),
            Err(AmmError::InvariantViolation)
        );
    }

    #[test]
    fn zero_fee_pool_accepts_exact_product() {
        let Ok(pair) = TokenPair::new(TOKEN0, TOKEN1) else {
            panic!("valid pair");
        };
        let Ok(config) =
            PoolConfig::new(FeeTier::new(BasisPoints::ZERO), Liquidity::new(1_000))
        else {
            panic!("valid config");
        };
        let pool = Pool::new(POOL, pair, config);
        let mut ledger = MemoryLedger::new(Address::repeat_byte(0xee));
        push(&mut ledger, TOKEN0, 10 * E18);
        push(&mut ledger, TOKEN1, 10 * E18);
        let Ok(_) = pool.mint(&mut ledger, ALICE) else {
            panic!("expected Ok");
        };
        // 10·10 = 12.5·8
        push(&mut ledger, TOKEN0, 2_500_000_000_000_000_000);
        assert!(pool
            .swap(&mut ledger, Amount::ZERO, Amount::new(2 * E18), BOB)
            .is_ok());
    }

    #[test]
    fn skim_and_sync() {
        let (pool, mut ledger) = seeded(E18, E18);
        push(&mut ledger, TOKEN0, 500);
        let Ok(excess) = pool.skim(&mut ledger, BOB) else {
            panic!("expected Ok");
        };
        assert_eq!(excess, (Amount::new(500), Amount::ZERO));
        assert_eq!(ledger.balance_of(TOKEN0, BOB), Amount::new(500));

        push(&mut ledger, TOKEN1, 700);
        let Ok(()) = pool.sync(&mut ledger) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.get_reserves(), (Amount::new(E18), Amount::new(E18 + 700)));
    }

    #[test]
    fn sync_rejects_oversized_balance() {
        let (pool, mut ledger) = seeded(E18, E18);
        push(&mut ledger, TOKEN0, MAX_RESERVE);
        let Err(AmmError::Overflow(_)) = pool.sync(&mut ledger) else {
            panic!("expected Overflow");
        };
        assert_eq!(pool.get_reserves(), (Amount::new(E18), Amount::new(E18)));
    }

    #[test]
    fn locked_pool_rejects_mutation() {
        let (pool, mut ledger) = seeded(E18, E18);
        let Ok(_token) = pool.guard.enter() else {
            panic!("expected Ok");
        };
        assert_eq!(pool.sync(&mut ledger), Err(AmmError::Locked));
        assert_eq!(pool.mint(&mut ledger, ALICE), Err(AmmError::Locked));
        // Reads stay available.
        assert_eq!(pool.get_reserves(), (Amount::new(E18), Amount::new(E18)));
    }

    #[test]
    fn snapshot_restore_round_trip() {
        let (pool, mut ledger) = seeded(E18, E18);
        let snapshot = pool.snapshot();
        push(&mut ledger, TOKEN0, E18);
        push(&mut ledger, TOKEN1, E18);
        let Ok(_) = pool.mint(&mut ledger, BOB) else {
            panic!("expected Ok");
        };
        pool.restore(&snapshot);
        assert_eq!(pool.get_reserves(), (Amount::new(E18), Amount::new(E18)));
        assert!(pool.balance_of(BOB).is_zero());
    }

    #[test]
    fn lp_transfer_from_uses_allowance() {
        let (pool, _ledger) = seeded(E18, E18);
        let lp = Liquidity::new(1_000);
        assert_eq!(
            pool.transfer_from(BOB, ALICE, BOB, lp),
            Err(AmmError::InsufficientAllowance)
        );
        pool.approve(ALICE, BOB, lp);
        assert_eq!(pool.allowance(ALICE, BOB), lp);
        assert_eq!(pool.transfer_from(BOB, ALICE, BOB, lp), Ok(()));
        assert_eq!(pool.balance_of(BOB), lp);
        assert!(pool.allowance(ALICE, BOB).is_zero());
    }
}
