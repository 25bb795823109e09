//! Property-based tests using `proptest` for pool invariants.
//!
//! 1. **Product preservation**: a swap at the quoted output never lowers
//!    `reserve0 · reserve1`.
//! 2. **Quote tightness**: the pool accepts the router's quoted output and
//!    rejects one unit more.
//! 3. **Liquidity round trip**: mint then burn-all returns the deposit
//!    minus at most the locked minimum's share.
//! 4. **Factory symmetry**: a pair is found in both orders and cannot be
//!    created twice.

use std::sync::Arc;

use alloy_primitives::U256;
use proptest::prelude::*;

use crate::config::PoolConfig;
use crate::domain::{Address, Amount, FeeTier, Liquidity, Rounding, TokenPair};
use crate::error::AmmError;
use crate::factory::PairFactory;
use crate::host::MemoryLedger;
use crate::math::mul_div;
use crate::pools::Pool;
use crate::router::library::get_amount_out;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const TOKEN0: Address = Address::repeat_byte(1);
const TOKEN1: Address = Address::repeat_byte(2);
const POOL: Address = Address::repeat_byte(0x50);
const LP: Address = Address::repeat_byte(0xa1);
const TRADER: Address = Address::repeat_byte(0xb0);

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

fn seeded(reserve0: u128, reserve1: u128) -> (Pool, MemoryLedger) {
    let pool = make_pool();
    let mut ledger = MemoryLedger::new(Address::repeat_byte(0xee));
    push(&mut ledger, TOKEN0, reserve0);
    push(&mut ledger, TOKEN1, reserve1);
    let Ok(_) = pool.mint(&mut ledger, LP) else {
        panic!("valid genesis");
    };
    (pool, ledger)
}

fn product(pool: &Pool) -> U256 {
    let (reserve0, reserve1) = pool.get_reserves();
    U256::from(reserve0.get()) * U256::from(reserve1.get())
}

fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000_000u128..=1_000_000_000_000_000_000_000_000_000_000u128
}

fn address_strategy() -> impl Strategy<Value = Address> {
    any::<[u8; 32]>().prop_map(Address::from_bytes)
}

// ---------------------------------------------------------------------------
// 1 + 2. Swaps
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_swap_at_quote_preserves_product(
        reserve0 in reserve_strategy(),
        reserve1 in reserve_strategy(),
        amount_in in 1u128..=1_000_000_000_000_000_000_000_000_000_000u128,
    ) {
        let (pool, mut ledger) = seeded(reserve0, reserve1);
        let Ok(out) = get_amount_out(
            Amount::new(amount_in),
            Amount::new(reserve0),
            Amount::new(reserve1),
            FeeTier::default(),
        ) else {
            panic!("valid quote");
        };
        prop_assume!(!out.is_zero());

        let before = product(&pool);
        push(&mut ledger, TOKEN0, amount_in);
        let result = pool.swap(&mut ledger, Amount::ZERO, out, TRADER);
        prop_assert_eq!(result, Ok((Amount::new(amount_in), Amount::ZERO)));
        prop_assert!(product(&pool) >= before);
    }

    #[test]
    fn prop_one_unit_above_quote_rejected(
        reserve0 in reserve_strategy(),
        reserve1 in reserve_strategy(),
        amount_in in 1u128..=1_000_000_000_000_000_000_000_000_000_000u128,
    ) {
        let (pool, mut ledger) = seeded(reserve0, reserve1);
        let Ok(out) = get_amount_out(
            Amount::new(amount_in),
            Amount::new(reserve0),
            Amount::new(reserve1),
            FeeTier::default(),
        ) else {
            panic!("valid quote");
        };

        push(&mut ledger, TOKEN0, amount_in);
        let greedy = Amount::new(out.get() + 1);
        let result = pool.swap(&mut ledger, Amount::ZERO, greedy, TRADER);
        prop_assert!(matches!(
            result,
            Err(AmmError::InvariantViolation | AmmError::InsufficientLiquidity)
        ));
    }
}

// ---------------------------------------------------------------------------
// 3. Liquidity round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_mint_burn_round_trip(
        amount0 in reserve_strategy(),
        amount1 in reserve_strategy(),
    ) {
        let (pool, mut ledger) = seeded(amount0, amount1);
        let held = pool.balance_of(LP);
        let total = pool.total_supply();
        let Ok(()) = pool.transfer(LP, POOL, held) else {
            panic!("expected Ok");
        };
        let Ok((out0, out1)) = pool.burn(&mut ledger, LP) else {
            panic!("expected Ok");
        };

        let minimum = PoolConfig::default().minimum_liquidity();
        for (deposit, returned) in [(amount0, out0), (amount1, out1)] {
            prop_assert!(returned.get() <= deposit);
            let Ok(locked_share) = mul_div(deposit, minimum.get(), total.get(), Rounding::Up) else {
                panic!("valid share");
            };
            prop_assert!(deposit - returned.get() <= locked_share + 1);
        }
        prop_assert_eq!(pool.total_supply(), minimum);
        prop_assert_eq!(pool.balance_of(Address::ZERO), minimum);
        prop_assert_eq!(pool.balance_of(LP), Liquidity::ZERO);
    }
}

// ---------------------------------------------------------------------------
// 4. Factory symmetry
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_factory_symmetry(a in address_strategy(), b in address_strategy()) {
        prop_assume!(a != b && !a.is_zero() && !b.is_zero());
        let factory = PairFactory::new(Address::repeat_byte(0xfa), PoolConfig::default());
        let Ok(created) = factory.create_pair(a, b) else {
            panic!("expected Ok");
        };
        let (Some(ab), Some(ba)) = (factory.get_pair(a, b), factory.get_pair(b, a)) else {
            panic!("expected both lookups to hit");
        };
        prop_assert!(Arc::ptr_eq(&ab, &ba));
        prop_assert!(Arc::ptr_eq(&ab, &created));
        prop_assert!(created.token0() < created.token1());
        prop_assert_eq!(factory.create_pair(b, a).err(), Some(AmmError::PairExists));
        prop_assert_eq!(factory.pair_address(b, a), Ok(created.address()));
    }
}
