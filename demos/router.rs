//! Router walkthrough: pair creation, liquidity, multi-hop and native swaps.
//!
//! Every call runs through a [`Runtime`], so a failing call leaves the
//! ledger and all pools untouched.  Pool and router events are printed by
//! the `tracing` subscriber installed at the top of `main`.
//!
//! # Run
//!
//! ```bash
//! cargo run --example router
//! ```

use std::sync::Arc;

use hydra_cpmm::config::PoolConfig;
use hydra_cpmm::domain::{Address, Amount, Deadline, SwapPath, Timestamp};
use hydra_cpmm::factory::PairFactory;
use hydra_cpmm::host::{MemoryLedger, Runtime};
use hydra_cpmm::router::{AddLiquidity, AddLiquidityEth, Router, SwapExactEthIn, SwapExactIn};
use hydra_cpmm::traits::{NativeWrapper, TokenLedger};

const E18: u128 = 1_000_000_000_000_000_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    println!("=== Constant-product router ===\n");

    // ── 1. Wire the factory, router and an in-memory ledger ─────────────
    let usdc = Address::repeat_byte(0x11);
    let dai = Address::repeat_byte(0x22);
    let wbtc = Address::repeat_byte(0x33);
    let weth = Address::repeat_byte(0xee);
    let alice = Address::repeat_byte(0xa1);

    let factory = Arc::new(PairFactory::new(
        Address::repeat_byte(0xfa),
        PoolConfig::default(),
    ));
    let router = Router::new(Address::repeat_byte(0x70), Arc::clone(&factory), weth);
    let mut runtime = Runtime::new(MemoryLedger::new(weth), Arc::clone(&factory));
    runtime.set_time(Timestamp::from_secs(1_700_000_000));
    let deadline = Deadline::at(runtime.now().plus_secs(600));

    let ledger = runtime.ledger_mut();
    for token in [usdc, dai, wbtc] {
        ledger.mint(token, alice, Amount::new(10_000 * E18))?;
        ledger.approve(token, alice, router.address(), Amount::MAX)?;
    }
    ledger.credit_native(alice, Amount::new(100 * E18))?;
    println!("Alice funded with 10 000 of each token and 100 native\n");

    // ── 2. Seed two pools through the router ────────────────────────────
    let seeds = [(usdc, dai, 1_000, 1_000), (dai, wbtc, 1_000, 50)];
    for (token_a, token_b, amount_a, amount_b) in seeds {
        let params = AddLiquidity {
            token_a,
            token_b,
            amount_a_desired: Amount::new(amount_a * E18),
            amount_b_desired: Amount::new(amount_b * E18),
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to: alice,
            deadline,
        };
        let added = runtime.execute(alice, Amount::ZERO, |ledger, ctx| {
            router.add_liquidity(ledger, ctx, &params)
        })?;
        println!("Seeded {token_a}/{token_b}: {} LP", added.liquidity);
    }
    println!("Pairs registered: {}\n", factory.all_pairs_length());

    // ── 3. Quote and execute a two-hop swap USDC → DAI → WBTC ──────────
    let path = SwapPath::new(vec![usdc, dai, wbtc])?;
    let amount_in = Amount::new(10 * E18);
    let quoted = router.get_amounts_out(amount_in, &path)?;
    println!("--- Two-hop swap: sell {amount_in} USDC ---");
    println!("  Quoted:      {quoted:?}");

    let swap = SwapExactIn {
        amount_in,
        amount_out_min: quoted.last().copied().unwrap_or(Amount::ZERO),
        path,
        to: alice,
        deadline,
    };
    let amounts = runtime.execute(alice, Amount::ZERO, |ledger, ctx| {
        router.swap_exact_tokens_for_tokens(ledger, ctx, &swap)
    })?;
    println!("  Executed:    {amounts:?}");
    println!("  WBTC held:   {}", runtime.ledger().balance_of(wbtc, alice));

    // ── 4. A slippage bound that cannot be met reverts cleanly ──────────
    let greedy = SwapExactIn {
        amount_out_min: Amount::new(amount_in.get()),
        ..swap
    };
    let before = runtime.ledger().balance_of(usdc, alice);
    let reverted = runtime.execute(alice, Amount::ZERO, |ledger, ctx| {
        router.swap_exact_tokens_for_tokens(ledger, ctx, &greedy)
    });
    println!("\n--- Greedy swap ---");
    println!("  Result:      {reverted:?}");
    println!(
        "  USDC held:   {} (unchanged: {})",
        runtime.ledger().balance_of(usdc, alice),
        runtime.ledger().balance_of(usdc, alice) == before
    );

    // ── 5. Native liquidity and a native-in swap ────────────────────────
    let params = AddLiquidityEth {
        token: usdc,
        amount_token_desired: Amount::new(2_000 * E18),
        amount_token_min: Amount::ZERO,
        amount_eth_min: Amount::ZERO,
        to: alice,
        deadline,
    };
    runtime.execute(alice, Amount::new(E18), |ledger, ctx| {
        router.add_liquidity_eth(ledger, ctx, &params)
    })?;

    let native_swap = SwapExactEthIn {
        amount_out_min: Amount::ZERO,
        path: SwapPath::new(vec![weth, usdc])?,
        to: alice,
        deadline,
    };
    let amounts = runtime.execute(alice, Amount::new(E18 / 10), |ledger, ctx| {
        router.swap_exact_eth_for_tokens(ledger, ctx, &native_swap)
    })?;
    println!("\n--- Native swap: sell 0.1 native for USDC ---");
    println!("  USDC out:    {}", amounts[1]);
    println!("  Native left: {}", runtime.ledger().native_balance_of(alice));
    println!("  Reserves:    {:?}", router.get_reserves(weth, usdc)?);

    println!("\n=== Done ===");
    Ok(())
}
