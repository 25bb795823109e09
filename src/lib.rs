//! # Hydra CPMM
//!
//! Constant-product automated market maker core: a pair registry, per-pair
//! liquidity pools enforcing `x · y = k` with a swap fee, and a stateless
//! router for multi-hop swaps and liquidity operations.
//!
//! The crate does not implement a token standard or a settlement layer.
//! Token balances live behind the [`TokenLedger`](traits::TokenLedger)
//! trait and native value behind [`NativeWrapper`](traits::NativeWrapper);
//! the embedding environment is expected to execute each call atomically.
//! The [`host`] module ships an in-memory ledger and a rollback runtime that
//! provide both.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize` / `Deserialize` for value types and [`PoolConfig`](config::PoolConfig) |
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hydra_cpmm::config::PoolConfig;
//! use hydra_cpmm::domain::{Address, Amount, Deadline, SwapPath};
//! use hydra_cpmm::factory::PairFactory;
//! use hydra_cpmm::host::{MemoryLedger, Runtime};
//! use hydra_cpmm::router::{AddLiquidity, Router, SwapExactIn};
//! use hydra_cpmm::traits::TokenLedger;
//!
//! let (usdc, dai) = (Address::repeat_byte(1), Address::repeat_byte(2));
//! let (weth, alice) = (Address::repeat_byte(0xee), Address::repeat_byte(0xa1));
//!
//! // 1. Wire a factory, a router and an in-memory host
//! let factory = Arc::new(PairFactory::new(Address::repeat_byte(0xfa), PoolConfig::default()));
//! let router = Router::new(Address::repeat_byte(0x70), Arc::clone(&factory), weth);
//! let mut runtime = Runtime::new(MemoryLedger::new(weth), factory);
//!
//! // 2. Fund alice and approve the router
//! let e18 = 10u128.pow(18);
//! for token in [usdc, dai] {
//!     let ledger = runtime.ledger_mut();
//!     ledger.mint(token, alice, Amount::new(100 * e18)).expect("mint");
//!     ledger.approve(token, alice, router.address(), Amount::MAX).expect("approve");
//! }
//!
//! // 3. Provide liquidity; the pair is created on the way
//! let params = AddLiquidity {
//!     token_a: usdc,
//!     token_b: dai,
//!     amount_a_desired: Amount::new(10 * e18),
//!     amount_b_desired: Amount::new(10 * e18),
//!     amount_a_min: Amount::ZERO,
//!     amount_b_min: Amount::ZERO,
//!     to: alice,
//!     deadline: Deadline::NEVER,
//! };
//! runtime
//!     .execute(alice, Amount::ZERO, |ledger, ctx| router.add_liquidity(ledger, ctx, &params))
//!     .expect("liquidity added");
//!
//! // 4. Swap 1 USDC for DAI
//! let swap = SwapExactIn {
//!     amount_in: Amount::new(e18),
//!     amount_out_min: Amount::ZERO,
//!     path: SwapPath::new(vec![usdc, dai]).expect("valid path"),
//!     to: alice,
//!     deadline: Deadline::NEVER,
//! };
//! let amounts = runtime
//!     .execute(alice, Amount::ZERO, |ledger, ctx| {
//!         router.swap_exact_tokens_for_tokens(ledger, ctx, &swap)
//!     })
//!     .expect("swap succeeded");
//! assert_eq!(amounts[1], Amount::new(906_610_893_880_149_131));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Router     │  quotes paths, checks slippage and deadlines
//! └──────┬──────┘
//!        │ get_pair / create_pair
//!        ▼
//! ┌─────────────┐
//! │ PairFactory  │  one Arc<Pool> per unordered pair
//! └──────┬──────┘
//!        │ mint / burn / swap (push-then-call)
//!        ▼
//! ┌─────────────┐
//! │    Pool      │  reserves, LP shares, reentrancy guard
//! └──────┬──────┘
//!        │ TokenLedger / NativeWrapper
//!        ▼
//! ┌─────────────┐
//! │    Host      │  MemoryLedger + Runtime, or a real chain
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`TokenPair`](domain::TokenPair), [`SwapPath`](domain::SwapPath), etc. |
//! | [`traits`] | External seams: [`TokenLedger`](traits::TokenLedger), [`NativeWrapper`](traits::NativeWrapper) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig): fee tier and locked minimum liquidity |
//! | [`pools`]  | [`Pool`](pools::Pool), the constant-product state machine |
//! | [`factory`] | [`PairFactory`](factory::PairFactory), the pair registry |
//! | [`router`] | [`Router`](router::Router) entry points and the quoting [`library`](router::library) |
//! | [`host`]   | [`MemoryLedger`](host::MemoryLedger) and the rollback [`Runtime`](host::Runtime) |
//! | [`math`]   | Checked arithmetic, rounding, 256-bit intermediates |
//! | [`error`]  | [`AmmError`](error::AmmError) and its [`ErrorKind`](error::ErrorKind) taxonomy |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! Events are emitted with [`tracing`]: `info` when a pair is created,
//! `debug` for every pool and router mutation, `warn` when the runtime
//! rolls a call back.  The library installs no subscriber.

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod host;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod router;
pub mod traits;
