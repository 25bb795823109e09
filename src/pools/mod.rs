//! Constant-product pools.
//!
//! [`Pool`] holds two reserves, an LP-share ledger and a reentrancy guard.
//! Pools are created by the [`PairFactory`](crate::factory::PairFactory) and
//! driven by the [`Router`](crate::router::Router), or directly by callers
//! that follow the push-then-call protocol.

pub mod constant_product;
mod guard;
mod lp_shares;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use constant_product::{Pool, PoolSnapshot, MAX_RESERVE};
