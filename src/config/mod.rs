//! Pool configuration.
//!
//! [`PoolConfig`] is the declarative blueprint a
//! [`PairFactory`](crate::factory::PairFactory) applies to every pool it
//! creates.

mod pool_config;

pub use pool_config::{PoolConfig, DEFAULT_MINIMUM_LIQUIDITY};
