//! The pair registry.
//!
//! A [`PairFactory`] creates at most one [`Pool`](crate::pools::Pool) per
//! unordered token pair and hands out shared `Arc` handles to it.
//!
//! # Usage
//!
//! ```rust
//! use hydra_cpmm::config::PoolConfig;
//! use hydra_cpmm::domain::Address;
//! use hydra_cpmm::factory::PairFactory;
//!
//! let factory = PairFactory::new(Address::repeat_byte(0xfa), PoolConfig::default());
//! let pool = factory
//!     .create_pair(Address::repeat_byte(1), Address::repeat_byte(2))
//!     .expect("new pair");
//! assert_eq!(factory.all_pairs_length(), 1);
//! assert_eq!(pool.fee_tier(), PoolConfig::default().fee_tier());
//! ```

mod pair_factory;

pub use pair_factory::{FactorySnapshot, PairFactory};
