//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_cpmm::prelude::*;
//! ```

pub use crate::domain::{
    Address, Amount, BasisPoints, CallContext, Deadline, FeeTier, Liquidity, Rounding, SwapPath,
    Timestamp, TokenPair,
};

pub use crate::traits::{NativeWrapper, TokenLedger};

pub use crate::math::CheckedArithmetic;

pub use crate::config::PoolConfig;

pub use crate::error::{AmmError, ErrorKind, Result};

pub use crate::factory::PairFactory;

pub use crate::pools::Pool;

pub use crate::router::Router;

pub use crate::host::{MemoryLedger, Runtime};
