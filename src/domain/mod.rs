//! Fundamental domain value types.
//!
//! Addresses, token amounts, LP shares, fee tiers, canonical token pairs,
//! swap paths and deadlines.  All are small `Copy` or cheaply cloned
//! newtypes with validated constructors, so the pool and router operate on
//! values that already satisfy their basic invariants.

mod address;
mod amount;
mod basis_points;
mod call_context;
mod deadline;
mod fee_tier;
mod liquidity;
mod path;
mod rounding;
mod token_pair;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use call_context::CallContext;
pub use deadline::{Deadline, Timestamp};
pub use fee_tier::FeeTier;
pub use liquidity::Liquidity;
pub use path::SwapPath;
pub use rounding::Rounding;
pub use token_pair::{sort_tokens, TokenPair};
