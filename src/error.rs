//! Unified error types for the constant-product AMM core.
//!
//! Every fallible operation in the crate returns [`AmmError`].  Variants
//! are grouped into an [`ErrorKind`] taxonomy so callers can branch on the
//! class of failure (bad arguments, economic bound, expiry, re-entry)
//! without matching every variant.
//!
//! Any error aborts the whole call.  The core never retries; when running
//! under [`Runtime`](crate::host::Runtime) every effect of the failed call
//! is rolled back, and callers must re-read pool state before retrying.

use core::fmt;

/// Broad classification of an [`AmmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed arguments: identical or null tokens, duplicate pairs,
    /// short paths, forbidden recipients, bad configuration.
    Validation,
    /// An economic bound was not met: constant-product check, liquidity
    /// minted/burned, caller slippage bounds.
    EconomicInvariant,
    /// The caller-supplied deadline has passed.
    Temporal,
    /// A pool's mutual-exclusion guard was already held.
    Reentrancy,
    /// The token ledger refused a transfer.
    Ledger,
    /// Checked arithmetic failed.
    Arithmetic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::EconomicInvariant => "economic invariant",
            Self::Temporal => "temporal",
            Self::Reentrancy => "reentrancy",
            Self::Ledger => "ledger",
            Self::Arithmetic => "arithmetic",
        };
        f.write_str(name)
    }
}

/// The error type for all pool, factory, router and host operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmmError {
    /// Both tokens of a pair are the same.
    #[error("identical token addresses")]
    IdenticalAddresses,

    /// A token argument is the null address.
    #[error("token address is the null address")]
    ZeroAddress,

    /// A pool for this unordered pair is already registered.
    #[error("pair already exists")]
    PairExists,

    /// No pool is registered for the requested pair.
    #[error("pair does not exist")]
    PairNotFound,

    /// The swap path is malformed.
    #[error("invalid path: {0}")]
    InvalidPath(&'static str),

    /// The swap recipient is forbidden.
    #[error("invalid recipient: {0}")]
    InvalidRecipient(&'static str),

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A requested output is not strictly below the pool reserve, or the
    /// pool has no reserves to quote against.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A deposit would mint zero LP shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A withdrawal would return zero of either token.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// A swap received no input on either side.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// A swap output is zero or below the caller's minimum.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// A quote was requested for a zero amount.
    #[error("insufficient amount")]
    InsufficientAmount,

    /// The token-A side of a liquidity operation fell below its minimum.
    #[error("insufficient token A amount")]
    InsufficientAAmount,

    /// The token-B side of a liquidity operation fell below its minimum.
    #[error("insufficient token B amount")]
    InsufficientBAmount,

    /// The input required for an exact-output swap exceeds the caller's
    /// maximum.
    #[error("excessive input amount")]
    ExcessiveInputAmount,

    /// The fee-adjusted constant product decreased across a swap.
    #[error("constant product invariant violated")]
    InvariantViolation,

    /// The call's deadline is earlier than the current time.
    #[error("transaction expired")]
    Expired,

    /// The pool is already executing a mutating call.
    #[error("pool is locked")]
    Locked,

    /// The sender does not hold enough of the token.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The spender is not approved for enough of the token.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

impl AmmError {
    /// Returns the taxonomy class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IdenticalAddresses
            | Self::ZeroAddress
            | Self::PairExists
            | Self::PairNotFound
            | Self::InvalidPath(_)
            | Self::InvalidRecipient(_)
            | Self::InvalidConfiguration(_) => ErrorKind::Validation,
            Self::InsufficientLiquidity
            | Self::InsufficientLiquidityMinted
            | Self::InsufficientLiquidityBurned
            | Self::InsufficientInputAmount
            | Self::InsufficientOutputAmount
            | Self::InsufficientAmount
            | Self::InsufficientAAmount
            | Self::InsufficientBAmount
            | Self::ExcessiveInputAmount
            | Self::InvariantViolation => ErrorKind::EconomicInvariant,
            Self::Expired => ErrorKind::Temporal,
            Self::Locked => ErrorKind::Reentrancy,
            Self::InsufficientBalance | Self::InsufficientAllowance => ErrorKind::Ledger,
            Self::Overflow(_) | Self::Underflow(_) | Self::DivisionByZero => {
                ErrorKind::Arithmetic
            }
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;
