//! Native-asset wrapper.
//!
//! The chain's native value is not a ledger token.  A wrapper converts it
//! 1:1 into a fungible token ([`NativeWrapper::wrapped_token`]) so pools
//! only ever hold ledger balances.  The router's `*_eth` entry points wrap
//! on the way in and unwrap on the way out.

use super::TokenLedger;
use crate::domain::{Address, Amount};
use crate::error::Result;

/// A [`TokenLedger`] that also tracks native value and wraps it.
pub trait NativeWrapper: TokenLedger {
    /// Ledger id of the wrapped native token.
    fn wrapped_token(&self) -> Address;

    /// Native balance of `owner`.
    fn native_balance_of(&self, owner: Address) -> Amount;

    /// Moves native value from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance)
    /// if `from` holds less than `amount`.
    fn send_native(&mut self, from: Address, to: Address, amount: Amount) -> Result<()>;

    /// Converts `amount` of `owner`'s native value into wrapped tokens
    /// credited to `owner`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance)
    /// if `owner` holds less native value than `amount`.
    fn deposit(&mut self, owner: Address, amount: Amount) -> Result<()>;

    /// Burns `amount` of `owner`'s wrapped tokens and credits the same
    /// native value to `owner`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance)
    /// if `owner` holds fewer wrapped tokens than `amount`.
    fn withdraw(&mut self, owner: Address, amount: Amount) -> Result<()>;
}
