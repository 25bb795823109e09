//! Fungible-token ledger consumed by pools and the router.
//!
//! The ledger is an external collaborator: the crate never implements a
//! token standard, it only moves balances through this trait.
//! [`MemoryLedger`](crate::host::MemoryLedger) is the in-memory reference
//! implementation used by tests and demos.
//!
//! # Trust Model
//!
//! Every method may call back into arbitrary code (a malicious token can
//! re-enter a pool from inside [`TokenLedger::transfer`]).  Pools therefore
//! hold their reentrancy guard for the whole mutating call and release
//! their state lock before touching the ledger.
//!
//! # Sender Authority
//!
//! There is no implicit `msg.sender`.  The `from` argument of
//! [`TokenLedger::transfer`] is the account whose balance is debited, and
//! the calling code is trusted to pass only itself there: pools pass their
//! own address, the router passes its own address.  Moving someone
//! else's funds goes through [`TokenLedger::transfer_from`], which consumes
//! an allowance.

use crate::domain::{Address, Amount};
use crate::error::Result;

/// A multi-token balance ledger.
///
/// # Errors
///
/// Mutating methods fail with:
///
/// - [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance)
///   if the debited account holds less than `amount`.
/// - [`AmmError::InsufficientAllowance`](crate::error::AmmError::InsufficientAllowance)
///   if a `transfer_from` spender is not approved for `amount`.
///
/// Implementations may return any other [`AmmError`](crate::error::AmmError)
/// to refuse a transfer; callers propagate it unchanged.
pub trait TokenLedger {
    /// Balance of `owner` in `token`.
    fn balance_of(&self, token: Address, owner: Address) -> Amount;

    /// Moves `amount` of `token` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn transfer(&mut self, token: Address, from: Address, to: Address, amount: Amount)
        -> Result<()>;

    /// Moves `amount` of `token` from `from` to `to` on behalf of
    /// `spender`, consuming `spender`'s allowance over `from`.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()>;

    /// Sets `spender`'s allowance over `owner`'s `token` to `amount`.
    ///
    /// # Errors
    ///
    /// Implementations may refuse the approval.
    fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<()>;

    /// Remaining allowance of `spender` over `owner`'s `token`.
    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount;
}
