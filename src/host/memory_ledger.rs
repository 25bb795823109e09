//! In-memory reference ledger.

use std::collections::HashMap;

use crate::domain::{Address, Amount};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;
use crate::traits::{NativeWrapper, TokenLedger};

/// A [`TokenLedger`] and [`NativeWrapper`] backed by hash maps.
///
/// Cloning is the snapshot mechanism used by
/// [`Runtime`](super::Runtime): a failed call restores the clone taken
/// before it ran.
///
/// An allowance of `u128::MAX` is unlimited and never decremented.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::{Address, Amount};
/// use hydra_cpmm::host::MemoryLedger;
/// use hydra_cpmm::traits::TokenLedger;
///
/// let token = Address::repeat_byte(1);
/// let alice = Address::repeat_byte(0xa1);
/// let bob = Address::repeat_byte(0xb0);
///
/// let mut ledger = MemoryLedger::new(Address::repeat_byte(0xee));
/// ledger.mint(token, alice, Amount::new(100)).expect("mint");
/// ledger.transfer(token, alice, bob, Amount::new(40)).expect("transfer");
/// assert_eq!(ledger.balance_of(token, bob), Amount::new(40));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLedger {
    wrapped_native: Address,
    balances: HashMap<(Address, Address), Amount>,
    allowances: HashMap<(Address, Address, Address), Amount>,
    native: HashMap<Address, Amount>,
}

impl MemoryLedger {
    /// Creates an empty ledger whose wrapped native token is
    /// `wrapped_native`.
    #[must_use]
    pub fn new(wrapped_native: Address) -> Self {
        Self {
            wrapped_native,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            native: HashMap::new(),
        }
    }

    /// Creates `amount` of `token` out of thin air for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance would overflow.
    pub fn mint(&mut self, token: Address, owner: Address, amount: Amount) -> Result<()> {
        self.credit(token, owner, amount)
    }

    /// Credits `owner` with `amount` of native value.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance would overflow.
    pub fn credit_native(&mut self, owner: Address, amount: Amount) -> Result<()> {
        let balance = self.native_balance_of(owner).safe_add(&amount)?;
        self.native.insert(owner, balance);
        Ok(())
    }

    fn credit(&mut self, token: Address, owner: Address, amount: Amount) -> Result<()> {
        let balance = self.balance_of(token, owner).safe_add(&amount)?;
        self.balances.insert((token, owner), balance);
        Ok(())
    }

    fn debit(&mut self, token: Address, owner: Address, amount: Amount) -> Result<()> {
        let balance = self
            .balance_of(token, owner)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        self.balances.insert((token, owner), balance);
        Ok(())
    }

    fn debit_native(&mut self, owner: Address, amount: Amount) -> Result<()> {
        let balance = self
            .native_balance_of(owner)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        self.native.insert(owner, balance);
        Ok(())
    }
}

impl TokenLedger for MemoryLedger {
    fn balance_of(&self, token: Address, owner: Address) -> Amount {
        self.balances
            .get(&(token, owner))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.debit(token, from, amount)?;
        self.credit(token, to, amount)
    }

    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        let allowed = self.allowance(token, from, spender);
        if allowed != Amount::MAX {
            let remaining = allowed
                .checked_sub(&amount)
                .ok_or(AmmError::InsufficientAllowance)?;
            self.transfer(token, from, to, amount)?;
            self.allowances.insert((token, from, spender), remaining);
            return Ok(());
        }
        self.transfer(token, from, to, amount)
    }

    fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<()> {
        self.allowances.insert((token, owner, spender), amount);
        Ok(())
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }
}

impl NativeWrapper for MemoryLedger {
    fn wrapped_token(&self) -> Address {
        self.wrapped_native
    }

    fn native_balance_of(&self, owner: Address) -> Amount {
        self.native.get(&owner).copied().unwrap_or_default()
    }

    fn send_native(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        self.debit_native(from, amount)?;
        self.credit_native(to, amount)
    }

    fn deposit(&mut self, owner: Address, amount: Amount) -> Result<()> {
        self.debit_native(owner, amount)?;
        self.credit(self.wrapped_native, owner, amount)
    }

    fn withdraw(&mut self, owner: Address, amount: Amount) -> Result<()> {
        self.debit(self.wrapped_native, owner, amount)?;
        self.credit_native(owner, amount)
    }
}
