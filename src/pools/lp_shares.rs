//! LP-share ledger kept inside each pool.

use std::collections::HashMap;

use crate::domain::{Address, Liquidity};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

/// Balances and allowances of a pool's LP shares.
///
/// An allowance of `u128::MAX` is treated as unlimited and is not
/// decremented by [`transfer_from`](Self::transfer_from).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LpShares {
    total_supply: Liquidity,
    balances: HashMap<Address, Liquidity>,
    allowances: HashMap<(Address, Address), Liquidity>,
}

impl LpShares {
    pub(crate) const fn total_supply(&self) -> Liquidity {
        self.total_supply
    }

    pub(crate) fn balance_of(&self, owner: Address) -> Liquidity {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    pub(crate) fn allowance(&self, owner: Address, spender: Address) -> Liquidity {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn mint(&mut self, to: Address, amount: Liquidity) -> Result<()> {
        let total_supply = self.total_supply.safe_add(&amount)?;
        let balance = self.balance_of(to).safe_add(&amount)?;
        self.total_supply = total_supply;
        self.balances.insert(to, balance);
        Ok(())
    }

    pub(crate) fn burn(&mut self, from: Address, amount: Liquidity) -> Result<()> {
        let balance = self
            .balance_of(from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        self.total_supply = self.total_supply.safe_sub(&amount)?;
        self.balances.insert(from, balance);
        Ok(())
    }

    pub(crate) fn transfer(&mut self, from: Address, to: Address, amount: Liquidity) -> Result<()> {
        let from_balance = self
            .balance_of(from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        self.balances.insert(from, from_balance);
        // Re-read after the debit so a self-transfer nets to zero.
        let to_balance = self.balance_of(to).safe_add(&amount)?;
        self.balances.insert(to, to_balance);
        Ok(())
    }

    pub(crate) fn approve(&mut self, owner: Address, spender: Address, amount: Liquidity) {
        self.allowances.insert((owner, spender), amount);
    }

    pub(crate) fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Liquidity,
    ) -> Result<()> {
        let allowed = self.allowance(from, spender);
        let remaining = if allowed.get() == u128::MAX {
            allowed
        } else {
            allowed
                .checked_sub(&amount)
                .ok_or(AmmError::InsufficientAllowance)?
        };
        self.transfer(from, to, amount)?;
        self.allowances.insert((from, spender), remaining);
        Ok(())
    }
}
