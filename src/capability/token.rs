//! The fungible token the exchange issues. The exchange asks the token ledger
//! to mint on purchase and burn on sale; the bookkeeping of balances belongs
//! to the ledger alone.

use crate::{
    error::{Error, Result},
    models::Address,
    util::number::Amount,
};
use std::collections::HashMap;

/// Mint/burn/transfer bookkeeping for a fungible token.
pub trait TokenLedger {
    /// Create `amount` new tokens in `to`'s balance.
    fn mint(&mut self, to: &Address, amount: Amount) -> Result<()>;

    /// Destroy `amount` tokens from `from`'s balance.
    fn burn(&mut self, from: &Address, amount: Amount) -> Result<()>;

    /// Move `amount` tokens between two balances.
    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<bool>;

    fn balance_of(&self, account: &Address) -> Amount;

    fn total_supply(&self) -> Amount;
}

/// An in-memory token ledger.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryToken {
    symbol: String,
    balances: HashMap<Address, Amount>,
    total_supply: Amount,
}

impl MemoryToken {
    /// Create a token with `initial_supply` held entirely by `holder`.
    pub fn new<T: Into<String>>(symbol: T, holder: &Address, initial_supply: Amount) -> Result<Self> {
        let mut token = Self {
            symbol: symbol.into(),
            ..Self::default()
        };
        if initial_supply > 0 {
            token.mint(holder, initial_supply)?;
        }
        Ok(token)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    fn debit(&mut self, from: &Address, amount: Amount) -> Result<()> {
        let balance = self.balance_of(from);
        let remaining = balance.checked_sub(amount).ok_or(Error::InsufficientBalance)?;
        if remaining == 0 {
            self.balances.remove(from);
        } else {
            self.balances.insert(from.clone(), remaining);
        }
        Ok(())
    }
}

impl TokenLedger for MemoryToken {
    fn mint(&mut self, to: &Address, amount: Amount) -> Result<()> {
        to.require_nonzero()?;
        let supply = self.total_supply.checked_add(amount).ok_or(Error::Overflow)?;
        // balance <= supply, so this can't overflow once supply didn't
        let balance = self.balance_of(to) + amount;
        self.total_supply = supply;
        self.balances.insert(to.clone(), balance);
        Ok(())
    }

    fn burn(&mut self, from: &Address, amount: Amount) -> Result<()> {
        self.debit(from, amount)?;
        self.total_supply -= amount;
        Ok(())
    }

    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<bool> {
        to.require_nonzero()?;
        self.debit(from, amount)?;
        *self.balances.entry(to.clone()).or_insert(0) += amount;
        Ok(true)
    }

    fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn total_supply(&self) -> Amount {
        self.total_supply
    }
}
