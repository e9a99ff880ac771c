//! Accounts that native value is paid out to.
//!
//! Paying a receiver hands it control, along with the exchange itself, the
//! same way a value transfer on a ledger runs the recipient's code. A receiver
//! may try to call back into the exchange while it's being paid. The exchange
//! commits its own state before paying and refuses state-changing calls
//! until the payment returns.

use crate::{
    error::{Error, Result},
    exchange::ExchangeLedger,
    models::Address,
    util::number::Amount,
};

/// Something that can be paid native value.
pub trait ValueReceiver {
    /// The account being paid.
    fn address(&self) -> &Address;

    /// Accept `amount` of native value. Returning an error refuses the
    /// payment, and the exchange unwinds the operation that sent it.
    fn receive(&mut self, amount: Amount, exchange: &mut ExchangeLedger) -> Result<()>;
}

/// A plain account that accepts every payment and keeps a running balance.
#[derive(Clone, Debug, PartialEq)]
pub struct Wallet {
    address: Address,
    balance: Amount,
}

impl Wallet {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            balance: 0,
        }
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }
}

impl ValueReceiver for Wallet {
    fn address(&self) -> &Address {
        &self.address
    }

    fn receive(&mut self, amount: Amount, _exchange: &mut ExchangeLedger) -> Result<()> {
        self.balance = self.balance.checked_add(amount).ok_or(Error::Overflow)?;
        Ok(())
    }
}
