//! A customer is an account holder vetted by one of the registered banks.
//! Customers are addressed both by their account identifier and by their
//! [ICAP](../lib/icap/index.html) code.

use crate::models::{Address, Icap};

ledger_model! {
    /// The customer model. Keyed by `customer_address`, with a unique
    /// secondary key on `address_icap`.
    pub struct Customer {
        /// The customer's account, and the customer's primary key
        customer_address: Address,
        /// The customer's ICAP alias
        address_icap: Icap,
        /// The bank that registered this customer. This is a plain value: it
        /// isn't re-checked if that bank is later removed or moves.
        bank_address: Address,
        /// Whether this customer may currently transact
        #[builder(default = "true")]
        active: bool,
    }
    CustomerBuilder
}

impl Customer {
    pub fn is_active(&self) -> bool {
        self.active
    }
}
