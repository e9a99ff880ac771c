//! A bank is a verified financial institution. Banks register themselves in
//! the [identity registry] and then register their customers under their own
//! address.
//!
//! [identity registry]: ../../registry/index.html

use crate::models::Address;

ledger_model! {
    /// The bank model. Keyed by `bank_address`.
    pub struct Bank {
        /// The bank's display name. Never empty.
        name: String,
        /// The account the bank operates from, and the bank's primary key
        bank_address: Address,
        /// A short institution code, for instance a country/branch code like
        /// `EC-PAC01`
        identifier: String,
    }
    BankBuilder
}
