//! The identity registry is the Know-Your-Customer directory: the banks that
//! have been verified, and the customers each bank has vetted.
//!
//! A bank registers itself, then registers customers under its own address.
//! Customers can be found by their account address or by their ICAP code, and
//! may be switched inactive without being removed. Only active customers pass
//! the [CustomerDirectory] gate the exchange uses for purchases.
//!
//! Customers point at their bank by address only. Removing or moving a bank
//! leaves its customers untouched, still pointing at the old address.

mod customers;

use chrono::{DateTime, Utc};
use crate::{
    error::{Error, Result},
    models::{
        Address,
        Icap,
        bank::Bank,
        customer::Customer,
    },
};
use customers::CustomerTable;
use std::collections::HashMap;
use tracing::{debug, info};

/// Answers whether an account is a registered customer in good standing.
pub trait CustomerDirectory {
    fn is_active_customer(&self, address: &Address) -> bool;
}

/// The bank and customer tables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdentityRegistry {
    banks: HashMap<Address, Bank>,
    customers: CustomerTable,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bank under `address`.
    pub fn add_bank<T: Into<String>>(&mut self, name: T, address: Address, identifier: T, now: &DateTime<Utc>) -> Result<bool> {
        let name = name.into();
        if name.trim().is_empty() {
            Err(Error::InvalidParameter("bank name cannot be empty".into()))?;
        }
        address.require_nonzero()?;
        if self.banks.contains_key(&address) {
            Err(Error::DuplicateEntity("Bank".into()))?;
        }
        let bank = Bank::builder()
            .name(name)
            .bank_address(address.clone())
            .identifier(identifier)
            .created(now.clone())
            .updated(now.clone())
            .build()
            .map_err(|e| Error::BuilderFailed(e))?;
        info!(bank = %address, name = bank.name().as_str(), "bank added");
        self.banks.insert(address, bank);
        Ok(true)
    }

    /// Move a bank to a new address. Name, identifier, and creation time carry
    /// over; the old address stops resolving.
    pub fn update_bank_address(&mut self, old: &Address, new: Address, now: &DateTime<Utc>) -> Result<bool> {
        new.require_nonzero()?;
        if !self.banks.contains_key(old) {
            Err(Error::NotFound("Bank".into()))?;
        }
        if self.banks.contains_key(&new) {
            Err(Error::DuplicateEntity("Bank".into()))?;
        }
        let mut bank = self.banks.remove(old)
            .ok_or_else(|| Error::NotFound("Bank".into()))?;
        bank.set_bank_address(new.clone());
        bank.set_updated(now.clone());
        info!(from = %old, to = %new, "bank address updated");
        self.banks.insert(new, bank);
        Ok(true)
    }

    /// Remove a bank. Its customers are left in place.
    pub fn remove_bank(&mut self, address: &Address) -> Result<bool> {
        self.banks.remove(address)
            .ok_or_else(|| Error::NotFound("Bank".into()))?;
        info!(bank = %address, "bank removed");
        Ok(true)
    }

    pub fn get_bank_details(&self, address: &Address) -> Result<&Bank> {
        self.banks.get(address)
            .ok_or_else(|| Error::NotFound("Bank".into()))
    }

    /// Register a customer under an existing bank. New customers are active.
    pub fn add_customer(&mut self, icap: Icap, address: Address, bank_address: &Address, now: &DateTime<Utc>) -> Result<bool> {
        if !self.banks.contains_key(bank_address) {
            Err(Error::NotFound("Bank".into()))?;
        }
        address.require_nonzero()?;
        let customer = Customer::builder()
            .customer_address(address.clone())
            .address_icap(icap)
            .bank_address(bank_address.clone())
            .active(true)
            .created(now.clone())
            .updated(now.clone())
            .build()
            .map_err(|e| Error::BuilderFailed(e))?;
        self.customers.insert(customer)?;
        info!(customer = %address, bank = %bank_address, "customer added");
        Ok(true)
    }

    /// Remove a customer, freeing its ICAP code for reuse.
    pub fn remove_customer(&mut self, address: &Address) -> Result<bool> {
        let customer = self.customers.remove(address)?;
        info!(customer = %address, icap = %customer.address_icap(), "customer removed");
        Ok(true)
    }

    pub fn get_customer_details(&self, address: &Address) -> Result<&Customer> {
        self.customers.get(address)
            .ok_or_else(|| Error::NotFound("Customer".into()))
    }

    /// Resolve an ICAP code to the address of the customer holding it.
    pub fn get_customer_address_from_icap(&self, icap: &Icap) -> Result<&Address> {
        let address = self.customers.address_for(icap)
            .ok_or_else(|| Error::NotFound("ICAP".into()))?;
        debug!(icap = %icap, customer = %address, "icap resolved");
        Ok(address)
    }

    /// Mark a customer active or inactive.
    pub fn change_status_customer(&mut self, address: &Address, active: bool, now: &DateTime<Utc>) -> Result<bool> {
        self.customers.set_active(address, active, now)?;
        info!(customer = %address, active, "customer status changed");
        Ok(true)
    }

    /// Move a customer to a new address. The customer's ICAP code follows it.
    pub fn update_customer_address(&mut self, old: &Address, new: Address, now: &DateTime<Utc>) -> Result<bool> {
        new.require_nonzero()?;
        let log_new = new.clone();
        self.customers.rekey(old, new, now)?;
        info!(from = %old, to = %log_new, "customer address updated");
        Ok(true)
    }

    /// All customers registered by the bank at `bank_address`.
    pub fn customers_of_bank(&self, bank_address: &Address) -> Vec<&Customer> {
        self.customers.iter()
            .filter(|c| c.bank_address() == bank_address)
            .collect()
    }

    pub fn banks(&self) -> impl Iterator<Item = &Bank> {
        self.banks.values()
    }

    pub fn bank_count(&self) -> usize {
        self.banks.len()
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }
}

impl CustomerDirectory for IdentityRegistry {
    fn is_active_customer(&self, address: &Address) -> bool {
        self.customers.get(address)
            .map(|c| c.is_active())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{self, test::*};
    use proptest::prelude::*;

    const ADDR1: &str = "0x1c7D3Eef242473c2C9d3aDe0B21caE7251aec1F8";
    const ADDR2: &str = "0xa1b66127Fa2C8A6d7871FaB4aCCB5e12C548759b";
    const ADDR3: &str = "0x92fe4ecB478689A4c3950914DFF892f30960Fab9";
    const FAKE_BANK: &str = "0xe96733F411A086543B5D550B42Ab3853131c03c8";

    fn a(val: &str) -> Address {
        Address::parse(val).unwrap()
    }

    #[test]
    fn can_add_bank() {
        let now = util::time::now();
        let mut registry = IdentityRegistry::new();
        assert_eq!(registry.add_bank("BANCO ECUADOR A", a(ADDR1), "EC-PAC01", &now), Ok(true));
        let bank = registry.get_bank_details(&a(ADDR1)).unwrap();
        assert_eq!(bank.name(), "BANCO ECUADOR A");
        assert_eq!(bank.bank_address(), &a(ADDR1));
        assert_eq!(bank.identifier(), "EC-PAC01");
        assert_eq!(bank.created(), &now);
        assert_eq!(bank.updated(), &now);
        assert_eq!(registry.bank_count(), 1);
    }

    #[test]
    fn rejects_duplicate_bank() {
        let now = util::time::now();
        let mut registry = IdentityRegistry::new();
        registry.add_bank("BANCO ECUADOR A", a(ADDR3), "EC-PAC03", &now).unwrap();
        let res = registry.add_bank("BANCO ECUADOR B", a(ADDR3), "EC-PAC04", &now);
        assert_eq!(res, Err(Error::DuplicateEntity("Bank".into())));
        assert_eq!(res.unwrap_err().to_string(), "This Bank is already exist!");
        // the first registration is untouched
        assert_eq!(registry.get_bank_details(&a(ADDR3)).unwrap().name(), "BANCO ECUADOR A");
    }

    #[test]
    fn rejects_bad_bank_params() {
        let now = util::time::now();
        let mut registry = IdentityRegistry::new();
        assert!(matches!(registry.add_bank("", a(ADDR1), "EC-PAC01", &now), Err(Error::InvalidParameter(_))));
        assert!(matches!(registry.add_bank("   ", a(ADDR1), "EC-PAC01", &now), Err(Error::InvalidParameter(_))));
        assert!(matches!(registry.add_bank("BANCO", Address::zero(), "EC-PAC01", &now), Err(Error::InvalidParameter(_))));
        assert_eq!(registry.bank_count(), 0);
    }

    #[test]
    fn can_update_bank_address() {
        let now = util::time::now();
        let mut registry = IdentityRegistry::new();
        registry.add_bank("BANCO ECUADOR B", a(ADDR2), "EC-PAC01", &now).unwrap();

        let now2 = util::time::now();
        assert_eq!(registry.update_bank_address(&a(ADDR2), a(ADDR3), &now2), Ok(true));
        let bank = registry.get_bank_details(&a(ADDR3)).unwrap();
        assert_eq!(bank.name(), "BANCO ECUADOR B");
        assert_eq!(bank.identifier(), "EC-PAC01");
        assert_eq!(bank.bank_address(), &a(ADDR3));
        assert_eq!(bank.created(), &now);
        assert_eq!(bank.updated(), &now2);
        assert_eq!(registry.get_bank_details(&a(ADDR2)), Err(Error::NotFound("Bank".into())));

        assert_eq!(registry.update_bank_address(&a(ADDR2), a(ADDR1), &now2), Err(Error::NotFound("Bank".into())));
        registry.add_bank("BANCO ECUADOR A", a(ADDR1), "EC-PAC02", &now).unwrap();
        assert_eq!(registry.update_bank_address(&a(ADDR1), a(ADDR3), &now2), Err(Error::DuplicateEntity("Bank".into())));
        assert_eq!(registry.get_bank_details(&a(ADDR1)).unwrap().name(), "BANCO ECUADOR A");
        assert_eq!(registry.bank_count(), 2);
    }

    #[test]
    fn can_remove_bank() {
        let now = util::time::now();
        let mut registry = IdentityRegistry::new();
        registry.add_bank("BANCO ECUADOR C", a(ADDR1), "EC-PAC02", &now).unwrap();
        assert_eq!(registry.get_bank_details(&a(ADDR1)).unwrap().bank_address(), &a(ADDR1));
        assert_eq!(registry.remove_bank(&a(ADDR1)), Ok(true));
        assert_eq!(registry.get_bank_details(&a(ADDR1)), Err(Error::NotFound("Bank".into())));
        assert_eq!(registry.remove_bank(&a(ADDR1)), Err(Error::NotFound("Bank".into())));
        // the address is free again
        assert_eq!(registry.add_bank("BANCO ECUADOR D", a(ADDR1), "EC-PAC05", &now), Ok(true));
    }

    #[test]
    fn can_add_customer() {
        let now = util::time::now();
        let mut registry = IdentityRegistry::new();
        registry.add_bank("BANCO ECUADOR A", a(ADDR3), "EC-PAC03", &now).unwrap();
        let icap = Icap::parse("XE36IBTPAC1ECGYE0001").unwrap();
        assert_eq!(registry.add_customer(icap.clone(), a(ADDR1), &a(ADDR3), &now), Ok(true));

        let customer = registry.get_customer_details(&a(ADDR1)).unwrap();
        assert_eq!(customer.customer_address(), &a(ADDR1));
        assert_eq!(customer.address_icap(), &icap);
        assert_eq!(customer.bank_address(), &a(ADDR3));
        assert_eq!(customer.active(), &true);
        assert_eq!(customer.created(), &now);
        assert!(registry.is_active_customer(&a(ADDR1)));
        assert_eq!(registry.customers_of_bank(&a(ADDR3)).len(), 1);
    }

    #[test]
    fn customer_needs_existing_bank() {
        let now = util::time::now();
        let mut registry = IdentityRegistry::new();
        let icap = Icap::parse("XE36IBTPAC1ECGYE0001").unwrap();
        let res = registry.add_customer(icap.clone(), a(ADDR1), &a(FAKE_BANK), &now);
        assert_eq!(res, Err(Error::NotFound("Bank".into())));
        assert_eq!(res.unwrap_err().to_string(), "This Bank is not exist!");

        registry.add_bank("BANCO ECUADOR A", a(ADDR3), "EC-PAC03", &now).unwrap();
        registry.remove_bank(&a(ADDR3)).unwrap();
        let res = registry.add_customer(icap.clone(), a(ADDR1), &a(ADDR3), &now);
        assert_eq!(res, Err(Error::NotFound("Bank".into())));
        assert_eq!(registry.customer_count(), 0);
        assert_eq!(registry.get_customer_address_from_icap(&icap), Err(Error::NotFound("ICAP".into())));
    }

    #[test]
    fn rejects_duplicate_customer() {
        let now = util::time::now();
        let mut registry = make_registry(&now);
        registry.add_customer(icap(1), addr(10), &addr(1), &now).unwrap();
        assert_eq!(registry.add_customer(icap(2), addr(10), &addr(1), &now), Err(Error::DuplicateEntity("Customer".into())));
        assert_eq!(registry.add_customer(icap(1), addr(11), &addr(1), &now), Err(Error::DuplicateEntity("ICAP".into())));
        assert!(matches!(registry.add_customer(icap(3), Address::zero(), &addr(1), &now), Err(Error::InvalidParameter(_))));
        assert_eq!(registry.customer_count(), 1);
    }

    #[test]
    fn can_remove_customer() {
        let now = util::time::now();
        let mut registry = IdentityRegistry::new();
        registry.add_bank("BANCO ECUADOR A", a(ADDR3), "EC-PAC03", &now).unwrap();
        let icap = Icap::parse("XE36IBTPAC1ECGYE0001").unwrap();
        registry.add_customer(icap.clone(), a(ADDR1), &a(ADDR3), &now).unwrap();
        assert_eq!(registry.get_customer_details(&a(ADDR1)).unwrap().customer_address(), &a(ADDR1));
        assert_eq!(registry.remove_customer(&a(ADDR1)), Ok(true));
        assert_eq!(registry.get_customer_details(&a(ADDR1)), Err(Error::NotFound("Customer".into())));
        assert_eq!(registry.get_customer_address_from_icap(&icap), Err(Error::NotFound("ICAP".into())));
        assert_eq!(registry.remove_customer(&a(ADDR1)), Err(Error::NotFound("Customer".into())));
        assert!(!registry.is_active_customer(&a(ADDR1)));
    }

    #[test]
    fn can_resolve_icap() {
        let now = util::time::now();
        let mut registry = IdentityRegistry::new();
        registry.add_bank("BANCO ECUADOR A", a(ADDR3), "EC-PAC03", &now).unwrap();
        let icap = Icap::parse("XE36IBTPAC1ECGYE0001").unwrap();
        registry.add_customer(icap.clone(), a(ADDR1), &a(ADDR3), &now).unwrap();

        let address = registry.get_customer_address_from_icap(&icap).unwrap().clone();
        let customer = registry.get_customer_details(&address).unwrap();
        assert_eq!(customer.address_icap(), &icap);
    }

    #[test]
    fn can_change_customer_status() {
        let now = util::time::now();
        let mut registry = make_registry(&now);
        registry.add_customer(icap(1), addr(10), &addr(1), &now).unwrap();

        let now2 = util::time::now();
        assert_eq!(registry.change_status_customer(&addr(10), false, &now2), Ok(true));
        let customer = registry.get_customer_details(&addr(10)).unwrap();
        assert_eq!(customer.active(), &false);
        assert_eq!(customer.updated(), &now2);
        assert!(!registry.is_active_customer(&addr(10)));
        // still resolvable while inactive
        assert_eq!(registry.get_customer_address_from_icap(&icap(1)), Ok(&addr(10)));

        registry.change_status_customer(&addr(10), true, &now2).unwrap();
        assert!(registry.is_active_customer(&addr(10)));
        assert_eq!(registry.change_status_customer(&addr(11), false, &now2), Err(Error::NotFound("Customer".into())));
    }

    #[test]
    fn can_update_customer_address() {
        let now = util::time::now();
        let mut registry = IdentityRegistry::new();
        registry.add_bank("BANCO ECUADOR A", a(ADDR3), "EC-PAC03", &now).unwrap();
        let code = Icap::parse("XE09IBTPAC1ECGYE0002").unwrap();
        let old = a("0x1dd39176D300c059A79D2d4c265bD714492EDF9e");
        let new = a("0xFbb48F938f2BC530d5f06505200971cc7244eA51");
        registry.add_customer(code.clone(), old.clone(), &a(ADDR3), &now).unwrap();

        assert_eq!(registry.update_customer_address(&old, new.clone(), &now), Ok(true));
        assert_eq!(registry.get_customer_details(&old), Err(Error::NotFound("Customer".into())));
        assert_eq!(registry.get_customer_address_from_icap(&code), Ok(&new));
        assert_eq!(registry.get_customer_details(&new).unwrap().address_icap(), &code);

        assert_eq!(registry.update_customer_address(&old, a(ADDR2), &now), Err(Error::NotFound("Customer".into())));
        registry.add_customer(icap(1), a(ADDR2), &a(ADDR3), &now).unwrap();
        assert_eq!(registry.update_customer_address(&a(ADDR2), new.clone(), &now), Err(Error::DuplicateEntity("Customer".into())));
        assert_eq!(registry.update_customer_address(&new, new.clone(), &now), Err(Error::DuplicateEntity("Customer".into())));
        assert_eq!(registry.get_customer_address_from_icap(&icap(1)), Ok(&a(ADDR2)));
    }

    #[test]
    fn removing_bank_keeps_customers() {
        let now = util::time::now();
        let mut registry = make_registry(&now);
        registry.add_customer(icap(1), addr(10), &addr(1), &now).unwrap();
        registry.remove_bank(&addr(1)).unwrap();

        let customer = registry.get_customer_details(&addr(10)).unwrap();
        assert_eq!(customer.bank_address(), &addr(1));
        assert!(registry.is_active_customer(&addr(10)));
        assert_eq!(registry.customers_of_bank(&addr(1)).len(), 1);
    }

    #[derive(Clone, Debug)]
    enum RegistryOp {
        Add(u8, u8),
        Remove(u8),
        Move(u8, u8),
    }

    fn op_strategy() -> impl Strategy<Value = RegistryOp> {
        prop_oneof![
            (0u8..6, 0u8..6).prop_map(|(c, i)| RegistryOp::Add(c, i)),
            (0u8..6).prop_map(RegistryOp::Remove),
            (0u8..6, 0u8..6).prop_map(|(from, to)| RegistryOp::Move(from, to)),
        ]
    }

    proptest! {
        #[test]
        fn icap_index_tracks_customers(ops in proptest::collection::vec(op_strategy(), 0..40)) {
            let now = util::time::now();
            let mut registry = make_registry(&now);
            for op in ops {
                let before = registry.clone();
                let res = match op {
                    RegistryOp::Add(c, i) => registry.add_customer(icap(i as u64), addr(100 + c as u64), &addr(1), &now),
                    RegistryOp::Remove(c) => registry.remove_customer(&addr(100 + c as u64)),
                    RegistryOp::Move(from, to) => registry.update_customer_address(&addr(100 + from as u64), addr(100 + to as u64), &now),
                };
                if res.is_err() {
                    prop_assert_eq!(&registry, &before);
                }
                registry.customers.assert_consistent();
                for customer in registry.customers.iter() {
                    prop_assert_eq!(
                        registry.get_customer_address_from_icap(customer.address_icap()),
                        Ok(customer.customer_address())
                    );
                }
            }
        }
    }
}
