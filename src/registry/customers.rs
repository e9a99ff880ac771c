//! The customer table: customers keyed by address, plus the reverse index from
//! ICAP code to address.
//!
//! Both maps only change together, inside the methods here. Every method
//! checks everything it needs before touching either map, so a failed call
//! leaves both exactly as they were.

use chrono::{DateTime, Utc};
use crate::{
    error::{Error, Result},
    models::{
        Address,
        Icap,
        customer::Customer,
    },
};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct CustomerTable {
    by_address: HashMap<Address, Customer>,
    by_icap: HashMap<Icap, Address>,
}

impl CustomerTable {
    pub(crate) fn get(&self, address: &Address) -> Option<&Customer> {
        self.by_address.get(address)
    }

    pub(crate) fn address_for(&self, icap: &Icap) -> Option<&Address> {
        self.by_icap.get(icap)
    }

    pub(crate) fn len(&self) -> usize {
        self.by_address.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.by_address.values()
    }

    /// Insert a new customer under both its keys.
    pub(crate) fn insert(&mut self, customer: Customer) -> Result<()> {
        if self.by_address.contains_key(customer.customer_address()) {
            Err(Error::DuplicateEntity("Customer".into()))?;
        }
        if self.by_icap.contains_key(customer.address_icap()) {
            Err(Error::DuplicateEntity("ICAP".into()))?;
        }
        self.by_icap.insert(customer.address_icap().clone(), customer.customer_address().clone());
        self.by_address.insert(customer.customer_address().clone(), customer);
        Ok(())
    }

    /// Remove a customer and release its ICAP code.
    pub(crate) fn remove(&mut self, address: &Address) -> Result<Customer> {
        let customer = self.by_address.remove(address)
            .ok_or_else(|| Error::NotFound("Customer".into()))?;
        self.by_icap.remove(customer.address_icap());
        Ok(customer)
    }

    /// Move a customer to a new address, repointing its ICAP code.
    pub(crate) fn rekey(&mut self, old: &Address, new: Address, now: &DateTime<Utc>) -> Result<()> {
        if !self.by_address.contains_key(old) {
            Err(Error::NotFound("Customer".into()))?;
        }
        if self.by_address.contains_key(&new) {
            Err(Error::DuplicateEntity("Customer".into()))?;
        }
        let mut customer = self.by_address.remove(old)
            .ok_or_else(|| Error::NotFound("Customer".into()))?;
        customer.set_customer_address(new.clone());
        customer.set_updated(now.clone());
        self.by_icap.insert(customer.address_icap().clone(), new.clone());
        self.by_address.insert(new, customer);
        Ok(())
    }

    /// Set a customer's active flag.
    pub(crate) fn set_active(&mut self, address: &Address, active: bool, now: &DateTime<Utc>) -> Result<()> {
        let customer = self.by_address.get_mut(address)
            .ok_or_else(|| Error::NotFound("Customer".into()))?;
        customer.set_active(active);
        customer.set_updated(now.clone());
        Ok(())
    }

    /// Panic if the two maps have drifted apart.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.by_address.len(), self.by_icap.len());
        for (address, customer) in &self.by_address {
            assert_eq!(customer.customer_address(), address);
            assert_eq!(self.by_icap.get(customer.address_icap()), Some(address));
        }
    }
}
