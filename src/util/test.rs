use chrono::{DateTime, Utc};
use crate::{
    capability::MemoryToken,
    exchange::{ExchangeConfig, ExchangeLedger},
    models::{
        Address,
        Icap,
        customer::Customer,
    },
    registry::IdentityRegistry,
    util::number::Amount,
};

/// A deterministic, nonzero-for-nonzero-`n` address.
pub fn addr(n: u64) -> Address {
    Address::parse(format!("0x{:040x}", n)).unwrap()
}

/// A valid indirect ICAP with client number `n`.
pub fn icap(n: u64) -> Icap {
    Icap::indirect("IBT", "PAC1", &format!("ECGYE{:04}", n)).unwrap()
}

pub fn make_customer(address: &Address, icap: &Icap, bank_address: &Address, now: &DateTime<Utc>) -> Customer {
    Customer::builder()
        .customer_address(address.clone())
        .address_icap(icap.clone())
        .bank_address(bank_address.clone())
        .created(now.clone())
        .updated(now.clone())
        .build().unwrap()
}

/// A registry with two banks, at `addr(1)` and `addr(2)`.
pub fn make_registry(now: &DateTime<Utc>) -> IdentityRegistry {
    let mut registry = IdentityRegistry::new();
    registry.add_bank("BANCO ECUADOR A", addr(1), "EC-PAC01", now).unwrap();
    registry.add_bank("BANCO ECUADOR B", addr(2), "EC-PAC02", now).unwrap();
    registry
}

/// A registry whose only customer is `customer`, vetted by a bank at
/// `addr(1000)`.
pub fn make_registry_with_customer(customer: &Address, now: &DateTime<Utc>) -> IdentityRegistry {
    let bank = addr(1000);
    let mut registry = IdentityRegistry::new();
    registry.add_bank("BANCO ECUADOR A", bank.clone(), "EC-PAC01", now).unwrap();
    registry.add_customer(icap(1), customer.clone(), &bank, now).unwrap();
    registry
}

/// An exchange owned by `owner` issuing a fresh in-memory token.
pub fn make_exchange(owner: &Address, price: Amount, rate: Amount) -> ExchangeLedger {
    let config = ExchangeConfig::builder()
        .owner(owner.clone())
        .initial_price(price)
        .initial_rate(rate)
        .build().unwrap();
    ExchangeLedger::new(config, Box::new(MemoryToken::new("IBT", owner, 0).unwrap())).unwrap()
}
