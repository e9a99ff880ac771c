#[macro_use]
pub mod ledger_model;
pub mod address;
pub mod icap;
