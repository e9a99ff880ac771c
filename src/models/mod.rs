//! Models are the records each component keeps in its tables. They're plain
//! data: the rules for creating and changing them live in the components that
//! own them ([registry], [exchange], [routing]).
//!
//! [registry]: ../registry/index.html
//! [exchange]: ../exchange/index.html
//! [routing]: ../routing/index.html

#[macro_use]
pub(crate) mod lib;

pub mod bank;
pub mod customer;
pub mod exchange;
pub mod route;

pub use lib::{address::Address, icap::Icap};
