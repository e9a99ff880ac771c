//! The core of a permissioned, identity-gated token exchange.
//!
//! Three components, none of which share state:
//!
//! - the [identity registry](registry/index.html), a Know-Your-Customer
//!   directory of banks and the customers they've vetted, addressable by
//!   account or by ICAP code
//! - the [exchange ledger](exchange/index.html), which sells a fungible token
//!   for native value at an owner-controlled price and rate, buys it back, and
//!   keeps an exact account of the pooled reserve
//! - the [routing facade](routing/index.html), which maps ticker symbols to
//!   token contracts and forwards swaps to an external router
//!
//! Everything outside these (the token ledger, payees, the swap router, price
//! feeds) is reached through the traits in [capability](capability/index.html).
//!
//! Every operation either completes entirely or fails with an
//! [Error](error/enum.Error.html) and changes nothing.

pub mod error;
#[macro_use]
mod access;
pub mod util;
pub mod models;
pub mod capability;
pub mod registry;
pub mod exchange;
pub mod routing;
pub mod oracle;

pub use access::{AccessControl, Permission, Role};
pub use error::{Error, Result};
pub use exchange::{ExchangeConfig, ExchangeLedger};
pub use models::{Address, Icap};
pub use registry::{CustomerDirectory, IdentityRegistry};
pub use routing::RoutingFacade;
