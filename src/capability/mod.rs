//! Capabilities are the narrow interfaces this core has with the systems it
//! doesn't own: the fungible token ledger, the accounts native value is paid
//! out to, the swap router, and price feeds.
//!
//! The core only ever calls through these traits. A reference token ledger
//! and wallet are included so the exchange can be run without an external
//! system behind it.

pub mod feed;
pub mod receiver;
pub mod swap;
pub mod token;

pub use feed::PriceFeed;
pub use receiver::{ValueReceiver, Wallet};
pub use swap::SwapRouter;
pub use token::{MemoryToken, TokenLedger};
