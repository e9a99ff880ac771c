//! Token routes bind a short ticker symbol to the address of a token contract,
//! so swaps can be requested by symbol.

use crate::models::Address;
use serde::{Serialize, Deserialize};

/// A symbol → token contract binding.
#[derive(Clone, Debug, PartialEq, getset::Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct TokenRoute {
    /// Ticker symbol, for instance `DAI`
    symbol: String,
    /// The token contract the symbol resolves to
    token_address: Address,
}

impl TokenRoute {
    pub(crate) fn new<T: Into<String>>(symbol: T, token_address: Address) -> Self {
        Self {
            symbol: symbol.into(),
            token_address,
        }
    }
}
