//! Price lookups against external feeds.
//!
//! Feeds publish fixed-point answers at their own precision. These helpers
//! rescale an answer to whatever precision the caller asks for, and derive
//! a cross price from two feeds that share a quote currency (ETH/USD and
//! EUR/USD give ETH/EUR). Results are integers scaled by `10^decimals` and
//! truncated.

use crate::{
    capability::PriceFeed,
    error::{Error, Result},
    util::number::Amount,
};
use rust_decimal::prelude::*;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Largest precision a caller may request.
pub const MAX_DECIMALS: u32 = 18;

fn check_decimals(decimals: u32) -> Result<()> {
    if decimals == 0 || decimals > MAX_DECIMALS {
        Err(Error::InvalidParameter(format!("decimals must be between 1 and {}", MAX_DECIMALS)))?;
    }
    Ok(())
}

/// A feed's latest answer as an exact decimal.
fn read(feed: &dyn PriceFeed) -> Result<Decimal> {
    let answer = feed.latest_answer()?;
    if answer <= 0 {
        Err(Error::InvalidParameter(format!("feed answered a non-positive price {}", answer)))?;
    }
    Decimal::try_from_i128_with_scale(answer, feed.decimals())
        .map_err(|_| Error::Overflow)
}

/// Scale a price up by `10^decimals`, dropping what's left after the point.
fn scale(price: Decimal, decimals: u32) -> Result<Decimal> {
    let factor = Decimal::from(10u64.pow(decimals));
    price.checked_mul(factor)
        .map(|scaled| scaled.trunc())
        .ok_or(Error::Overflow)
}

fn to_fixed(price: Decimal, decimals: u32) -> Result<Amount> {
    scale(price, decimals)?
        .to_u128()
        .ok_or(Error::Overflow)
}

/// The feed's price at `decimals` precision.
pub fn price_of(feed: &dyn PriceFeed, decimals: u32) -> Result<Amount> {
    check_decimals(decimals)?;
    let price = to_fixed(read(feed)?, decimals)?;
    debug!(price, decimals, "feed price read");
    Ok(price)
}

/// The price of `base` in units of `quote` at `decimals` precision. Both
/// answers are brought to `decimals` first, then divided. The quotient is
/// taken in `Decimal` so the result only has to fit once it's rescaled.
pub fn derived_price(base: &dyn PriceFeed, quote: &dyn PriceFeed, decimals: u32) -> Result<Amount> {
    check_decimals(decimals)?;
    let base_price = scale(read(base)?, decimals)?;
    let quote_price = scale(read(quote)?, decimals)?;
    if quote_price.is_zero() {
        Err(Error::InvalidParameter("quote price rounds to zero at this precision".into()))?;
    }
    let ratio = base_price.checked_div(quote_price)
        .ok_or(Error::Overflow)?;
    let price = to_fixed(ratio, decimals)?;
    debug!(price, decimals, "derived price computed");
    Ok(price)
}

/// Named feeds, for instance `ETH/USD`, looked up by pair.
#[derive(Default)]
pub struct PriceOracle {
    feeds: HashMap<String, Box<dyn PriceFeed>>,
}

impl fmt::Debug for PriceOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriceOracle")
            .field("pairs", &self.feeds.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PriceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the feed for `pair`.
    pub fn add_feed<T: Into<String>>(&mut self, pair: T, feed: Box<dyn PriceFeed>) {
        self.feeds.insert(pair.into(), feed);
    }

    fn feed(&self, pair: &str) -> Result<&dyn PriceFeed> {
        self.feeds.get(pair)
            .map(|feed| feed.as_ref())
            .ok_or_else(|| Error::NotFound(format!("price feed {}", pair)))
    }

    pub fn price_of(&self, pair: &str, decimals: u32) -> Result<Amount> {
        price_of(self.feed(pair)?, decimals)
    }

    pub fn derived_price(&self, base_pair: &str, quote_pair: &str, decimals: u32) -> Result<Amount> {
        derived_price(self.feed(base_pair)?, self.feed(quote_pair)?, decimals)
    }
}
