//! The exchange parameters: what a token costs in native value, the rate that
//! scales conversions, and how much native value sits in the pooled reserve.
//!
//! Conversions are integer-only and round down:
//!
//! ```text
//! tokens  = value  * rate  / price
//! payout  = tokens * price / rate
//! ```

use crate::{
    error::{Error, Result},
    util::number::{self, Amount},
};
use serde::{Serialize, Deserialize};

/// Price, rate, and reserve. Only the [exchange ledger] mutates these.
///
/// [exchange ledger]: ../../exchange/struct.ExchangeLedger.html
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExchangeParameters {
    /// Native value per token, in the native unit's smallest denomination
    price_native_per_token: Amount,
    /// Scaling factor applied to every conversion
    rate: Amount,
    /// Pooled native value: everything received minus everything paid out
    reserve_native_balance: Amount,
}

fn require_positive(val: Amount, what: &str) -> Result<Amount> {
    if val == 0 {
        Err(Error::InvalidParameter(format!("{} must be positive", what)))?;
    }
    Ok(val)
}

impl ExchangeParameters {
    pub(crate) fn new(price: Amount, rate: Amount) -> Result<Self> {
        Ok(Self {
            price_native_per_token: require_positive(price, "price")?,
            rate: require_positive(rate, "rate")?,
            reserve_native_balance: 0,
        })
    }

    pub fn price_native_per_token(&self) -> Amount {
        self.price_native_per_token
    }

    pub fn rate(&self) -> Amount {
        self.rate
    }

    pub fn reserve_native_balance(&self) -> Amount {
        self.reserve_native_balance
    }

    pub(crate) fn set_price(&mut self, price: Amount) -> Result<()> {
        self.price_native_per_token = require_positive(price, "price")?;
        Ok(())
    }

    pub(crate) fn set_rate(&mut self, rate: Amount) -> Result<()> {
        self.rate = require_positive(rate, "rate")?;
        Ok(())
    }

    /// How many tokens `value` buys at the current price and rate.
    pub fn tokens_for(&self, value: Amount) -> Result<Amount> {
        number::mul_div_floor(value, self.rate, self.price_native_per_token)
    }

    /// How much native value redeeming `tokens` pays out.
    pub fn payout_for(&self, tokens: Amount) -> Result<Amount> {
        number::mul_div_floor(tokens, self.price_native_per_token, self.rate)
    }

    /// Add value to the reserve. Returns the updated reserve.
    pub(crate) fn credit_reserve(&mut self, value: Amount) -> Result<Amount> {
        self.reserve_native_balance = self.reserve_native_balance.checked_add(value)
            .ok_or(Error::Overflow)?;
        Ok(self.reserve_native_balance)
    }

    /// Take value out of the reserve. The reserve cannot go below zero.
    /// Returns the updated reserve.
    pub(crate) fn debit_reserve(&mut self, value: Amount) -> Result<Amount> {
        self.reserve_native_balance = self.reserve_native_balance.checked_sub(value)
            .ok_or(Error::InsufficientReserve)?;
        Ok(self.reserve_native_balance)
    }
}
