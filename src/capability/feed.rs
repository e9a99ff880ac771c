use crate::error::Result;

/// An external price feed. Answers are fixed-point integers with
/// `decimals()` decimal places, so an answer of `300_012_000_000` with 8
/// decimals is a price of 3000.12.
pub trait PriceFeed {
    /// The most recent answer the feed has published.
    fn latest_answer(&self) -> Result<i128>;

    /// How many decimal places `latest_answer` carries.
    fn decimals(&self) -> u32;
}
