use crate::{
    error::Result,
    models::Address,
    util::number::Amount,
};

/// A third-party exchange router that can trade one token for another.
pub trait SwapRouter {
    /// Swap `amount` of `token_in` for `token_out`, returning how much
    /// `token_out` came back.
    fn swap(&mut self, token_in: &Address, token_out: &Address, amount: Amount) -> Result<Amount>;
}
