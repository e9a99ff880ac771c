//! A set of utilities for working with amounts. Amounts are unsigned integers
//! in the smallest unit of whatever they measure (native value or tokens), and
//! every operation on them is checked.

use crate::error::{Error, Result};

/// An amount of native value or tokens, in its smallest unit.
pub type Amount = u128;

/// Compute `a * b / c`, rounding down. Fails with `Overflow` instead of
/// wrapping, and with `InvalidParameter` when dividing by zero.
pub fn mul_div_floor(a: Amount, b: Amount, c: Amount) -> Result<Amount> {
    if c == 0 {
        Err(Error::InvalidParameter("division by zero".into()))?;
    }
    let product = a.checked_mul(b).ok_or(Error::Overflow)?;
    Ok(product / c)
}
