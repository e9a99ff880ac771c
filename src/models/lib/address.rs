//! Account identifiers. Every bank, customer, role holder, and token contract
//! is addressed by one of these.

use crate::error::{Error, Result};
use serde::{Serialize, Deserialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// Number of hex digits in an address (20 bytes).
const HEX_LEN: usize = 40;

/// A `0x`-prefixed, 20-byte account identifier.
///
/// Addresses compare case-insensitively, so they're normalized to lowercase
/// on parse.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse an address from its textual form.
    pub fn parse<T: AsRef<str>>(val: T) -> Result<Self> {
        let val = val.as_ref().trim();
        let hex = val.strip_prefix("0x")
            .or_else(|| val.strip_prefix("0X"))
            .ok_or_else(|| Error::InvalidParameter(format!("address {} is missing its 0x prefix", val)))?;
        if hex.len() != HEX_LEN || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Err(Error::InvalidParameter(format!("address {} is not 20 hex bytes", val)))?;
        }
        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    /// The all-zero address. It parses, but no table accepts it as a key.
    pub fn zero() -> Self {
        Self(format!("0x{}", "0".repeat(HEX_LEN)))
    }

    pub fn is_zero(&self) -> bool {
        self.0[2..].chars().all(|c| c == '0')
    }

    /// Return a string ref for this address
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Fail with `InvalidParameter` if this is the zero address.
    pub(crate) fn require_nonzero(&self) -> Result<()> {
        if self.is_zero() {
            Err(Error::InvalidParameter("the zero address cannot be used here".into()))?;
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = Error;

    fn try_from(val: String) -> Result<Self> {
        Self::parse(val)
    }
}

impl TryFrom<&str> for Address {
    type Error = Error;

    fn try_from(val: &str) -> Result<Self> {
        Self::parse(val)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.0
    }
}
