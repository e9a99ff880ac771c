//! ICAP codes are IBAN-shaped aliases for account identifiers, using the
//! pseudo country code `XE`. Customers are registered under one and can be
//! looked up by it.
//!
//! The indirect form (`XE` + check digits + 16 characters) splits into an
//! asset code, an institution code, and a client identifier, for instance
//! `XE36IBTPAC1ECGYE0001` is asset `IBT`, institution `PAC1`, client
//! `ECGYE0001`.

use crate::error::{Error, Result};
use serde::{Serialize, Deserialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

const COUNTRY: &str = "XE";
const INDIRECT_LEN: usize = 20;
const MIN_LEN: usize = 5;
const MAX_LEN: usize = 35;

/// A checksummed ICAP code, stored uppercase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Icap(String);

/// IBAN mod-97 over a string of base-36 characters.
fn mod97(chars: &str) -> u32 {
    chars.chars().fold(0, |rem, c| {
        // callers only pass ascii alphanumerics
        let val = c.to_digit(36).unwrap_or(0);
        if val >= 10 {
            (rem * 100 + val) % 97
        } else {
            (rem * 10 + val) % 97
        }
    })
}

fn check_part(part: &str, len: usize, label: &str) -> Result<()> {
    if part.len() != len || !part.chars().all(|c| c.is_ascii_alphanumeric()) {
        Err(Error::InvalidParameter(format!("icap {} must be {} alphanumeric characters", label, len)))?;
    }
    Ok(())
}

impl Icap {
    /// Parse and checksum an ICAP code.
    pub fn parse<T: AsRef<str>>(val: T) -> Result<Self> {
        let code: String = val.as_ref().chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            Err(Error::InvalidParameter(format!("icap {} contains invalid characters", code)))?;
        }
        if code.len() < MIN_LEN || code.len() > MAX_LEN {
            Err(Error::InvalidParameter(format!("icap {} has the wrong length", code)))?;
        }
        if !code.starts_with(COUNTRY) || !code[2..4].chars().all(|c| c.is_ascii_digit()) {
            Err(Error::InvalidParameter(format!("icap {} must start with {} and two check digits", code, COUNTRY)))?;
        }
        let rearranged = format!("{}{}", &code[4..], &code[..4]);
        if mod97(&rearranged) != 1 {
            Err(Error::InvalidParameter(format!("icap {} fails its checksum", code)))?;
        }
        Ok(Self(code))
    }

    /// Build an indirect ICAP from its parts, computing the check digits.
    pub fn indirect(asset: &str, institution: &str, client: &str) -> Result<Self> {
        check_part(asset, 3, "asset")?;
        check_part(institution, 4, "institution")?;
        check_part(client, 9, "client")?;
        let bban = format!("{}{}{}", asset, institution, client).to_ascii_uppercase();
        let check = 98 - mod97(&format!("{}{}00", bban, COUNTRY));
        Self::parse(format!("{}{:02}{}", COUNTRY, check, bban))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_indirect(&self) -> bool {
        self.0.len() == INDIRECT_LEN
    }

    /// The asset code of an indirect ICAP.
    pub fn asset(&self) -> Option<&str> {
        self.indirect_part(4, 7)
    }

    /// The institution code of an indirect ICAP.
    pub fn institution(&self) -> Option<&str> {
        self.indirect_part(7, 11)
    }

    /// The institution's client identifier of an indirect ICAP.
    pub fn client(&self) -> Option<&str> {
        self.indirect_part(11, 20)
    }

    fn indirect_part(&self, from: usize, to: usize) -> Option<&str> {
        if self.is_indirect() {
            Some(&self.0[from..to])
        } else {
            None
        }
    }
}

impl fmt::Display for Icap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Icap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Icap {
    type Error = Error;

    fn try_from(val: String) -> Result<Self> {
        Self::parse(val)
    }
}

impl From<Icap> for String {
    fn from(icap: Icap) -> Self {
        icap.0
    }
}
