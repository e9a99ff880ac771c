//! Construction-time settings for the exchange.

use crate::{
    error::{Error, Result},
    models::Address,
    util::number::Amount,
};
use getset::Getters;
use serde::{Serialize, Deserialize};

fn default_require_kyc() -> bool {
    true
}

/// Who owns the exchange, the starting price and rate, and whether buyers
/// must be active registry customers.
#[derive(Clone, Debug, PartialEq, Getters, derive_builder::Builder, Serialize, Deserialize)]
#[builder(pattern = "owned", setter(into))]
#[getset(get = "pub")]
pub struct ExchangeConfig {
    /// The account allowed to change price and rate
    owner: Address,
    /// Native value per token at launch
    initial_price: Amount,
    /// Conversion rate at launch
    initial_rate: Amount,
    /// Only active registry customers may buy tokens
    #[builder(default = "true")]
    #[serde(default = "default_require_kyc")]
    require_kyc: bool,
}

impl ExchangeConfig {
    pub fn builder() -> ExchangeConfigBuilder {
        ExchangeConfigBuilder::default()
    }

    /// Load a config from JSON, for instance:
    ///
    /// ```json
    /// { "owner": "0x1c7d3eef242473c2c9d3ade0b21cae7251aec1f8", "initial_price": 1, "initial_rate": 1 }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config describes a usable exchange.
    pub fn validate(&self) -> Result<()> {
        if self.owner.is_zero() {
            Err(Error::Config("owner cannot be the zero address".into()))?;
        }
        if self.initial_price == 0 {
            Err(Error::Config("initial_price must be positive".into()))?;
        }
        if self.initial_rate == 0 {
            Err(Error::Config("initial_rate must be positive".into()))?;
        }
        Ok(())
    }
}
