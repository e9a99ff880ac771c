//! The error module holds the one error type every operation in the crate
//! returns. Errors are terminal for the call that produced them: nothing is
//! retried internally and no state is changed when an error comes back.

use thiserror::Error;

/// Anything that can go wrong in the registry, the exchange, or the routing
/// layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A builder didn't get all the fields it needed
    #[error("error building object {0}")]
    BuilderFailed(String),
    /// An external capability (token, router, feed, receiver) refused the call
    #[error("external call failed: {0}")]
    Capability(String),
    /// The exchange configuration is unusable
    #[error("invalid configuration: {0}")]
    Config(String),
    /// A uniqueness constraint was violated
    #[error("This {0} is already exist!")]
    DuplicateEntity(String),
    /// An account doesn't hold enough tokens for the operation
    #[error("insufficient token balance")]
    InsufficientBalance,
    /// The pooled reserve can't cover a payout or withdrawal
    #[error("insufficient reserve")]
    InsufficientReserve,
    /// A value was out of range or malformed
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// The referenced object doesn't exist
    #[error("This {0} is not exist!")]
    NotFound(String),
    /// Arithmetic left the representable range
    #[error("arithmetic overflow")]
    Overflow,
    /// A state-changing call arrived while an outbound transfer was in flight
    #[error("reentrant call rejected")]
    Reentrancy,
    /// No token is routed under this symbol
    #[error("no route for symbol {0}")]
    RouteNotFound(String),
    /// The caller lacks the role or ownership the operation needs
    #[error("caller is not authorized")]
    Unauthorized,
}

pub type Result<T> = std::result::Result<T, Error>;
