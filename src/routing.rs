//! The routing facade lets clients trade the issued token against other
//! tokens. It keeps a table of ticker symbol → token contract and forwards
//! swaps to an external router. The swap itself (pricing, path finding,
//! settlement) is the router's business.

use crate::{
    capability::SwapRouter,
    error::{Error, Result},
    models::{
        Address,
        route::TokenRoute,
    },
    util::number::Amount,
};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

/// Symbol routes plus the router swaps are sent to.
pub struct RoutingFacade {
    routes: HashMap<String, TokenRoute>,
    router: Box<dyn SwapRouter>,
}

impl fmt::Debug for RoutingFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingFacade")
            .field("routes", &self.routes)
            .finish()
    }
}

impl RoutingFacade {
    pub fn new(router: Box<dyn SwapRouter>) -> Self {
        Self {
            routes: HashMap::new(),
            router,
        }
    }

    /// Route `symbol` to `address`, replacing any earlier route.
    pub fn add_token_route<T: Into<String>>(&mut self, symbol: T, address: Address) -> Result<bool> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            Err(Error::InvalidParameter("route symbol cannot be empty".into()))?;
        }
        address.require_nonzero()?;
        info!(symbol = symbol.as_str(), token = %address, "token route set");
        self.routes.insert(symbol.clone(), TokenRoute::new(symbol, address));
        Ok(true)
    }

    /// Drop the route for `symbol`. Removing a missing route succeeds.
    pub fn remove_token_route(&mut self, symbol: &str) -> Result<bool> {
        if self.routes.remove(symbol).is_some() {
            info!(symbol, "token route removed");
        }
        Ok(true)
    }

    /// The token `symbol` routes to.
    pub fn token_route(&self, symbol: &str) -> Result<&Address> {
        self.routes.get(symbol)
            .map(|route| route.token_address())
            .ok_or_else(|| Error::RouteNotFound(symbol.into()))
    }

    pub fn routes(&self) -> impl Iterator<Item = &TokenRoute> {
        self.routes.values()
    }

    /// Swap `amount` of `token_in` for `token_out` through the router. The
    /// router's answer, or its error, is returned as is.
    pub fn swap(&mut self, token_in: &Address, token_out: &Address, amount: Amount) -> Result<Amount> {
        let out = self.router.swap(token_in, token_out, amount)?;
        debug!(token_in = %token_in, token_out = %token_out, amount, out, "swap forwarded");
        Ok(out)
    }

    /// Swap by symbol, resolving both routes first.
    pub fn swap_symbols(&mut self, symbol_in: &str, symbol_out: &str, amount: Amount) -> Result<Amount> {
        let token_in = self.token_route(symbol_in)?.clone();
        let token_out = self.token_route(symbol_out)?.clone();
        self.swap(&token_in, &token_out, amount)
    }
}
