//! The exchange ledger sells the token for native value and buys it back.
//!
//! Customers buy through [buy_tokens](struct.ExchangeLedger.html#method.buy_tokens):
//! the native value they send joins the reserve and the token ledger mints
//! them `value * rate / price` tokens. Holders sell through
//! [sell_tokens](struct.ExchangeLedger.html#method.sell_tokens): their tokens
//! are burned and `tokens * price / rate` is paid out of the reserve. Both
//! round down.
//!
//! Value only enters the reserve through purchases, sales, and role-holder
//! deposits, and only leaves it through sale payouts and role-holder
//! withdrawals, so at all times
//!
//! ```text
//! reserve = received - paid out - withdrawn
//! ```
//!
//! Every operation validates first, then commits its own state, then calls out
//! to the token ledger or the payee. If a call out fails, the committed state
//! is put back (and burned tokens are re-minted) before the error is
//! returned. While a payee is being paid, it holds the ledger and sees the
//! committed state; any state-changing call it makes is refused with
//! `Error::Reentrancy`.

mod config;

pub use config::{ExchangeConfig, ExchangeConfigBuilder};

use crate::{
    access::{AccessControl, Permission},
    capability::{TokenLedger, ValueReceiver},
    error::{Error, Result},
    models::{
        Address,
        exchange::ExchangeParameters,
    },
    registry::CustomerDirectory,
    util::number::Amount,
};
use std::fmt;
use tracing::{debug, error, info, warn};

/// The token sale facility and its pooled reserve.
pub struct ExchangeLedger {
    config: ExchangeConfig,
    access: AccessControl,
    params: ExchangeParameters,
    token: Box<dyn TokenLedger>,
    /// Set while a payee holds control
    paying: bool,
}

impl fmt::Debug for ExchangeLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeLedger")
            .field("config", &self.config)
            .field("access", &self.access)
            .field("params", &self.params)
            .field("paying", &self.paying)
            .finish()
    }
}

impl ExchangeLedger {
    /// Open an exchange issuing `token`.
    pub fn new(config: ExchangeConfig, token: Box<dyn TokenLedger>) -> Result<Self> {
        config.validate()?;
        let access = AccessControl::new(config.owner().clone())?;
        let params = ExchangeParameters::new(*config.initial_price(), *config.initial_rate())?;
        info!(owner = %config.owner(), price = *config.initial_price(), rate = *config.initial_rate(), "exchange opened");
        Ok(Self {
            config,
            access,
            params,
            token,
            paying: false,
        })
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    pub fn parameters(&self) -> &ExchangeParameters {
        &self.params
    }

    pub fn token(&self) -> &dyn TokenLedger {
        self.token.as_ref()
    }

    pub fn owner(&self) -> &Address {
        self.access.owner()
    }

    pub fn has_transfer_role(&self, account: &Address) -> bool {
        self.access.has_transfer_role(account)
    }

    pub fn price(&self) -> Amount {
        self.params.price_native_per_token()
    }

    pub fn rate(&self) -> Amount {
        self.params.rate()
    }

    pub fn reserve(&self) -> Amount {
        self.params.reserve_native_balance()
    }

    /// How many tokens `value` would buy right now.
    pub fn quote_buy(&self, value: Amount) -> Result<Amount> {
        let tokens = self.params.tokens_for(value)?;
        debug!(value, tokens, "buy quoted");
        Ok(tokens)
    }

    /// How much native value selling `tokens` would pay right now.
    pub fn quote_sell(&self, tokens: Amount) -> Result<Amount> {
        let payout = self.params.payout_for(tokens)?;
        debug!(tokens, payout, "sell quoted");
        Ok(payout)
    }

    /// Refuse state changes while a payee holds control.
    fn guard(&self) -> Result<()> {
        if self.paying {
            warn!("state change attempted during payout");
            Err(Error::Reentrancy)?;
        }
        Ok(())
    }

    /// Hand `amount` to `payee`. The ledger is locked against state changes
    /// for the duration.
    fn pay(&mut self, payee: &mut dyn ValueReceiver, amount: Amount) -> Result<()> {
        self.paying = true;
        let res = payee.receive(amount, self);
        self.paying = false;
        res
    }

    /// Set the native price of one token. Owner only.
    pub fn set_prices(&mut self, caller: &Address, price: Amount) -> Result<()> {
        self.guard()?;
        access_check!(self.access, caller, Permission::SetPrices);
        self.params.set_price(price)?;
        info!(price, "price updated");
        Ok(())
    }

    /// Set the conversion rate. Owner only.
    pub fn set_rate(&mut self, caller: &Address, rate: Amount) -> Result<()> {
        self.guard()?;
        access_check!(self.access, caller, Permission::SetRate);
        self.params.set_rate(rate)?;
        info!(rate, "rate updated");
        Ok(())
    }

    /// Let `account` deposit into and withdraw from the reserve. The owner and
    /// existing role holders may grant the role. Returns false if `account`
    /// already held it.
    pub fn add_transfer_role(&mut self, caller: &Address, account: Address) -> Result<bool> {
        self.guard()?;
        access_check!(self.access, caller, Permission::GrantTransferRole);
        let log_account = account.clone();
        let granted = self.access.grant_transfer_role(account)?;
        info!(account = %log_account, granted_by = %caller, "transfer role granted");
        Ok(granted)
    }

    /// Take the transfer role from `account`. Owner only. Returns false if
    /// `account` didn't hold it.
    pub fn revoke_transfer_role(&mut self, caller: &Address, account: &Address) -> Result<bool> {
        self.guard()?;
        access_check!(self.access, caller, Permission::RevokeTransferRole);
        let revoked = self.access.revoke_transfer_role(account);
        info!(account = %account, "transfer role revoked");
        Ok(revoked)
    }

    /// Hand ownership to `new_owner`. Owner only.
    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> Result<()> {
        self.guard()?;
        access_check!(self.access, caller, Permission::TransferOwnership);
        let log_owner = new_owner.clone();
        self.access.set_owner(new_owner)?;
        info!(from = %caller, to = %log_owner, "ownership transferred");
        Ok(())
    }

    /// Accept bare native value into the reserve. Only transfer role holders
    /// may send value this way; everyone else buys through `buy_tokens`.
    /// Returns the new reserve.
    pub fn deposit(&mut self, caller: &Address, value: Amount) -> Result<Amount> {
        self.guard()?;
        access_check!(self.access, caller, Permission::Deposit);
        if value == 0 {
            Err(Error::InvalidParameter("deposit must carry value".into()))?;
        }
        let reserve = self.params.credit_reserve(value)?;
        info!(from = %caller, value, reserve, "deposit received");
        Ok(reserve)
    }

    /// Buy tokens with `value` native value. The tokens are minted to `caller`.
    /// Returns the number of tokens bought.
    pub fn buy_tokens(&mut self, caller: &Address, value: Amount, directory: &dyn CustomerDirectory) -> Result<Amount> {
        self.guard()?;
        if value == 0 {
            Err(Error::InvalidParameter("purchase must carry value".into()))?;
        }
        if *self.config.require_kyc() && !directory.is_active_customer(caller) {
            warn!(buyer = %caller, "purchase by unregistered or inactive customer rejected");
            Err(Error::Unauthorized)?;
        }
        let tokens = self.params.tokens_for(value)?;
        if tokens == 0 {
            Err(Error::InvalidParameter("value is too small to buy a token".into()))?;
        }

        let mut next = self.params.clone();
        next.credit_reserve(value)?;
        let snapshot = std::mem::replace(&mut self.params, next);

        if let Err(err) = self.token.mint(caller, tokens) {
            warn!(buyer = %caller, tokens, error = %err, "mint failed, purchase rolled back");
            self.params = snapshot;
            return Err(err);
        }
        info!(buyer = %caller, value, tokens, reserve = self.reserve(), "tokens bought");
        Ok(tokens)
    }

    /// Sell `token_amount` tokens held by `seller`, who is paid
    /// `token_amount * price / rate` from the reserve. `value_sent` is native
    /// value attached to the sale; it joins the reserve before the payout is
    /// taken. Returns the payout.
    pub fn sell_tokens(&mut self, token_amount: Amount, value_sent: Amount, seller: &mut dyn ValueReceiver) -> Result<Amount> {
        self.guard()?;
        let caller = seller.address().clone();
        if token_amount == 0 {
            Err(Error::InvalidParameter("cannot sell zero tokens".into()))?;
        }
        let payout = self.params.payout_for(token_amount)?;
        if payout == 0 {
            Err(Error::InvalidParameter("sale is too small to pay anything".into()))?;
        }
        if self.token.balance_of(&caller) < token_amount {
            Err(Error::InsufficientBalance)?;
        }

        let mut next = self.params.clone();
        next.credit_reserve(value_sent)?;
        next.debit_reserve(payout)?;
        let snapshot = std::mem::replace(&mut self.params, next);

        if let Err(err) = self.token.burn(&caller, token_amount) {
            warn!(seller = %caller, token_amount, error = %err, "burn failed, sale rolled back");
            self.params = snapshot;
            return Err(err);
        }
        if let Err(err) = self.pay(seller, payout) {
            self.params = snapshot;
            if let Err(mint_err) = self.token.mint(&caller, token_amount) {
                error!(seller = %caller, token_amount, error = %mint_err, "could not restore burned tokens");
                return Err(Error::Capability(format!(
                    "payout refused ({}) and {} burned tokens could not be restored ({})",
                    err, token_amount, mint_err,
                )));
            }
            warn!(seller = %caller, payout, error = %err, "payout refused, sale rolled back");
            return Err(err);
        }
        info!(seller = %caller, token_amount, value_sent, payout, reserve = self.reserve(), "tokens sold");
        Ok(payout)
    }

    /// Pay the entire reserve to `recipient`. Transfer role holders only.
    /// Returns the amount paid, which is zero (and `recipient` isn't called)
    /// when the reserve is empty.
    pub fn withdraw_money_to(&mut self, caller: &Address, recipient: &mut dyn ValueReceiver) -> Result<Amount> {
        self.guard()?;
        access_check!(self.access, caller, Permission::Withdraw);
        let amount = self.reserve();
        if amount == 0 {
            debug!(to = %recipient.address(), "reserve empty, nothing withdrawn");
            return Ok(0);
        }
        self.withdraw(caller, recipient, amount)
    }

    /// Pay `amount` of the reserve to `recipient`. Transfer role holders only.
    pub fn withdraw_amount_to(&mut self, caller: &Address, recipient: &mut dyn ValueReceiver, amount: Amount) -> Result<Amount> {
        self.guard()?;
        access_check!(self.access, caller, Permission::Withdraw);
        if amount == 0 {
            Err(Error::InvalidParameter("withdrawal must be positive".into()))?;
        }
        self.withdraw(caller, recipient, amount)
    }

    fn withdraw(&mut self, caller: &Address, recipient: &mut dyn ValueReceiver, amount: Amount) -> Result<Amount> {
        let to = recipient.address().clone();
        to.require_nonzero()?;
        let mut next = self.params.clone();
        next.debit_reserve(amount)?;
        let snapshot = std::mem::replace(&mut self.params, next);

        if let Err(err) = self.pay(recipient, amount) {
            warn!(to = %to, amount, error = %err, "withdrawal refused, rolled back");
            self.params = snapshot;
            return Err(err);
        }
        info!(by = %caller, to = %to, amount, reserve = self.reserve(), "reserve withdrawn");
        Ok(amount)
    }
}
