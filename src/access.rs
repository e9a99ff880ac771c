//! The access module defines the privileged operations of the exchange and the
//! roles that grant them.
//!
//! Permissions are additive: an account starts with *no* permissions
//! (returning [Error::Unauthorized][err_unauth]) and gains them by holding a
//! role. There are exactly two roles. The single `Owner` tunes the exchange
//! parameters, and any number of `Transfer` role holders may move pooled
//! native value in and out of the reserve.
//!
//! The owner does not implicitly hold the transfer role. An owner who wants to
//! move value grants the role to itself first.
//!
//! [err_unauth]: ../error/enum.Error.html#variant.Unauthorized

use crate::{
    error::{Error, Result},
    models::Address,
};
use serde::{Serialize, Deserialize};
use std::collections::BTreeSet;

/// Check `$caller` against `$access` for `$perm`, logging and returning
/// `Error::Unauthorized` from the enclosing function on failure.
macro_rules! access_check {
    ($access:expr, $caller:expr, $perm:expr) => {
        let perm = $perm;
        if let Err(err) = $access.access_check($caller, perm) {
            tracing::warn!(caller = %$caller, permission = ?perm, "privileged call rejected");
            return Err(err);
        }
    }
}

/// The privileged actions on the exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    /// Send bare native value into the reserve
    Deposit,
    /// Grant the transfer role to another account
    GrantTransferRole,
    /// Take the transfer role away from an account
    RevokeTransferRole,
    /// Change the token price
    SetPrices,
    /// Change the conversion rate
    SetRate,
    /// Hand the owner role to another account
    TransferOwnership,
    /// Pay reserve value out to an arbitrary recipient
    Withdraw,
}

/// The roles an account can hold on the exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Owner,
    Transfer,
}

impl Role {
    /// For a given role, return the permissions that role has access to.
    pub fn permissions(&self) -> Vec<Permission> {
        match *self {
            Role::Owner => {
                vec![
                    Permission::SetPrices,
                    Permission::SetRate,
                    Permission::GrantTransferRole,
                    Permission::RevokeTransferRole,
                    Permission::TransferOwnership,
                ]
            }
            Role::Transfer => {
                vec![
                    Permission::Deposit,
                    Permission::Withdraw,
                    Permission::GrantTransferRole,
                ]
            }
        }
    }

    /// Determine if a role has a specific permission.
    pub fn can(&self, perm: &Permission) -> bool {
        self.permissions().contains(perm)
    }
}

/// Who holds which role. Carried in the exchange's state and consulted at the
/// top of every privileged operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessControl {
    owner: Address,
    transfer_roles: BTreeSet<Address>,
}

impl AccessControl {
    /// Create an access set with `owner` and no transfer role holders.
    pub fn new(owner: Address) -> Result<Self> {
        owner.require_nonzero()?;
        Ok(Self {
            owner,
            transfer_roles: BTreeSet::new(),
        })
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn has_transfer_role(&self, account: &Address) -> bool {
        self.transfer_roles.contains(account)
    }

    /// All current transfer role holders, in address order.
    pub fn transfer_role_holders(&self) -> impl Iterator<Item = &Address> {
        self.transfer_roles.iter()
    }

    /// The roles `account` holds.
    pub fn roles(&self, account: &Address) -> Vec<Role> {
        let mut roles = Vec::new();
        if account == &self.owner {
            roles.push(Role::Owner);
        }
        if self.has_transfer_role(account) {
            roles.push(Role::Transfer);
        }
        roles
    }

    /// Determines if an account can perform an action (based on its roles).
    pub fn can(&self, account: &Address, perm: &Permission) -> bool {
        self.roles(account).iter().any(|role| role.can(perm))
    }

    /// Check if this account can perform an action.
    pub fn access_check(&self, account: &Address, perm: Permission) -> Result<()> {
        if !self.can(account, &perm) {
            Err(Error::Unauthorized)?;
        }
        Ok(())
    }

    /// Grant the transfer role. Returns false if the account already held it.
    pub(crate) fn grant_transfer_role(&mut self, account: Address) -> Result<bool> {
        account.require_nonzero()?;
        Ok(self.transfer_roles.insert(account))
    }

    /// Revoke the transfer role. Returns false if the account didn't hold it.
    pub(crate) fn revoke_transfer_role(&mut self, account: &Address) -> bool {
        self.transfer_roles.remove(account)
    }

    pub(crate) fn set_owner(&mut self, owner: Address) -> Result<()> {
        owner.require_nonzero()?;
        self.owner = owner;
        Ok(())
    }
}
