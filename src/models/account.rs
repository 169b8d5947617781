//! Accounts hold the abstract (non-physical) side of a holder's wealth.
//!
//! Production deployments keep balances behind the [`BalanceStore`][0] seam;
//! this model is the reference shape for such a store and is what the
//! in-crate test fixtures use.
//!
//! [0]: ../../settle/trait.BalanceStore.html

use crate::{
    error::{Error, Result},
    models::holder::HolderID,
};
use chrono::{DateTime, Utc};
use getset::{Getters, Setters};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// A holder's abstract balance. The balance can never go below zero: physical
/// containers are the only place value is ever "taken out of," and change
/// from settlements only ever flows in.
#[derive(Clone, Debug, PartialEq, Getters, Setters, derive_builder::Builder, Serialize, Deserialize)]
#[builder(pattern = "owned", setter(into))]
#[getset(get = "pub", set = "pub(crate)")]
pub struct Account {
    /// The holder this account belongs to.
    holder_id: HolderID,
    /// The account's balance.
    balance: Decimal,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl Account {
    pub fn builder() -> AccountBuilder {
        AccountBuilder::default()
    }

    /// Adjust the account's balance. Can be positive or negative. The balance
    /// cannot go below zero. Returns the updated balance on success.
    pub fn adjust_balance<T: Into<Decimal>>(&mut self, amount: T) -> Result<&Decimal> {
        let new_amount = self.balance().clone() + amount.into();
        if new_amount < Decimal::zero() {
            Err(Error::NegativeBalance)?;
        }
        self.set_balance(new_amount);
        Ok(self.balance())
    }
}

impl AccountBuilder {
    /// Build, mapping missing-field failures into our error type.
    pub fn try_build(self) -> Result<Account> {
        self.build().map_err(|e| Error::BuilderFailed(e.to_string()))
    }
}
