//! The core datastructures, algorithms, and logic for the Specie item-backed
//! economy: a virtual currency backed by physical, denominated objects.
//!
//! Three pieces, composed left to right:
//!
//! - [`registry::Registry`] — the kind → unit-value mapping ("what is
//!   money"), atomically rebuilt from configuration.
//! - [`convert`] — the pure conversion engine between a scalar amount and a
//!   multiset of denominated objects, greedy and loss-free.
//! - [`settle::Settler`] — deposits and withdrawals against a holder's
//!   physical containers and abstract balance, conserving total wealth.
//!
//! Balances and containers are owned by host-side collaborators behind the
//! [`settle::BalanceStore`] and [`settle::ContainerProvider`] seams; the core
//! computes, the host stores. All monetary arithmetic is `rust_decimal` end
//! to end, so repeated settlements never accumulate float drift.

pub mod error;
#[cfg(test)]
mod util;
pub mod models;
pub mod config;
pub mod registry;
pub mod convert;
pub mod settle;
pub mod autosave;

pub use crate::{
    autosave::{AutoSaver, Persister},
    config::EconomyConfig,
    convert::{amount_to_objects, objects_to_amount, ConversionResult},
    error::{Error, Result},
    models::{
        account::Account,
        container::Container,
        denomination::Denomination,
        holder::HolderID,
        stack::ObjectStack,
    },
    registry::Registry,
    settle::{BalanceStore, ContainerProvider, Settler},
};
