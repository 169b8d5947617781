//! Defines the error/result types for the crate, used by every fallible
//! operation in the registry, conversion, and settlement layers.

use crate::models::holder::HolderID;
use rust_decimal::Decimal;
use thiserror::Error;

/// An error type for when economic processing goes awry.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// A negative amount was passed to a conversion or settlement operation.
    /// This is a contract violation by the caller, never a clamp.
    #[error("invalid (negative) amount: {0}")]
    InvalidAmount(Decimal),
    /// A converted quantity does not fit into a stack count.
    #[error("amount produces an object quantity beyond the representable range")]
    AmountOverflow,
    /// The holder's containers cannot currently be mutated (for instance, the
    /// holder is not present in the live world). Expected operational
    /// condition; the caller decides whether to retry.
    #[error("holder {0:?} is not reachable for settlement")]
    UnreachableHolder(HolderID),
    /// An account balance would have dropped below zero.
    #[error("the operation would result in a negative account balance")]
    NegativeBalance,
    /// A model builder was missing one or more required fields.
    #[error("model builder failed: {0}")]
    BuilderFailed(String),
    /// The configuration source could not be read or parsed.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(String),
    /// A snapshot could not be persisted.
    #[error("failed to persist state: {0}")]
    PersistFailed(String),
    /// A background task died instead of shutting down.
    #[error("background task failed: {0}")]
    TaskFailed(String),
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::ConfigLoad(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
