//! Configuration for the economy: the denomination value table plus the
//! currency and autosave knobs the host wires through.
//!
//! Raw numeric values are deserialized straight into `Decimal`, so
//! configuration input crosses into the decimal domain exactly once, at load
//! time. No float intermediates leak into downstream arithmetic.

use crate::{
    error::Result,
    models::denomination::Denomination,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Top-level economy configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct EconomyConfig {
    /// Currency naming, sourcing flags, and the denomination table.
    pub currency: CurrencyConfig,
    /// Periodic snapshot persistence.
    #[serde(default)]
    pub autosave: AutoSaveConfig,
}

/// Currency configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct CurrencyConfig {
    /// Currency name, singular form.
    #[serde(default = "default_name_singular")]
    pub name_singular: String,
    /// Currency name, plural form.
    #[serde(default = "default_name_plural")]
    pub name_plural: String,
    /// Display symbol.
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Whether withdrawals may draw from the holder's secondary container
    /// (which is then preferred over the primary).
    #[serde(default = "default_true")]
    pub count_secondary_container: bool,
    /// Whether the host should remove worthless dropped objects on death.
    /// Consumed by host glue only; the core never reads it.
    #[serde(default = "default_true")]
    pub remove_worthless_drops: bool,
    /// The denomination table: object kind → value spec. A `BTreeMap` keeps
    /// reload logging and derived registries in a stable order.
    #[serde(default)]
    pub value: BTreeMap<String, ValueSpec>,
}

/// A denomination's configured value: either a bare number or a table that
/// also carries a variant tag.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum ValueSpec {
    /// `GOLD_INGOT: 10.0`
    Plain(Decimal),
    /// `GOLD_COIN: { value: 10.0, variant: 1337 }`
    Tagged {
        value: Decimal,
        variant: Option<i32>,
    },
}

/// Autosave configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct AutoSaveConfig {
    /// Whether the periodic persister runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between saves.
    #[serde(default = "default_autosave_frequency")]
    pub frequency_secs: u64,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency_secs: default_autosave_frequency(),
        }
    }
}

fn default_name_singular() -> String {
    "Dollar".to_string()
}

fn default_name_plural() -> String {
    "Dollars".to_string()
}

fn default_symbol() -> String {
    "$".to_string()
}

fn default_true() -> bool {
    true
}

fn default_autosave_frequency() -> u64 {
    300
}

impl EconomyConfig {
    /// Load configuration from the given file (any format the `config` crate
    /// recognizes by extension), with `SPECIE__`-prefixed environment
    /// variables layered on top.
    pub fn load(path: &str) -> Result<Self> {
        let loaded = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("SPECIE").separator("__"))
            .build()?;
        Ok(loaded.try_deserialize()?)
    }

    /// The denomination list this configuration describes, ready for
    /// [`Registry::register_all`][0].
    ///
    /// [0]: ../registry/struct.Registry.html#method.register_all
    pub fn denominations(&self) -> Vec<Denomination> {
        self.currency
            .value
            .iter()
            .map(|(kind, spec)| match spec {
                ValueSpec::Plain(value) => Denomination::new(kind.clone(), value.clone()),
                ValueSpec::Tagged { value, variant } => {
                    let mut builder = Denomination::builder().kind(kind.clone()).value(value.clone());
                    if let Some(variant) = variant {
                        builder = builder.variant(*variant);
                    }
                    // kind and value are always set above
                    builder.try_build().expect("denomination fields populated")
                }
            })
            .collect()
    }
}
