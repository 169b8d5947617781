//! A denomination is a registered object kind with a fixed unit monetary
//! value: the system's definition of "what is money."

use crate::error::{Error, Result};
use getset::Getters;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maps an object kind (a string key, ex `"GOLD_INGOT"`) to the monetary
/// value of a single object of that kind.
///
/// A denomination may carry a *variant tag*: an integer discriminator that
/// refines the emitted object's identity (the original system used it for
/// custom item models). The tag never participates in value lookup; value is
/// keyed by kind alone.
///
/// Zero or negative values are representable ("this kind is tracked but
/// worthless") but are never selected when converting an amount into objects.
#[derive(Clone, Debug, PartialEq, Getters, derive_builder::Builder, Serialize, Deserialize)]
#[builder(pattern = "owned", setter(into))]
#[getset(get = "pub")]
pub struct Denomination {
    /// The object kind this denomination applies to.
    kind: String,
    /// Monetary value of one object of this kind.
    value: Decimal,
    /// Optional sub-variant tag stamped onto emitted objects.
    #[builder(setter(strip_option), default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variant: Option<i32>,
}

impl Denomination {
    pub fn builder() -> DenominationBuilder {
        DenominationBuilder::default()
    }

    /// Shorthand for a denomination without a variant tag.
    pub fn new<T: Into<String>>(kind: T, value: Decimal) -> Self {
        Self {
            kind: kind.into(),
            value,
            variant: None,
        }
    }
}

impl DenominationBuilder {
    /// Build, mapping missing-field failures into our error type.
    pub fn try_build(self) -> Result<Denomination> {
        self.build().map_err(|e| Error::BuilderFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::*;

    #[test]
    fn builds() {
        let denom = Denomination::builder()
            .kind("GOLD_INGOT")
            .value(dec!(10))
            .variant(1337)
            .try_build()
            .unwrap();
        assert_eq!(denom.kind(), "GOLD_INGOT");
        assert_eq!(denom.value(), &dec!(10));
        assert_eq!(denom.variant(), &Some(1337));

        let res = Denomination::builder().kind("DIRT").try_build();
        assert!(matches!(res, Err(Error::BuilderFailed(_))));
    }

    #[test]
    fn shorthand_has_no_variant() {
        let denom = Denomination::new("IRON_INGOT", dec!(1.5));
        assert_eq!(denom.variant(), &None);
    }
}
