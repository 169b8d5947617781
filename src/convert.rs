//! The conversion engine translates between a scalar monetary amount and a
//! multiset of denominated objects, both directions exact.
//!
//! Conversion is a greedy change-making pass over the registered
//! denominations in descending unit value. Greedy selection is not minimal in
//! object count for arbitrary denomination sets (only for canonical ones),
//! which is acceptable here: denominations are operator-configured, not
//! adversarial, and whatever fails to convert comes back as a leftover the
//! caller credits to the holder's abstract balance. No value is lost either
//! way.

use crate::{
    error::{Error, Result},
    models::stack::ObjectStack,
    registry::Registry,
};
use rust_decimal::prelude::*;

/// The outcome of converting an amount into objects: the chosen stacks, in
/// emission order, plus whatever portion of the amount no denomination could
/// represent. Transient; nothing stores these.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionResult {
    /// The emitted stacks, highest unit value first.
    pub stacks: Vec<ObjectStack>,
    /// The unrepresentable remainder. Always less than the smallest positive
    /// denomination's value, or the full input amount when the registry has
    /// nothing that divides it.
    pub leftover: Decimal,
}

/// Convert `amount` into a multiset of denominated objects.
///
/// Candidates are the registry's positive-valued denominations, ordered by
/// unit value descending with ties broken by kind (so repeated calls against
/// the same registry state produce identical output). Each candidate absorbs
/// `floor(remaining / value)` objects.
///
/// Negative amounts are a caller contract violation and fail with
/// [`Error::InvalidAmount`] before anything else happens.
pub fn amount_to_objects(registry: &Registry, amount: Decimal) -> Result<ConversionResult> {
    if amount.is_sign_negative() && !amount.is_zero() {
        Err(Error::InvalidAmount(amount))?;
    }

    let snapshot = registry.snapshot();
    let mut candidates: Vec<_> = snapshot
        .values()
        .filter(|denom| denom.value() > &Decimal::zero())
        .collect();
    candidates.sort_by(|a, b| b.value().cmp(a.value()).then_with(|| a.kind().cmp(b.kind())));

    let mut stacks = Vec::new();
    let mut remaining = amount;
    for denom in candidates {
        let quantity = (remaining / denom.value())
            .floor()
            .to_u64()
            .ok_or(Error::AmountOverflow)?;
        if quantity > 0 {
            stacks.push(ObjectStack::new(denom.kind().clone(), quantity, denom.variant().clone()));
            remaining -= denom.value().clone() * Decimal::from(quantity);
        }
    }

    Ok(ConversionResult {
        stacks,
        leftover: remaining,
    })
}

/// The inverse direction: the exact total value of a multiset of objects
/// under the given registry. Unregistered kinds contribute zero.
pub fn objects_to_amount(registry: &Registry, stacks: &[ObjectStack]) -> Decimal {
    stacks
        .iter()
        .fold(Decimal::zero(), |total, stack| {
            total + registry.value_of(stack.kind(), *stack.quantity())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::denomination::Denomination;
    use rust_decimal_macros::*;

    fn registry(denoms: Vec<Denomination>) -> Registry {
        let registry = Registry::new();
        registry.register_all(denoms);
        registry
    }

    #[test]
    fn greedy_descending() {
        let registry = registry(vec![
            Denomination::new("GOLD_INGOT", dec!(10)),
            Denomination::new("IRON_INGOT", dec!(1)),
        ]);
        let result = amount_to_objects(&registry, dec!(23)).unwrap();
        assert_eq!(result.stacks, vec![
            ObjectStack::new("GOLD_INGOT", 2, None),
            ObjectStack::new("IRON_INGOT", 3, None),
        ]);
        assert_eq!(result.leftover, dec!(0));
    }

    #[test]
    fn higher_denominations_exhausted_first() {
        let registry = registry(vec![
            Denomination::new("GOLD_INGOT", dec!(10)),
            Denomination::new("SILVER_INGOT", dec!(3)),
        ]);
        let result = amount_to_objects(&registry, dec!(29)).unwrap();
        assert_eq!(result.stacks, vec![
            ObjectStack::new("GOLD_INGOT", 2, None),
            ObjectStack::new("SILVER_INGOT", 3, None),
        ]);
        assert_eq!(result.leftover, dec!(0));
    }

    #[test]
    fn leftover_below_smallest_denomination() {
        let registry = registry(vec![
            Denomination::new("GOLD_INGOT", dec!(10)),
            Denomination::new("IRON_INGOT", dec!(1)),
        ]);
        let result = amount_to_objects(&registry, dec!(23.77)).unwrap();
        assert_eq!(result.stacks, vec![
            ObjectStack::new("GOLD_INGOT", 2, None),
            ObjectStack::new("IRON_INGOT", 3, None),
        ]);
        assert_eq!(result.leftover, dec!(0.77));
    }

    #[test]
    fn conservation_round_trip() {
        let registry = registry(vec![
            Denomination::new("GOLD_INGOT", dec!(10)),
            Denomination::new("SILVER_INGOT", dec!(2.5)),
            Denomination::new("IRON_INGOT", dec!(0.1)),
        ]);
        for amount in vec![dec!(0), dec!(0.05), dec!(1), dec!(23.77), dec!(1234.56), dec!(99999.99)] {
            let result = amount_to_objects(&registry, amount).unwrap();
            let back = objects_to_amount(&registry, &result.stacks);
            assert_eq!(back + result.leftover, amount, "conservation failed for {}", amount);
        }
    }

    #[test]
    fn deterministic_under_value_ties() {
        let registry = registry(vec![
            Denomination::new("B_COIN", dec!(5)),
            Denomination::new("A_COIN", dec!(5)),
        ]);
        let first = amount_to_objects(&registry, dec!(12)).unwrap();
        for _ in 0..10 {
            assert_eq!(amount_to_objects(&registry, dec!(12)).unwrap(), first);
        }
        // ties break by kind ascending
        assert_eq!(first.stacks[0].kind(), "A_COIN");
    }

    #[test]
    fn worthless_denominations_never_selected() {
        let registry = registry(vec![
            Denomination::new("GOLD_INGOT", dec!(10)),
            Denomination::new("DIRT", dec!(0)),
            Denomination::new("CURSED_COIN", dec!(-3)),
        ]);
        let result = amount_to_objects(&registry, dec!(25)).unwrap();
        assert_eq!(result.stacks, vec![ObjectStack::new("GOLD_INGOT", 2, None)]);
        assert_eq!(result.leftover, dec!(5));
    }

    #[test]
    fn zero_amount_is_empty() {
        let registry = registry(vec![Denomination::new("GOLD_INGOT", dec!(10))]);
        let result = amount_to_objects(&registry, dec!(0)).unwrap();
        assert!(result.stacks.is_empty());
        assert_eq!(result.leftover, dec!(0));
    }

    #[test]
    fn empty_registry_returns_full_leftover() {
        let registry = Registry::new();
        let result = amount_to_objects(&registry, dec!(42.5)).unwrap();
        assert!(result.stacks.is_empty());
        assert_eq!(result.leftover, dec!(42.5));
    }

    #[test]
    fn negative_amount_rejected() {
        let registry = registry(vec![Denomination::new("GOLD_INGOT", dec!(10))]);
        let res = amount_to_objects(&registry, dec!(-1));
        assert_eq!(res, Err(Error::InvalidAmount(dec!(-1))));
    }

    #[test]
    fn unrepresentable_quantities_fail_loudly() {
        let registry = registry(vec![Denomination::new("DUST", dec!(0.0000000001))]);
        // would need ~1e20 objects, which no stack count can hold
        let res = amount_to_objects(&registry, dec!(10000000000));
        assert_eq!(res, Err(Error::AmountOverflow));
    }

    #[test]
    fn variant_tags_flow_onto_stacks() {
        let registry = Registry::new();
        registry.register(
            Denomination::builder()
                .kind("GOLD_INGOT")
                .value(dec!(10))
                .variant(42)
                .try_build()
                .unwrap(),
        );
        let result = amount_to_objects(&registry, dec!(30)).unwrap();
        assert_eq!(result.stacks, vec![ObjectStack::new("GOLD_INGOT", 3, Some(42))]);
    }
}
