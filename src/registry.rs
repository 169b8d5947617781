//! The denomination registry maps object kinds to their unit values. It is
//! the source of truth for "what is money."
//!
//! The registry is read-mostly: many settlement operations read it
//! concurrently, while configuration (re)loads replace it wholesale. To keep
//! readers consistent, the mapping lives behind an atomically-swapped
//! immutable snapshot: writers build a complete new map off to the side and
//! swap it in, so a reader observes either the fully-old or fully-new
//! mapping, never a partial rebuild.

use crate::models::denomination::Denomination;
use rust_decimal::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Owns the kind → [`Denomination`] mapping. Derived state: it holds no
/// persistence of its own and is rebuilt from configuration on (re)load.
#[derive(Debug, Default)]
pub struct Registry {
    snapshot: RwLock<Arc<HashMap<String, Denomination>>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replace the entire mapping with the given entries. The previous
    /// mapping is cleared implicitly: nothing from before the reload
    /// survives, even on a shrinking entry set.
    pub fn register_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = Denomination>,
    {
        let mut map = HashMap::new();
        for denom in entries {
            debug!(kind = %denom.kind(), value = %denom.value(), "registering denomination");
            map.insert(denom.kind().clone(), denom);
        }
        self.swap(map);
    }

    /// Upsert a single denomination.
    pub fn register(&self, denom: Denomination) {
        self.mutate(|map| {
            map.insert(denom.kind().clone(), denom);
        });
    }

    /// Remove a denomination. Subsequent value lookups for the kind resolve
    /// to zero.
    pub fn unregister(&self, kind: &str) {
        self.mutate(|map| {
            map.remove(kind);
        });
    }

    /// The denomination registered for `kind`, if any.
    pub fn get(&self, kind: &str) -> Option<Denomination> {
        self.snapshot().get(kind).cloned()
    }

    /// The value of a single object of `kind`, or zero if unregistered.
    pub fn unit_value(&self, kind: &str) -> Decimal {
        self.value_of(kind, 1)
    }

    /// The value of `quantity` objects of `kind`. Unregistered kinds are
    /// worth zero (explicit policy: stale or foreign kinds must never crash
    /// a settlement). Exact decimal multiplication, no float intermediates.
    pub fn value_of(&self, kind: &str, quantity: u64) -> Decimal {
        match self.snapshot().get(kind) {
            Some(denom) => denom.value().clone() * Decimal::from(quantity),
            None => Decimal::zero(),
        }
    }

    /// The current mapping snapshot. Callers iterating the registry (like
    /// the conversion engine) hold one snapshot for the whole operation.
    pub fn snapshot(&self) -> Arc<HashMap<String, Denomination>> {
        self.snapshot.read().expect("registry lock poisoned").clone()
    }

    fn swap(&self, map: HashMap<String, Denomination>) {
        let mut guard = self.snapshot.write().expect("registry lock poisoned");
        *guard = Arc::new(map);
    }

    // single-entry edits clone-modify-swap under the write lock, so two
    // concurrent writers can never base their swaps on the same snapshot
    fn mutate<F>(&self, op: F)
    where
        F: FnOnce(&mut HashMap<String, Denomination>),
    {
        let mut guard = self.snapshot.write().expect("registry lock poisoned");
        let mut map = guard.as_ref().clone();
        op(&mut map);
        *guard = Arc::new(map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::*;
    use std::thread;

    fn standard() -> Registry {
        let registry = Registry::new();
        registry.register_all(vec![
            Denomination::new("GOLD_INGOT", dec!(10)),
            Denomination::new("IRON_INGOT", dec!(1)),
        ]);
        registry
    }

    #[test]
    fn registers_and_looks_up() {
        let registry = standard();
        assert_eq!(registry.unit_value("GOLD_INGOT"), dec!(10));
        assert_eq!(registry.value_of("IRON_INGOT", 7), dec!(7));
        assert_eq!(registry.value_of("unknown_kind", 5), dec!(0));
        assert_eq!(registry.get("GOLD_INGOT"), Some(Denomination::new("GOLD_INGOT", dec!(10))));
        assert_eq!(registry.get("unknown_kind"), None);
    }

    #[test]
    fn register_all_clears_previous_entries() {
        let registry = standard();
        registry.register_all(vec![Denomination::new("DIAMOND", dec!(100))]);
        assert_eq!(registry.unit_value("DIAMOND"), dec!(100));
        // no stale entries survive a reload
        assert_eq!(registry.unit_value("GOLD_INGOT"), dec!(0));
        assert_eq!(registry.unit_value("IRON_INGOT"), dec!(0));
    }

    #[test]
    fn upserts_and_unregisters() {
        let registry = standard();
        registry.register(Denomination::new("GOLD_INGOT", dec!(12)));
        assert_eq!(registry.unit_value("GOLD_INGOT"), dec!(12));
        registry.unregister("GOLD_INGOT");
        assert_eq!(registry.unit_value("GOLD_INGOT"), dec!(0));
        // the other entry is untouched
        assert_eq!(registry.unit_value("IRON_INGOT"), dec!(1));
    }

    #[test]
    fn exact_multiplication() {
        let registry = Registry::new();
        registry.register(Denomination::new("COPPER_NUGGET", dec!(0.1)));
        // 0.1 * 3 must be exactly 0.3, not a float approximation
        assert_eq!(registry.value_of("COPPER_NUGGET", 3), dec!(0.3));
    }

    #[test]
    fn concurrent_single_entry_writes_all_land() {
        let registry = Arc::new(Registry::new());
        let writers: Vec<_> = (0..8)
            .map(|w| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        let kind = format!("KIND_{}_{}", w, i);
                        registry.register(Denomination::new(kind, dec!(1)));
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }
        // no writer's upsert may be lost to another writer's swap
        assert_eq!(registry.snapshot().len(), 800);
    }

    #[test]
    fn rebuild_is_atomic_for_readers() {
        let registry = Arc::new(standard());
        let reader = {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..1000 {
                    let snap = registry.snapshot();
                    let gold = snap.get("GOLD_INGOT").map(|d| d.value().clone());
                    let iron = snap.get("IRON_INGOT").map(|d| d.value().clone());
                    // either the full old mapping or the full new one
                    match (gold, iron) {
                        (Some(g), Some(i)) => {
                            assert_eq!(g, dec!(10));
                            assert_eq!(i, dec!(1));
                        }
                        (Some(g), None) => assert_eq!(g, dec!(20)),
                        other => panic!("partial mapping observed: {:?}", other),
                    }
                }
            })
        };
        for _ in 0..1000 {
            registry.register_all(vec![Denomination::new("GOLD_INGOT", dec!(20))]);
            registry.register_all(vec![
                Denomination::new("GOLD_INGOT", dec!(10)),
                Denomination::new("IRON_INGOT", dec!(1)),
            ]);
        }
        reader.join().unwrap();
    }
}
