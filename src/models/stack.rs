//! Object stacks are the physical shape money takes: N objects of one kind
//! sitting in a container slot.

use getset::{Getters, Setters};
use serde::{Deserialize, Serialize};

/// A stack of identical denominated objects (kind + quantity + optional
/// variant tag). A quantity of 0 marks an empty slot.
#[derive(Clone, Debug, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", set = "pub")]
pub struct ObjectStack {
    /// The object kind, matching a registry key (or not: foreign kinds are
    /// simply worthless).
    kind: String,
    /// How many objects this stack holds.
    quantity: u64,
    /// Variant tag inherited from the emitting denomination, if any.
    variant: Option<i32>,
}

impl ObjectStack {
    pub fn new<T: Into<String>>(kind: T, quantity: u64, variant: Option<i32>) -> Self {
        Self {
            kind: kind.into(),
            quantity,
            variant,
        }
    }

    /// True if this stack holds no objects.
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }

    /// Empty the stack, returning how many objects it held.
    pub(crate) fn clear(&mut self) -> u64 {
        std::mem::replace(&mut self.quantity, 0)
    }
}
