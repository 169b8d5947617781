//! Containers model a holder's physical storage: an ordered, slot-capped
//! sequence of object stacks. The settlement coordinator scans these in slot
//! order when extracting value, so ordering is part of the contract.

use crate::models::stack::ObjectStack;
use getset::Getters;
use serde::{Deserialize, Serialize};

/// An ordered sequence of object stacks with a fixed number of slots.
#[derive(Clone, Debug, PartialEq, Getters, Serialize, Deserialize)]
pub struct Container {
    /// The stacks, in slot order. Empty slots are stacks with quantity 0.
    #[getset(get = "pub")]
    stacks: Vec<ObjectStack>,
    /// How many slots this container has.
    #[getset(get = "pub")]
    capacity: usize,
}

impl Container {
    /// Create an empty container with the given slot count.
    pub fn new(capacity: usize) -> Self {
        Self {
            stacks: Vec::new(),
            capacity,
        }
    }

    /// Create a container pre-filled with the given stacks (slot order
    /// preserved). Capacity is clamped up to fit the initial contents.
    pub fn with_stacks(capacity: usize, stacks: Vec<ObjectStack>) -> Self {
        let capacity = capacity.max(stacks.len());
        Self { stacks, capacity }
    }

    /// Mutable view of the stacks, in slot order.
    pub fn stacks_mut(&mut self) -> &mut Vec<ObjectStack> {
        &mut self.stacks
    }

    /// Try to place a stack into this container.
    ///
    /// First tops up an existing stack of the same kind/variant, then falls
    /// back to occupying a free slot. Returns `None` when the whole stack was
    /// placed, otherwise the rejected remainder (which may be the entire
    /// input if every slot is taken).
    pub fn add(&mut self, stack: ObjectStack) -> Option<ObjectStack> {
        if stack.is_empty() {
            return None;
        }
        for existing in self.stacks.iter_mut() {
            if existing.kind() == stack.kind() && existing.variant() == stack.variant() && !existing.is_empty() {
                existing.set_quantity(existing.quantity() + stack.quantity());
                return None;
            }
        }
        // reuse an emptied slot before claiming a new one
        for existing in self.stacks.iter_mut() {
            if existing.is_empty() {
                *existing = stack;
                return None;
            }
        }
        if self.stacks.len() < self.capacity {
            self.stacks.push(stack);
            return None;
        }
        Some(stack)
    }
}
