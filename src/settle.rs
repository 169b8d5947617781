//! The settlement coordinator moves value between a holder's physical
//! containers and their abstract balance, without ever creating or destroying
//! it.
//!
//! Storage of balances and containers lives outside the core; the coordinator
//! only knows the [`BalanceStore`] and [`ContainerProvider`] seams. Any
//! backing that can satisfy those traits can be settled against without
//! coupling the logic to a storage mechanism.

use crate::{
    convert,
    error::{Error, Result},
    models::{
        container::Container,
        holder::HolderID,
        stack::ObjectStack,
    },
    registry::Registry,
};
use rust_decimal::prelude::*;
use rust_decimal_macros::*;
use tracing::warn;

/// Access to holders' abstract balances. External collaborator: the core
/// never persists balances itself.
///
/// Implementations need not mutate for amounts below the settlement epsilon
/// (0.01); the coordinator already filters sub-epsilon remainders.
pub trait BalanceStore {
    /// Add `amount` to the holder's abstract balance.
    fn credit(&mut self, holder: &HolderID, amount: Decimal) -> Result<()>;
    /// Remove `amount` from the holder's abstract balance.
    fn debit(&mut self, holder: &HolderID, amount: Decimal) -> Result<()>;
    /// The holder's current abstract balance.
    fn balance_of(&self, holder: &HolderID) -> Decimal;
}

/// Access to holders' physical containers. External collaborator: the live
/// world owns the containers, the coordinator only mutates them through this
/// seam.
pub trait ContainerProvider {
    /// Whether the holder's containers can currently be mutated at all.
    /// Callers must gate container access on this; the accessors below are
    /// only defined for reachable holders.
    fn is_reachable(&self, holder: &HolderID) -> bool;
    /// The holder's primary container.
    fn primary_mut(&mut self, holder: &HolderID) -> &mut Container;
    /// The holder's secondary container, if they have one.
    fn secondary_mut(&mut self, holder: &HolderID) -> Option<&mut Container>;
    /// Called with stacks the primary container rejected during a deposit
    /// (ex: drop them in the world next to the holder). The deposited value
    /// is accounted as delivered either way; implementations that discard the
    /// stack are accepting the loss as a world-side event.
    fn overflow(&mut self, holder: &HolderID, stack: ObjectStack) {
        warn!(holder = holder.as_str(), kind = %stack.kind(), quantity = *stack.quantity(), "overflow stack had nowhere to go");
    }
}

/// Amounts below this threshold are settlement noise: the withdrawal loop
/// stops chasing them and stores are not asked to mutate for them. Fixed
/// business rule inherited from the original system; changing it would alter
/// economic outcomes.
fn epsilon() -> Decimal {
    dec!(0.01)
}

/// Orchestrates deposits and withdrawals for holders. Holds the registry and
/// the two external collaborators by (mutable) borrow, which also enforces
/// the per-holder serialization the operations require.
pub struct Settler<'a, B, C>
where
    B: BalanceStore,
    C: ContainerProvider,
{
    registry: &'a Registry,
    balances: &'a mut B,
    containers: &'a mut C,
    /// Whether withdrawals may draw from the secondary container (which is
    /// then preferred over the primary).
    count_secondary: bool,
}

impl<'a, B, C> Settler<'a, B, C>
where
    B: BalanceStore,
    C: ContainerProvider,
{
    pub fn new(registry: &'a Registry, balances: &'a mut B, containers: &'a mut C, count_secondary: bool) -> Self {
        Self {
            registry,
            balances,
            containers,
            count_secondary,
        }
    }

    /// Deposit `amount` into the holder's primary container as physical
    /// objects.
    ///
    /// Stacks the container cannot accept are routed to the provider's
    /// overflow hook; they still count as delivered, because the objects were
    /// successfully instantiated (the physical world truth is authoritative,
    /// even if the world later loses them).
    ///
    /// Returns the portion of `amount` that no denomination could represent.
    /// That remainder belongs in the holder's abstract balance and is the
    /// caller's responsibility; it is never silently dropped here.
    pub fn deposit(&mut self, holder: &HolderID, amount: Decimal) -> Result<Decimal> {
        self.ensure_settleable(holder, amount)?;
        let converted = convert::amount_to_objects(self.registry, amount)?;
        for stack in converted.stacks {
            if let Some(rejected) = self.containers.primary_mut(holder).add(stack) {
                self.containers.overflow(holder, rejected);
            }
        }
        Ok(converted.leftover)
    }

    /// Withdraw `amount` of value from the holder's containers.
    ///
    /// Draws from the secondary container first when it is counted, then the
    /// primary. Within a container, stacks are consumed in slot order — not
    /// by value. Containers hold integral quantities, so a stack whose value
    /// exceeds what is still owed is removed whole and the excess is credited
    /// back to the holder's abstract balance as change. That change credit is
    /// what keeps total wealth (physical + abstract) invariant.
    ///
    /// Returns the unsatisfied remainder: zero when fully satisfied, positive
    /// when the containers ran out of worthwhile stacks first.
    pub fn withdraw(&mut self, holder: &HolderID, amount: Decimal) -> Result<Decimal> {
        self.ensure_settleable(holder, amount)?;
        let mut remaining = amount;
        if self.count_secondary {
            if let Some(secondary) = self.containers.secondary_mut(holder) {
                remaining = Self::drain(self.registry, self.balances, holder, secondary, remaining)?;
            }
        }
        if remaining >= epsilon() {
            let primary = self.containers.primary_mut(holder);
            remaining = Self::drain(self.registry, self.balances, holder, primary, remaining)?;
        }
        Ok(remaining)
    }

    /// The total value currently sitting in the holder's containers
    /// (secondary included when counted).
    pub fn holdings_value(&mut self, holder: &HolderID) -> Result<Decimal> {
        if !self.containers.is_reachable(holder) {
            Err(Error::UnreachableHolder(holder.clone()))?;
        }
        let mut total = convert::objects_to_amount(self.registry, self.containers.primary_mut(holder).stacks());
        if self.count_secondary {
            if let Some(secondary) = self.containers.secondary_mut(holder) {
                total += convert::objects_to_amount(self.registry, secondary.stacks());
            }
        }
        Ok(total)
    }

    /// Shared precondition gate: validate the amount and the holder's
    /// reachability before any mutation is applied.
    fn ensure_settleable(&self, holder: &HolderID, amount: Decimal) -> Result<()> {
        if amount.is_sign_negative() && !amount.is_zero() {
            Err(Error::InvalidAmount(amount))?;
        }
        if !self.containers.is_reachable(holder) {
            Err(Error::UnreachableHolder(holder.clone()))?;
        }
        Ok(())
    }

    /// Extract value from one container in slot order until `remaining` drops
    /// below the epsilon threshold or the container runs out. Returns what is
    /// still owed.
    fn drain(
        registry: &Registry,
        balances: &mut B,
        holder: &HolderID,
        container: &mut Container,
        mut remaining: Decimal,
    ) -> Result<Decimal> {
        for stack in container.stacks_mut() {
            if remaining < epsilon() {
                break;
            }
            if stack.is_empty() {
                continue;
            }
            let stack_value = registry.value_of(stack.kind(), *stack.quantity());
            if stack_value <= Decimal::zero() {
                // worthless or foreign kind: leave the stack untouched
                continue;
            }
            if stack_value > remaining {
                // credit the change before touching the stack: if the store
                // refuses, the container is left exactly as it was
                let change = stack_value - remaining;
                if change >= epsilon() {
                    balances.credit(holder, change)?;
                }
                stack.clear();
                remaining = Decimal::zero();
            } else {
                stack.clear();
                remaining -= stack_value;
            }
        }
        Ok(remaining)
    }
}
