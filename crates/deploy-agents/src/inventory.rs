//! Slotted inventory carried by a deploying agent.
//!
//! Each slot holds one [`ItemStack`] bounded by the item's own maximum stack
//! size. Merging never fails: whatever does not fit is handed back to the
//! caller as a remainder stack, and the caller decides whether to drop it.

use deploy_types::ItemStack;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Number of slots in a turtle's inventory.
pub const TURTLE_SLOTS: usize = 16;

/// A fixed-size list of item slots with a change flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInventory {
    slots: Vec<ItemStack>,
    #[serde(skip)]
    changed: bool,
}

impl Default for AgentInventory {
    fn default() -> Self {
        Self::new(TURTLE_SLOTS)
    }
}

impl AgentInventory {
    /// An empty inventory with `size` slots.
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![ItemStack::EMPTY; size],
            changed: false,
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the inventory has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Read slot `slot`.
    pub fn get(&self, slot: usize) -> Result<&ItemStack, AgentError> {
        self.slots.get(slot).ok_or(AgentError::SlotOutOfRange {
            slot,
            size: self.slots.len(),
        })
    }

    /// Overwrite slot `slot`.
    pub fn set(&mut self, slot: usize, stack: ItemStack) -> Result<(), AgentError> {
        let size = self.slots.len();
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(AgentError::SlotOutOfRange { slot, size })?;
        *entry = stack;
        self.changed = true;
        Ok(())
    }

    /// Iterate over all slots in order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.iter()
    }

    /// Total number of items across all slots.
    pub fn total_count(&self) -> u64 {
        self.slots
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| u64::from(s.count))
            .fold(0_u64, u64::saturating_add)
    }

    /// Record that the contents changed.
    pub const fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Whether the contents changed since the last [`take_changed`].
    ///
    /// [`take_changed`]: Self::take_changed
    pub const fn is_changed(&self) -> bool {
        self.changed
    }

    /// Clear the change flag, returning its previous value.
    pub const fn take_changed(&mut self) -> bool {
        let was = self.changed;
        self.changed = false;
        was
    }

    /// Insert `stack` into a single slot, returning what did not fit.
    ///
    /// An empty slot takes up to the item's stack limit; an occupied slot
    /// only accepts a stackable match. Out-of-range slots accept nothing.
    pub fn insert_item(&mut self, slot: usize, stack: ItemStack) -> ItemStack {
        if stack.is_empty() {
            return ItemStack::EMPTY;
        }
        let Some(existing) = self.slots.get_mut(slot) else {
            return stack;
        };

        let mut rest = stack;
        if existing.is_empty() {
            let moved = rest.split(rest.max_stack_size());
            if moved.is_empty() {
                return rest;
            }
            *existing = moved;
            self.changed = true;
        } else if existing.is_stackable_with(&rest) {
            let space = existing.max_stack_size().saturating_sub(existing.count);
            let moved = space.min(rest.count);
            if moved == 0 {
                return rest;
            }
            existing.grow(moved);
            rest.shrink(moved);
            self.changed = true;
        }
        rest
    }

    /// Store `stack` across the inventory, visiting slots in order starting
    /// at `begin` and wrapping around. Returns what could not be stored.
    pub fn store_items(&mut self, stack: ItemStack, begin: usize) -> ItemStack {
        if stack.is_empty() {
            return ItemStack::EMPTY;
        }
        let len = self.slots.len();
        let mut remainder = stack;
        for i in 0..len {
            if remainder.is_empty() {
                break;
            }
            let slot = begin.saturating_add(i).checked_rem(len).unwrap_or(0);
            remainder = self.insert_item(slot, remainder);
        }
        remainder
    }

    /// Store `stack` in every slot except `reserved`, starting just after it
    /// and wrapping around. Returns what could not be stored.
    pub fn store_items_around(&mut self, stack: ItemStack, reserved: usize) -> ItemStack {
        if stack.is_empty() {
            return ItemStack::EMPTY;
        }
        let len = self.slots.len();
        let first = reserved.saturating_add(1);
        let mut remainder = stack;
        for i in 0..len {
            if remainder.is_empty() {
                break;
            }
            let slot = first.saturating_add(i).checked_rem(len).unwrap_or(0);
            if slot != reserved {
                remainder = self.insert_item(slot, remainder);
            }
        }
        remainder
    }
}
