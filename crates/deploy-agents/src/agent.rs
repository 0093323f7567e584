//! The deploying agent: a turtle occupying one block of the world.
//!
//! An [`Agent`] owns its inventory and remembers which slot is selected.
//! Deployment borrows the agent mutably for the duration of one command.

use deploy_types::{AgentId, BlockPos, Direction, ItemStack};
use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::inventory::AgentInventory;

/// A turtle in the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Identity of the agent.
    pub id: AgentId,
    /// The block the agent occupies.
    pub position: BlockPos,
    /// The horizontal direction the agent faces.
    pub facing: Direction,
    /// Items carried by the agent.
    pub inventory: AgentInventory,
    selected_slot: usize,
}

impl Agent {
    /// A new agent with an empty default inventory and slot 0 selected.
    pub fn new(position: BlockPos, facing: Direction) -> Self {
        Self {
            id: AgentId::new(),
            position,
            facing,
            inventory: AgentInventory::default(),
            selected_slot: 0,
        }
    }

    /// Replace the inventory, keeping the selection if it is still valid.
    #[must_use]
    pub fn with_inventory(mut self, inventory: AgentInventory) -> Self {
        if self.selected_slot >= inventory.len() {
            self.selected_slot = 0;
        }
        self.inventory = inventory;
        self
    }

    /// Index of the selected slot.
    pub const fn selected_slot(&self) -> usize {
        self.selected_slot
    }

    /// Select a different slot.
    pub fn select_slot(&mut self, slot: usize) -> Result<(), AgentError> {
        if slot >= self.inventory.len() {
            return Err(AgentError::SlotOutOfRange {
                slot,
                size: self.inventory.len(),
            });
        }
        self.selected_slot = slot;
        Ok(())
    }

    /// The stack in the selected slot.
    pub fn selected_item(&self) -> &ItemStack {
        self.inventory.get(self.selected_slot).unwrap_or(&ItemStack::EMPTY)
    }

    /// Overwrite the selected slot.
    pub fn set_selected_item(&mut self, stack: ItemStack) -> Result<(), AgentError> {
        self.inventory.set(self.selected_slot, stack)
    }
}
