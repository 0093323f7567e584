//! Error types for the deploy-agents crate.
//!
//! Slot access on an agent inventory is the only fallible operation here;
//! merging and draining report leftovers as values instead of errors.

/// Errors that can occur during agent state operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A slot index past the end of the inventory.
    #[error("slot {slot} out of range (inventory has {size} slots)")]
    SlotOutOfRange {
        /// The requested slot.
        slot: usize,
        /// Number of slots in the inventory.
        size: usize,
    },
}
