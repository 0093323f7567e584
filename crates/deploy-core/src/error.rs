//! Error types for the `deploy-core` crate.
//!
//! Each variant renders exactly the message an agent's caller sees.

/// Why a deployment or place command did nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeployError {
    /// The selected slot is empty.
    #[error("No items to place")]
    NoItem,

    /// Every trial was ineligible or had no effect.
    #[error("Cannot place {} here", target_noun(.block_like))]
    NoValidTarget {
        /// Whether the item would place a block.
        block_like: bool,
    },

    /// A permission gate refused an otherwise eligible target.
    #[error("Cannot place in protected area")]
    PermissionDenied,

    /// A hook vetoed the command.
    #[error("{message}")]
    Vetoed {
        /// The hook's reason, shown verbatim.
        message: String,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn target_noun(block_like: &bool) -> &'static str {
    if *block_like { "block" } else { "item" }
}
