//! Enumeration types shared between the world and the deployment logic.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// The kind of block occupying a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Empty space.
    #[default]
    Air,
    /// Solid stone.
    Stone,
    /// Solid dirt.
    Dirt,
    /// Wooden planks.
    Planks,
    /// Wool block.
    Wool,
    /// Short vegetation that a placed block simply overwrites.
    TallGrass,
    /// Water source.
    Water,
    /// Lava source.
    Lava,
    /// A sign, backed by a sign block entity.
    Sign,
    /// A lily pad resting on water.
    LilyPad,
    /// The deploying agent's own body.
    Turtle,
}

impl BlockKind {
    /// Whether the cell is empty space.
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }

    /// Whether the cell holds a liquid.
    pub const fn is_liquid(self) -> bool {
        matches!(self, Self::Water | Self::Lava)
    }

    /// Whether placing a block here overwrites the current occupant.
    pub const fn is_replaceable(self) -> bool {
        matches!(self, Self::Air | Self::TallGrass | Self::Water | Self::Lava)
    }

    /// Whether this block carries a block entity.
    pub const fn has_block_entity(self) -> bool {
        matches!(self, Self::Sign)
    }
}

// ---------------------------------------------------------------------------
// Interaction results
// ---------------------------------------------------------------------------

/// What a world collaborator reports after an interaction attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionResult {
    /// The interaction happened and had an effect.
    Success,
    /// The interaction happened and consumed the action.
    Consume,
    /// The target had no interest; try something else.
    Pass,
    /// The interaction was attempted and refused.
    Fail,
}

impl InteractionResult {
    /// Whether the attempt counts as "used up" by the target.
    pub const fn consumes_action(self) -> bool {
        matches!(self, Self::Success | Self::Consume)
    }
}

/// A hook's opinion on an interaction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookVerdict {
    /// Let the world decide.
    #[default]
    NoOpinion,
    /// Veto the step; it does not consume the attempt.
    Deny,
    /// The hook handled the step itself and consumed the attempt.
    Consumed,
}

/// A hook's opinion on right-clicking a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockUseVerdict {
    /// Run both the use-first hook and the generic use-on-block interaction.
    #[default]
    Proceed,
    /// Run the use-first hook but not the generic use-on-block interaction.
    DenyItemUse,
    /// Skip both block interactions.
    Cancel,
}
