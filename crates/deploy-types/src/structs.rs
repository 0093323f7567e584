//! Plain data records passed between the world, the deployer, and the
//! command layer.

use serde::{Deserialize, Serialize};

use crate::geometry::{BlockPos, Direction, Vec3};
use crate::ids::EntityId;

/// Number of text lines on a sign.
pub const SIGN_LINES: usize = 4;

/// The text content of a sign block entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignText {
    /// Lines from top to bottom.
    pub lines: [String; SIGN_LINES],
}

impl SignText {
    /// Return line `index`, or `None` when out of range.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Overwrite line `index`. Out-of-range indices are ignored.
    pub fn set_line(&mut self, index: usize, text: impl Into<String>) {
        if let Some(line) = self.lines.get_mut(index) {
            *line = text.into();
        }
    }
}

/// Where an interaction touches a block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockHit {
    /// The block being clicked.
    pub position: BlockPos,
    /// The face of that block being clicked.
    pub side: Direction,
    /// The absolute point on the face.
    pub location: Vec3,
}

/// An entity found by a ray cast, with the point where the ray entered it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityHit {
    /// The entity that was hit.
    pub entity: EntityId,
    /// Where the ray entered the entity's bounding box.
    pub location: Vec3,
}

/// Result of one agent command, as reported back to the script that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    /// Whether the command did something.
    pub success: bool,
    /// Human-readable reason on failure.
    pub error_message: Option<String>,
}

impl CommandResult {
    /// A successful result.
    pub const fn success() -> Self {
        Self {
            success: true,
            error_message: None,
        }
    }

    /// A failed result with a reason.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
        }
    }
}
