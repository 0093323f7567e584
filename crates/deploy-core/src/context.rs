//! Simulated interaction contexts for block trials.
//!
//! A block trial aims the operator proxy at one face of one block. The
//! [`InteractionContext`] says where on that face the click lands, where the
//! proxy must stand to make it, and which way it looks.

use deploy_agents::orientation;
use deploy_types::{BlockHit, BlockPos, Direction, Vec3};

/// Vertical hit offset used instead of the exact face centre on side faces.
///
/// Placement logic that distinguishes the upper and lower half of a block
/// (slabs, stairs) then treats a sideways placement as a lower-half click.
pub const SIDE_HIT_HEIGHT: f64 = 0.45;

/// Everything needed to click `side` of the block at `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionContext {
    /// The block being clicked.
    pub position: BlockPos,
    /// The face being clicked.
    pub side: Direction,
    /// Hit point relative to the block's minimum corner.
    pub hit_offset: Vec3,
    /// Absolute hit point.
    pub hit_location: Vec3,
    /// The block the proxy stands in.
    pub stand: BlockPos,
    /// The way the proxy faces.
    pub facing: Direction,
    /// Proxy yaw in degrees.
    pub yaw: f32,
    /// Proxy pitch in degrees.
    pub pitch: f32,
}

impl InteractionContext {
    /// Context for clicking `side` of `position` on behalf of an agent
    /// facing `agent_facing`.
    pub fn for_block(agent_facing: Direction, position: BlockPos, side: Direction) -> Self {
        let hit_offset = hit_offset(side);
        let facing = side.opposite();
        let (yaw, pitch) = orientation(agent_facing, facing);
        Self {
            position,
            side,
            hit_offset,
            hit_location: position.corner() + hit_offset,
            stand: position.relative(side),
            facing,
            yaw,
            pitch,
        }
    }

    /// The hit result the world sees.
    pub const fn block_hit(&self) -> BlockHit {
        BlockHit {
            position: self.position,
            side: self.side,
            location: self.hit_location,
        }
    }
}

/// Local hit point on `side`: the face centre, lowered slightly on side faces.
pub fn hit_offset(side: Direction) -> Vec3 {
    let axis = |step: i32| 0.5 + f64::from(step) * 0.5;
    let mut y = axis(side.step_y());
    if (y - 0.5).abs() < 0.01 {
        y = SIDE_HIT_HEIGHT;
    }
    Vec3::new(axis(side.step_x()), y, axis(side.step_z()))
}
