//! Permission gates deciding whether an agent may edit a block.
//!
//! The deployer consults a gate only when block protection is switched on
//! in its configuration. The policy data itself (spawn point, claimed
//! regions) belongs to whoever constructs the gate.

use deploy_agents::OperatorProxy;
use deploy_types::BlockPos;
use serde::{Deserialize, Serialize};

use crate::collaborator::World;

/// Decides whether `requester` may edit the block at `position`.
pub trait PermissionGate {
    /// Whether the edit is allowed.
    fn is_editable(&self, world: &dyn World, position: BlockPos, requester: &OperatorProxy) -> bool;
}

/// Allows every edit.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionGate for AllowAll {
    fn is_editable(&self, _world: &dyn World, _position: BlockPos, _requester: &OperatorProxy) -> bool {
        true
    }
}

/// Forbids edits within a square around the world spawn.
///
/// The square is measured on the horizontal plane only; a radius of zero
/// disables protection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnProtection {
    /// The world spawn point.
    pub spawn: BlockPos,
    /// Protected distance from spawn along x and z.
    pub radius: u32,
}

impl SpawnProtection {
    /// Whether `position` falls inside the protected square.
    pub fn covers(&self, position: BlockPos) -> bool {
        if self.radius == 0 {
            return false;
        }
        let dx = position.x.abs_diff(self.spawn.x);
        let dz = position.z.abs_diff(self.spawn.z);
        dx.max(dz) <= self.radius
    }
}

impl PermissionGate for SpawnProtection {
    fn is_editable(&self, _world: &dyn World, position: BlockPos, _requester: &OperatorProxy) -> bool {
        !self.covers(position)
    }
}

/// An inclusive axis-aligned box of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Minimum corner.
    pub min: BlockPos,
    /// Maximum corner.
    pub max: BlockPos,
}

impl Region {
    /// A region spanning the two corners in any order.
    pub fn new(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Whether `position` lies inside.
    pub const fn contains(&self, position: BlockPos) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.y >= self.min.y
            && position.y <= self.max.y
            && position.z >= self.min.z
            && position.z <= self.max.z
    }
}

/// Forbids edits inside any of a list of claimed regions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedRegions {
    /// The claimed regions.
    pub regions: Vec<Region>,
}

impl PermissionGate for ProtectedRegions {
    fn is_editable(&self, _world: &dyn World, position: BlockPos, _requester: &OperatorProxy) -> bool {
        !self.regions.iter().any(|r| r.contains(position))
    }
}

impl<G: PermissionGate + ?Sized> PermissionGate for &G {
    fn is_editable(&self, world: &dyn World, position: BlockPos, requester: &OperatorProxy) -> bool {
        (**self).is_editable(world, position, requester)
    }
}
