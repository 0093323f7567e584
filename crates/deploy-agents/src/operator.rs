//! The operator proxy: a stand-in actor that performs interactions on the
//! agent's behalf.
//!
//! Interactions in the world are defined in terms of an actor standing
//! somewhere, looking somewhere, and holding something. The agent itself is
//! a block, so each deployment builds one [`OperatorProxy`], stands it next
//! to the current target, hands it a copy of the item, and afterwards drains
//! whatever it ends up holding back into the agent's inventory.
//!
//! The proxy lives for one deployment call. Between trials it is re-oriented
//! and re-loaded rather than rebuilt.

use deploy_types::{AgentId, BlockPos, Direction, ItemStack, Vec3};

use crate::inventory::AgentInventory;

/// Pocket slots available to interaction side effects (a filled bucket
/// handed back while the rest of the stack stays held, for example).
pub const PROXY_POCKET_SLOTS: usize = 36;

/// How far the proxy is pushed out of the agent's own block when it has to
/// stand there, so it does not intersect the agent.
pub const SELF_INTERSECTION_NUDGE: f64 = 0.48;

/// Yaw and pitch for an actor facing `facing` on behalf of an agent facing
/// `agent_facing`.
///
/// Horizontal facings use their own yaw with level pitch. Looking straight
/// up or down keeps the agent's yaw so the actor's "forward" still matches
/// the agent's.
pub const fn orientation(agent_facing: Direction, facing: Direction) -> (f32, f32) {
    if facing.is_vertical() {
        (agent_facing.to_yaw(), facing.to_pitch())
    } else {
        (facing.to_yaw(), 0.0)
    }
}

/// Position and rotation of the proxy, including the previous-tick copies
/// the world uses for interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Current position. The proxy's eyes are at its feet.
    pub position: Vec3,
    /// Previous-tick position.
    pub prev_position: Vec3,
    /// Horizontal rotation in degrees.
    pub yaw: f32,
    /// Vertical rotation in degrees.
    pub pitch: f32,
    /// Previous-tick yaw.
    pub prev_yaw: f32,
    /// Previous-tick pitch.
    pub prev_pitch: f32,
    /// Head rotation.
    pub head_yaw: f32,
    /// Previous-tick head rotation.
    pub prev_head_yaw: f32,
}

/// What [`OperatorProxy::collect_and_return`] drained.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Collected {
    /// The contents of the held slot.
    pub held: ItemStack,
    /// Pocket items the agent inventory had no room for.
    pub overflow: Vec<ItemStack>,
}

/// Transient actor performing interactions for one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorProxy {
    owner: AgentId,
    pose: Pose,
    held: ItemStack,
    pockets: Vec<ItemStack>,
}

impl OperatorProxy {
    /// A proxy for `owner` at the origin holding nothing.
    pub fn new(owner: AgentId) -> Self {
        Self {
            owner,
            pose: Pose::default(),
            held: ItemStack::EMPTY,
            pockets: vec![ItemStack::EMPTY; PROXY_POCKET_SLOTS],
        }
    }

    /// The agent this proxy acts for.
    pub const fn owner(&self) -> AgentId {
        self.owner
    }

    /// Current pose.
    pub const fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Stand in block `stand` facing `facing`.
    ///
    /// When `stand` is the agent's own block the proxy is nudged towards
    /// `facing` so it does not overlap the agent.
    pub fn reorient(
        &mut self,
        agent_position: BlockPos,
        agent_facing: Direction,
        stand: BlockPos,
        facing: Direction,
    ) {
        let mut position = stand.center();
        if stand == agent_position {
            position = position + facing.unit() * SELF_INTERSECTION_NUDGE;
        }
        let (yaw, pitch) = orientation(agent_facing, facing);

        self.pose = Pose {
            position,
            prev_position: position,
            yaw,
            pitch,
            prev_yaw: yaw,
            prev_pitch: pitch,
            head_yaw: yaw,
            prev_head_yaw: yaw,
        };
    }

    /// Where the proxy looks from.
    pub const fn eye_position(&self) -> Vec3 {
        self.pose.position
    }

    /// Unit vector the proxy looks along.
    pub fn view_vector(&self) -> Vec3 {
        Vec3::from_rotation(self.pose.yaw, self.pose.pitch)
    }

    /// The item in the working slot.
    pub const fn held_item(&self) -> &ItemStack {
        &self.held
    }

    /// Mutable access to the working slot, for interactions that change the
    /// held stack in place.
    pub const fn held_item_mut(&mut self) -> &mut ItemStack {
        &mut self.held
    }

    /// Stage `stack` in the working slot, replacing whatever was there.
    pub fn load_held_item(&mut self, stack: ItemStack) {
        self.held = stack;
    }

    /// Pocket slots, in order.
    pub fn pockets(&self) -> &[ItemStack] {
        &self.pockets
    }

    /// Hand the proxy an item produced by an interaction.
    ///
    /// Merges into the held stack first, then into matching pockets, then
    /// into empty pockets. Returns what did not fit.
    pub fn add_item(&mut self, stack: ItemStack) -> ItemStack {
        let mut rest = stack;
        if rest.is_empty() {
            return ItemStack::EMPTY;
        }

        if self.held.is_stackable_with(&rest) {
            merge_into(&mut self.held, &mut rest);
        }
        for pocket in self.pockets.iter_mut().filter(|p| !p.is_empty()) {
            if rest.is_empty() {
                break;
            }
            if pocket.is_stackable_with(&rest) {
                merge_into(pocket, &mut rest);
            }
        }
        for pocket in &mut self.pockets {
            if rest.is_empty() {
                break;
            }
            if pocket.is_empty() {
                *pocket = rest.split(rest.max_stack_size());
            }
        }
        rest
    }

    /// Drain the proxy.
    ///
    /// The held slot is returned as-is; it is what the caller writes back
    /// into `selected_slot`. Pocket items are merged into the other slots of
    /// `inventory`, starting just after `selected_slot`; whatever does not
    /// fit comes back in [`Collected::overflow`]. Afterwards the proxy holds
    /// nothing.
    pub fn collect_and_return(&mut self, inventory: &mut AgentInventory, selected_slot: usize) -> Collected {
        let held = core::mem::take(&mut self.held);
        let mut overflow = Vec::new();
        for pocket in &mut self.pockets {
            if pocket.is_empty() {
                continue;
            }
            let stack = core::mem::take(pocket);
            let rest = inventory.store_items_around(stack, selected_slot);
            if !rest.is_empty() {
                overflow.push(rest);
            }
        }
        Collected { held, overflow }
    }
}

fn merge_into(target: &mut ItemStack, rest: &mut ItemStack) {
    let space = target.max_stack_size().saturating_sub(target.count);
    let moved = space.min(rest.count);
    target.grow(moved);
    rest.shrink(moved);
}
