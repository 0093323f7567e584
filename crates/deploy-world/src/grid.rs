//! In-memory reference world.
//!
//! [`GridWorld`] is a sparse voxel grid with a handful of entity kinds and
//! item behaviours, enough to drive every branch of deployment. Unset
//! positions are air. Block entities exist only for signs.
//!
//! Interaction responses live in [`crate::response`]; this module owns the
//! storage, the block queries, and item drops.

use std::collections::BTreeMap;

use deploy_agents::{DropSink, OperatorProxy};
use deploy_types::{
    BlockEntityId, BlockHit, BlockKind, BlockPos, Direction, EntityHit, EntityId, InteractionResult,
    ItemStack, SignText, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::collaborator::{ItemUse, World};
use crate::entity::{Entity, EntityKind};
use crate::error::WorldError;

/// Horizontal build limit along x and z, in blocks from the origin.
pub const HORIZONTAL_LIMIT: i32 = 30_000_000;

/// Distance along the drop direction at which a dropped stack appears.
const DROP_OFFSET: f64 = 0.4;

/// Launch speed of a dropped stack along its direction.
const DROP_SPEED: f64 = 0.7;

/// Vertical build limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldBounds {
    /// Lowest buildable y.
    pub min_y: i32,
    /// One past the highest buildable y.
    pub max_y: i32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min_y: 0,
            max_y: 256,
        }
    }
}

impl WorldBounds {
    /// Check that the range is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBounds`] when `min_y >= max_y`.
    pub const fn validate(self) -> Result<Self, WorldError> {
        if self.min_y >= self.max_y {
            return Err(WorldError::InvalidBounds {
                min_y: self.min_y,
                max_y: self.max_y,
            });
        }
        Ok(self)
    }

    /// Whether `position` lies inside the limits.
    pub const fn contains(self, position: BlockPos) -> bool {
        position.y >= self.min_y
            && position.y < self.max_y
            && position.x.unsigned_abs() < HORIZONTAL_LIMIT.unsigned_abs()
            && position.z.unsigned_abs() < HORIZONTAL_LIMIT.unsigned_abs()
    }
}

/// The block entity behind a sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignEntity {
    /// Identity, fresh for every placed sign.
    pub id: BlockEntityId,
    /// Current text.
    pub text: SignText,
    /// Unsaved changes flag.
    pub changed: bool,
}

/// A stack lying loose in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedItem {
    /// What was dropped.
    pub stack: ItemStack,
    /// Spawn position.
    pub position: Vec3,
    /// Initial velocity.
    pub velocity: Vec3,
}

/// Sparse voxel world with entities and loose items.
#[derive(Debug, Clone)]
pub struct GridWorld {
    bounds: WorldBounds,
    pub(crate) blocks: BTreeMap<BlockPos, BlockKind>,
    signs: BTreeMap<BlockPos, SignEntity>,
    pub(crate) entities: BTreeMap<EntityId, Entity>,
    pub(crate) dropped: Vec<DroppedItem>,
    block_updates: Vec<BlockPos>,
    pub(crate) rng: StdRng,
}

impl GridWorld {
    /// An empty world. `seed` fixes drop jitter and other randomness.
    pub fn new(bounds: WorldBounds, seed: u64) -> Self {
        Self {
            bounds,
            blocks: BTreeMap::new(),
            signs: BTreeMap::new(),
            entities: BTreeMap::new(),
            dropped: Vec::new(),
            block_updates: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The configured build limits.
    pub const fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    // -------------------------------------------------------------------
    // Blocks
    // -------------------------------------------------------------------

    /// Set the block at `position`. Placing a sign creates a fresh, empty
    /// sign entity; replacing one removes it.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] outside the build limits.
    pub fn set_block(&mut self, position: BlockPos, block: BlockKind) -> Result<(), WorldError> {
        if !self.bounds.contains(position) {
            return Err(WorldError::OutOfBounds(position));
        }
        self.put_block(position, block);
        Ok(())
    }

    /// Set a block already known to be in bounds.
    pub(crate) fn put_block(&mut self, position: BlockPos, block: BlockKind) {
        if block.is_air() {
            self.blocks.remove(&position);
        } else {
            self.blocks.insert(position, block);
        }
        if block.has_block_entity() {
            self.signs.insert(
                position,
                SignEntity {
                    id: BlockEntityId::new(),
                    text: SignText::default(),
                    changed: false,
                },
            );
        } else {
            self.signs.remove(&position);
        }
        self.block_updates.push(position);
    }

    /// Sign entity at `position`, if any.
    pub fn sign(&self, position: BlockPos) -> Option<&SignEntity> {
        self.signs.get(&position)
    }

    /// Every position that has been updated, in order.
    pub fn block_updates(&self) -> &[BlockPos] {
        &self.block_updates
    }

    /// Number of non-air blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    // -------------------------------------------------------------------
    // Entities
    // -------------------------------------------------------------------

    /// Add an entity standing at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] when `position` is outside the
    /// build limits.
    pub fn spawn_entity(&mut self, kind: EntityKind, position: Vec3) -> Result<EntityId, WorldError> {
        let cell = BlockPos::containing(position);
        if !self.bounds.contains(cell) {
            return Err(WorldError::OutOfBounds(cell));
        }
        let entity = Entity::new(kind, position);
        let id = entity.id;
        self.entities.insert(id, entity);
        Ok(id)
    }

    /// Look up an entity.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] for unknown ids.
    pub fn entity(&self, id: EntityId) -> Result<&Entity, WorldError> {
        self.entities.get(&id).ok_or(WorldError::EntityNotFound(id))
    }

    /// Every entity, in id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    // -------------------------------------------------------------------
    // Loose items
    // -------------------------------------------------------------------

    /// Everything dropped so far, in order.
    pub fn dropped_items(&self) -> &[DroppedItem] {
        &self.dropped
    }

    /// Remove and return everything dropped so far.
    pub fn take_dropped_items(&mut self) -> Vec<DroppedItem> {
        core::mem::take(&mut self.dropped)
    }

    /// Spawn a loose stack at `position` with a small random velocity.
    pub(crate) fn scatter(&mut self, stack: ItemStack, position: Vec3) {
        let velocity = Vec3::new(self.jitter(), 0.2, self.jitter());
        self.dropped.push(DroppedItem {
            stack,
            position,
            velocity,
        });
    }

    fn jitter(&mut self) -> f64 {
        self.rng.random::<f64>() * 0.2 - 0.1
    }
}

impl World for GridWorld {
    fn is_in_bounds(&self, position: BlockPos) -> bool {
        self.bounds.contains(position)
    }

    fn block(&self, position: BlockPos) -> BlockKind {
        self.blocks.get(&position).copied().unwrap_or_default()
    }

    fn block_entity(&self, position: BlockPos) -> Option<BlockEntityId> {
        self.signs.get(&position).map(|s| s.id)
    }

    fn sign_text_mut(&mut self, position: BlockPos) -> Option<&mut SignText> {
        self.signs.get_mut(&position).map(|s| &mut s.text)
    }

    fn mark_block_entity_changed(&mut self, position: BlockPos) {
        if let Some(sign) = self.signs.get_mut(&position) {
            sign.changed = true;
        }
    }

    fn send_block_updated(&mut self, position: BlockPos) {
        self.block_updates.push(position);
    }

    fn raycast_entities(&self, origin: Vec3, direction: Vec3, range: f64) -> Option<EntityHit> {
        self.entities
            .values()
            .filter_map(|e| e.ray_entry(origin, direction, range).map(|t| (t, e.id)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(t, entity)| EntityHit {
                entity,
                location: origin + direction * t,
            })
    }

    fn is_living(&self, entity: EntityId) -> bool {
        self.entities.get(&entity).is_some_and(|e| e.kind.is_living())
    }

    fn interact_entity_at(
        &mut self,
        entity: EntityId,
        operator: &mut OperatorProxy,
        location: Vec3,
        drops: &mut dyn DropSink,
    ) -> InteractionResult {
        let _ = (location, drops);
        self.respond_interact_at(entity, operator)
    }

    fn interact_entity(
        &mut self,
        entity: EntityId,
        operator: &mut OperatorProxy,
        drops: &mut dyn DropSink,
    ) -> InteractionResult {
        self.respond_interact(entity, operator, drops)
    }

    fn use_item_on_living(
        &mut self,
        entity: EntityId,
        operator: &mut OperatorProxy,
        drops: &mut dyn DropSink,
    ) -> InteractionResult {
        let _ = drops;
        self.respond_use_on_living(entity, operator)
    }

    fn use_item_first(&mut self, _operator: &mut OperatorProxy, _hit: &BlockHit) -> InteractionResult {
        InteractionResult::Pass
    }

    fn use_item_on_block(&mut self, operator: &mut OperatorProxy, hit: &BlockHit) -> InteractionResult {
        self.respond_use_on_block(operator, hit)
    }

    fn use_item(&mut self, operator: &mut OperatorProxy) -> ItemUse {
        self.respond_use(operator)
    }

    fn drop_item_stack(&mut self, stack: ItemStack, position: BlockPos, direction: Option<Direction>) {
        if stack.is_empty() {
            return;
        }
        let step = direction.map_or(Vec3::ZERO, Direction::unit);
        let spawn = position.center() + step * DROP_OFFSET;
        let velocity = step * DROP_SPEED + Vec3::new(self.jitter(), self.jitter(), self.jitter());
        tracing::debug!(%position, stack = %stack, "item dropped");
        self.dropped.push(DroppedItem {
            stack,
            position: spawn,
            velocity,
        });
    }
}
