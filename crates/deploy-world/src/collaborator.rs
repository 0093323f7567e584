//! The narrow interfaces deployment consumes from the world.
//!
//! The deployer never simulates blocks or entities itself. It asks a
//! [`World`] what is where, asks it to respond to interactions performed by
//! the operator proxy, and lets [`InteractionHooks`] veto or short-circuit
//! individual steps. Implementations decide what the interaction actually
//! does; the deployer only classifies the reported [`InteractionResult`].

use deploy_agents::{Agent, DropSink, OperatorProxy};
use deploy_types::{
    BlockEntityId, BlockHit, BlockKind, BlockPos, BlockUseVerdict, Direction, EntityHit, EntityId,
    HookVerdict, InteractionResult, ItemStack, SignText, Vec3,
};

/// Outcome of a plain right-click with the held item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUse {
    /// How the world classified the attempt.
    pub result: InteractionResult,
    /// The stack that should occupy the held slot afterwards.
    pub stack: ItemStack,
}

impl ItemUse {
    /// The world had no interest; the held stack is unchanged.
    pub const fn pass(stack: ItemStack) -> Self {
        Self {
            result: InteractionResult::Pass,
            stack,
        }
    }
}

/// World queries, mutations, and interaction responses.
///
/// Interaction methods receive the proxy mutably: they may change the held
/// stack in place (shrinking it on placement, say) or hand extra items to
/// the proxy's pockets. Entity interactions also receive a [`DropSink`]
/// through which every item the entity drops must be offered first.
pub trait World {
    // -- block queries -----------------------------------------------------

    /// Whether `position` lies within the world's build limits.
    fn is_in_bounds(&self, position: BlockPos) -> bool;

    /// The block at `position`.
    fn block(&self, position: BlockPos) -> BlockKind;

    /// Whether `position` is empty space with nothing to interact against.
    fn is_empty_block(&self, position: BlockPos) -> bool {
        self.block(position).is_air()
    }

    /// Whether `position` holds a liquid.
    fn is_liquid(&self, position: BlockPos) -> bool {
        self.block(position).is_liquid()
    }

    /// Whether placing `stack` against `hit` would overwrite the block at
    /// `position` rather than go next to it.
    fn can_be_replaced(&self, position: BlockPos, stack: &ItemStack, hit: &BlockHit) -> bool {
        let _ = (stack, hit);
        self.block(position).is_replaceable()
    }

    // -- block entities ----------------------------------------------------

    /// Identity of the block entity at `position`, if any.
    fn block_entity(&self, position: BlockPos) -> Option<BlockEntityId>;

    /// Mutable sign text at `position`, if a sign is there.
    fn sign_text_mut(&mut self, position: BlockPos) -> Option<&mut SignText>;

    /// Record that the block entity at `position` has unsaved changes.
    fn mark_block_entity_changed(&mut self, position: BlockPos);

    /// Tell observers the block at `position` must be redrawn.
    fn send_block_updated(&mut self, position: BlockPos);

    // -- entities ----------------------------------------------------------

    /// Nearest entity whose bounds the ray from `origin` along the unit
    /// vector `direction` enters within `range`.
    fn raycast_entities(&self, origin: Vec3, direction: Vec3, range: f64) -> Option<EntityHit>;

    /// Whether `entity` is a living creature.
    fn is_living(&self, entity: EntityId) -> bool;

    // -- interaction responses ---------------------------------------------

    /// Interact with `entity` at a specific point on it.
    fn interact_entity_at(
        &mut self,
        entity: EntityId,
        operator: &mut OperatorProxy,
        location: Vec3,
        drops: &mut dyn DropSink,
    ) -> InteractionResult;

    /// Interact with `entity` as a whole.
    fn interact_entity(
        &mut self,
        entity: EntityId,
        operator: &mut OperatorProxy,
        drops: &mut dyn DropSink,
    ) -> InteractionResult;

    /// Apply the held item to a living `entity`.
    fn use_item_on_living(
        &mut self,
        entity: EntityId,
        operator: &mut OperatorProxy,
        drops: &mut dyn DropSink,
    ) -> InteractionResult;

    /// Item-specific handling that runs before any block interaction.
    fn use_item_first(&mut self, operator: &mut OperatorProxy, hit: &BlockHit) -> InteractionResult;

    /// Use the held item on the clicked block face.
    fn use_item_on_block(&mut self, operator: &mut OperatorProxy, hit: &BlockHit) -> InteractionResult;

    /// Right-click with the held item, not aimed at anything in particular.
    ///
    /// The held slot is left as it was; the returned stack says what it
    /// should become.
    fn use_item(&mut self, operator: &mut OperatorProxy) -> ItemUse;

    // -- drops -------------------------------------------------------------

    /// Spawn `stack` as a loose item at the centre of `position`, pushed
    /// towards `direction` when given.
    fn drop_item_stack(&mut self, stack: ItemStack, position: BlockPos, direction: Option<Direction>);
}

/// External listeners that may veto or take over interaction steps.
///
/// Every method defaults to "no opinion".
pub trait InteractionHooks {
    /// Called once before a place command deploys anything. Returning an
    /// error vetoes the whole command with that message.
    fn on_place(
        &mut self,
        agent: &Agent,
        operator: &OperatorProxy,
        position: BlockPos,
        stack: &ItemStack,
    ) -> Result<(), String> {
        let _ = (agent, operator, position, stack);
        Ok(())
    }

    /// Before interacting with an entity at a point.
    fn on_interact_entity_at(
        &mut self,
        operator: &OperatorProxy,
        entity: EntityId,
        location: Vec3,
    ) -> HookVerdict {
        let _ = (operator, entity, location);
        HookVerdict::NoOpinion
    }

    /// Before interacting with an entity as a whole.
    fn on_interact_entity(&mut self, operator: &OperatorProxy, entity: EntityId) -> HookVerdict {
        let _ = (operator, entity);
        HookVerdict::NoOpinion
    }

    /// Before right-clicking a block.
    fn on_right_click_block(&mut self, operator: &OperatorProxy, hit: &BlockHit) -> BlockUseVerdict {
        let _ = (operator, hit);
        BlockUseVerdict::Proceed
    }

    /// Before a plain right-click with the held item.
    fn on_item_right_click(&mut self, operator: &OperatorProxy) -> HookVerdict {
        let _ = operator;
        HookVerdict::NoOpinion
    }
}

/// Hooks that never intervene.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl InteractionHooks for NoHooks {}
