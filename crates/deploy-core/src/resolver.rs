//! Deployment resolution: deciding where an agent's item goes.
//!
//! [`Deployer::deploy`] tries a fixed sequence of targets and stops at the
//! first that changes anything:
//!
//! 1. the entity directly in front of the agent,
//! 2. the block in front, clicked on its near face (replaceable blocks are
//!    fair game here),
//! 3. the block beyond that, clicked on the same face,
//! 4. for horizontal directions, the top face of the block below the one
//!    in front,
//! 5. the agent's own block, clicked on the face pointing in `direction`.
//!
//! Every trial interacts through one [`OperatorProxy`] holding a copy of the
//! stack, so a trial that does nothing leaves the agent untouched. A trial
//! that does something hands back what the proxy ended up holding as the
//! new remainder; anything else it picked up goes into the agent's
//! inventory or, failing that, onto the ground behind the agent.

use deploy_agents::{Agent, DropCapture, DropSink, OperatorProxy};
use deploy_types::{
    BlockHit, BlockPos, BlockUseVerdict, Direction, EntityHit, EntityId, HookVerdict, InteractionResult,
    ItemStack, Vec3,
};
use deploy_world::{AllowAll, InteractionHooks, PermissionGate, World};
use serde_json::Value;

use crate::config::DeployConfig;
use crate::context::InteractionContext;
use crate::error::DeployError;
use crate::sign::apply_sign_text;

/// A candidate the deployer may interact with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeploymentTarget {
    /// An entity, hit at a point on its bounds.
    Entity {
        /// The entity.
        entity: EntityId,
        /// Where the ray entered it.
        hit: Vec3,
    },
    /// One face of a block.
    Block {
        /// The block.
        position: BlockPos,
        /// The face clicked.
        side: Direction,
        /// Whether a replaceable block may be clicked.
        allow_replace: bool,
    },
}

impl DeploymentTarget {
    /// A block face target.
    pub const fn block(position: BlockPos, side: Direction, allow_replace: bool) -> Self {
        Self::Block {
            position,
            side,
            allow_replace,
        }
    }
}

/// What a successful deployment did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentOutcome {
    /// What is left of the stack; [`ItemStack::EMPTY`] when all of it was
    /// used.
    pub remainder: ItemStack,
    /// Whether a placement or interaction was reported. A trial can also
    /// succeed without one, by changing the stack.
    pub placed: bool,
}

/// A trial had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unchanged;

type Trial = Result<DeploymentOutcome, Unchanged>;

/// Resolves deployments under one configuration and permission gate.
#[derive(Debug, Clone)]
pub struct Deployer<G = AllowAll> {
    config: DeployConfig,
    gate: G,
}

impl Deployer<AllowAll> {
    /// A deployer that never consults protection.
    pub const fn unprotected(config: DeployConfig) -> Self {
        Self {
            config,
            gate: AllowAll,
        }
    }
}

impl<G: PermissionGate> Deployer<G> {
    /// A deployer consulting `gate` whenever `config.obey_block_protection`
    /// is set.
    pub const fn new(config: DeployConfig, gate: G) -> Self {
        Self { config, gate }
    }

    /// The configuration in force.
    pub const fn config(&self) -> &DeployConfig {
        &self.config
    }

    /// Deploy `stack` from `agent` towards `direction`.
    ///
    /// `stack` is only read; the caller applies the returned remainder. The
    /// agent's inventory may still change, by receiving items an interaction
    /// produced. `args` are auxiliary command arguments; a leading string is
    /// written onto a placed sign.
    pub fn deploy(
        &self,
        world: &mut dyn World,
        hooks: &mut dyn InteractionHooks,
        stack: &ItemStack,
        agent: &mut Agent,
        direction: Direction,
        args: &[Value],
    ) -> Result<DeploymentOutcome, DeployError> {
        if stack.is_empty() {
            return Err(DeployError::NoItem);
        }

        let mut session = Session {
            config: &self.config,
            gate: &self.gate,
            world,
            hooks,
            operator: initial_operator(agent, direction),
            agent,
            stack,
            args,
            error: None,
        };

        let position = session.agent.position;
        let front = position.relative(direction);
        let back = direction.opposite();

        let outcome = session
            .entity_trial()
            .or_else(|Unchanged| session.attempt(DeploymentTarget::block(front, back, true)))
            .or_else(|Unchanged| {
                session.attempt(DeploymentTarget::block(position.offset(direction, 2), back, false))
            })
            .or_else(|Unchanged| {
                if direction.is_vertical() {
                    Err(Unchanged)
                } else {
                    session.attempt(DeploymentTarget::block(front.below(), Direction::Up, false))
                }
            })
            .or_else(|Unchanged| session.attempt(DeploymentTarget::block(position, direction, false)));

        match outcome {
            Ok(outcome) => {
                tracing::info!(
                    agent = %session.agent.id,
                    %direction,
                    placed = outcome.placed,
                    remainder = %outcome.remainder,
                    "item deployed"
                );
                Ok(outcome)
            }
            Err(Unchanged) => {
                let error = session.error.take().unwrap_or(DeployError::NoValidTarget {
                    block_like: stack.item.is_block_like(),
                });
                tracing::debug!(agent = %session.agent.id, %direction, %error, "nothing to deploy onto");
                Err(error)
            }
        }
    }
}

/// The proxy as it stands before any trial: in the block in front of the
/// agent, looking along `direction`.
pub fn initial_operator(agent: &Agent, direction: Direction) -> OperatorProxy {
    let mut operator = OperatorProxy::new(agent.id);
    operator.reorient(
        agent.position,
        agent.facing,
        agent.position.relative(direction),
        direction,
    );
    operator
}

/// State of one [`Deployer::deploy`] call.
struct Session<'a, G> {
    config: &'a DeployConfig,
    gate: &'a G,
    world: &'a mut dyn World,
    hooks: &'a mut dyn InteractionHooks,
    agent: &'a mut Agent,
    operator: OperatorProxy,
    stack: &'a ItemStack,
    args: &'a [Value],
    error: Option<DeployError>,
}

impl<G: PermissionGate> Session<'_, G> {
    fn entity_trial(&mut self) -> Trial {
        let origin = self.operator.eye_position();
        let look = self.operator.view_vector();
        match self.world.raycast_entities(origin, look, self.config.entity_reach) {
            Some(hit) => self.attempt(DeploymentTarget::Entity {
                entity: hit.entity,
                hit: hit.location,
            }),
            None => Err(Unchanged),
        }
    }

    fn attempt(&mut self, target: DeploymentTarget) -> Trial {
        tracing::debug!(?target, "trying target");
        match target {
            DeploymentTarget::Entity { entity, hit } => self.use_on_entity(EntityHit {
                entity,
                location: hit,
            }),
            DeploymentTarget::Block {
                position,
                side,
                allow_replace,
            } => self.block_trial(position, side, allow_replace),
        }
    }

    fn use_on_entity(&mut self, hit: EntityHit) -> Trial {
        self.operator.load_held_item(self.stack.clone());
        let slot = self.agent.selected_slot();
        let (placed, leftovers) = {
            let inventory = &mut self.agent.inventory;
            let mut capture = DropCapture::new();
            capture.begin(hit.entity, |drop| inventory.store_items_around(drop, slot));
            let placed = interact_with_entity(
                &mut *self.world,
                &mut *self.hooks,
                &mut self.operator,
                hit,
                &mut capture,
            );
            (placed, capture.end())
        };

        let behind = Some(self.agent.facing.opposite());
        for stack in leftovers {
            self.world.drop_item_stack(stack, self.agent.position, behind);
        }
        self.reconcile(placed)
    }

    fn block_trial(&mut self, position: BlockPos, side: Direction, allow_replace: bool) -> Trial {
        let context = InteractionContext::for_block(self.agent.facing, position, side);
        self.operator
            .reorient(self.agent.position, self.agent.facing, context.stand, context.facing);
        let hit = context.block_hit();
        if !self.can_deploy_on_block(&hit, allow_replace) {
            return Err(Unchanged);
        }

        self.operator.load_held_item(self.stack.clone());
        let existing = self.world.block_entity(position);
        let placed = self.use_on_block(&hit);

        if placed
            && self.stack.item.is_sign_like()
            && let Some(Value::String(text)) = self.args.first()
        {
            apply_sign_text(&mut *self.world, position, side, existing, text);
        }

        self.reconcile(placed)
    }

    fn can_deploy_on_block(&mut self, hit: &BlockHit, allow_replace: bool) -> bool {
        let position = hit.position;
        if !self.world.is_in_bounds(position)
            || self.world.is_empty_block(position)
            || (self.stack.item.is_block_like() && self.world.is_liquid(position))
        {
            return false;
        }

        let replaceable = self.world.can_be_replaced(position, self.stack, hit);
        if !allow_replace && replaceable {
            return false;
        }

        if self.config.obey_block_protection {
            let editable = if replaceable {
                position
            } else {
                position.relative(hit.side)
            };
            if !self.gate.is_editable(&*self.world, editable, &self.operator) {
                tracing::debug!(%editable, "block is protected");
                self.error = Some(DeployError::PermissionDenied);
                return false;
            }
        }
        true
    }

    fn use_on_block(&mut self, hit: &BlockHit) -> bool {
        let verdict = self.hooks.on_right_click_block(&self.operator, hit);

        let mut placed = false;
        if verdict != BlockUseVerdict::Cancel {
            let first = self.world.use_item_first(&mut self.operator, hit);
            if first.consumes_action() {
                placed = true;
            } else if verdict != BlockUseVerdict::DenyItemUse {
                placed = self.world.use_item_on_block(&mut self.operator, hit).consumes_action();
            }
        }

        if !placed && self.stack.item.supports_use_fallback() {
            placed = self.use_item();
        }
        placed
    }

    /// Plain right-click with the held item, accepted only when it did
    /// something and changed the stack.
    fn use_item(&mut self) -> bool {
        match self.hooks.on_item_right_click(&self.operator) {
            HookVerdict::Consumed => true,
            HookVerdict::Deny => false,
            HookVerdict::NoOpinion => {
                let used = self.world.use_item(&mut self.operator);
                if used.result.consumes_action() && &used.stack != self.operator.held_item() {
                    self.operator.load_held_item(used.stack);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Drain the proxy back into the agent and classify the trial.
    fn reconcile(&mut self, placed: bool) -> Trial {
        let slot = self.agent.selected_slot();
        let collected = self.operator.collect_and_return(&mut self.agent.inventory, slot);
        let behind = Some(self.agent.facing.opposite());
        for stack in collected.overflow {
            self.world.drop_item_stack(stack, self.agent.position, behind);
        }

        if !placed && collected.held == *self.stack {
            return Err(Unchanged);
        }
        let remainder = if collected.held.is_empty() {
            ItemStack::EMPTY
        } else {
            collected.held
        };
        Ok(DeploymentOutcome { remainder, placed })
    }
}

/// Interact with the entity under `hit`, trying a positioned interaction, a
/// whole-entity interaction, and the held item's own effect on living
/// creatures, in that order. A hook veto on the whole-entity interaction
/// also rules out the living-creature fallback.
fn interact_with_entity(
    world: &mut dyn World,
    hooks: &mut dyn InteractionHooks,
    operator: &mut OperatorProxy,
    hit: EntityHit,
    drops: &mut dyn DropSink,
) -> bool {
    let entity = hit.entity;

    let at = match hooks.on_interact_entity_at(operator, entity, hit.location) {
        HookVerdict::NoOpinion => world.interact_entity_at(entity, operator, hit.location, drops),
        HookVerdict::Deny => InteractionResult::Fail,
        HookVerdict::Consumed => InteractionResult::Success,
    };
    if at.consumes_action() {
        return true;
    }

    match hooks.on_interact_entity(operator, entity) {
        HookVerdict::Consumed => true,
        HookVerdict::Deny => false,
        HookVerdict::NoOpinion => {
            world.interact_entity(entity, operator, drops) == InteractionResult::Consume
                || (world.is_living(entity)
                    && world.use_item_on_living(entity, operator, drops).consumes_action())
        }
    }
}
