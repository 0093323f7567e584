//! End-to-end deployment scenarios against the reference world.
//!
//! Each test builds a small [`GridWorld`] around one agent standing at
//! `(0, 64, 0)` facing north and runs place commands through the public
//! API only.

#![allow(clippy::unwrap_used)]

use deploy_agents::{Agent, AgentInventory, DropSink, OperatorProxy, TURTLE_SLOTS};
use deploy_core::{
    DeployConfig, DeployError, Deployer, DeploymentOutcome, InteractDirection, PlaceCommand,
};
use deploy_types::{
    BlockEntityId, BlockHit, BlockKind, BlockPos, BlockUseVerdict, CommandResult, Direction,
    EntityHit, EntityId, HookVerdict, InteractionResult, ItemKind, ItemStack, SignText, Vec3,
};
use deploy_world::{
    EntityKind, GridWorld, InteractionHooks, ItemUse, NoHooks, SpawnProtection, World, WorldBounds,
};
use serde_json::Value;

const ORIGIN: BlockPos = BlockPos::new(0, 64, 0);
const FRONT: BlockPos = BlockPos::new(0, 64, -1);
const BEYOND: BlockPos = BlockPos::new(0, 64, -2);
const BELOW_FRONT: BlockPos = BlockPos::new(0, 63, -1);

fn world() -> GridWorld {
    GridWorld::new(WorldBounds::default(), 11)
}

/// An agent at the origin with its block present in the world.
fn turtle(world: &mut GridWorld, stack: ItemStack) -> Agent {
    world.set_block(ORIGIN, BlockKind::Turtle).unwrap();
    let mut agent = Agent::new(ORIGIN, Direction::North);
    agent.set_selected_item(stack).unwrap();
    agent
}

fn place(world: &mut GridWorld, agent: &mut Agent) -> CommandResult {
    place_with(world, agent, &mut NoHooks, Vec::new())
}

fn place_with(
    world: &mut GridWorld,
    agent: &mut Agent,
    hooks: &mut dyn InteractionHooks,
    args: Vec<Value>,
) -> CommandResult {
    let deployer = Deployer::unprotected(DeployConfig::default());
    PlaceCommand::new(InteractDirection::Forward)
        .with_args(args)
        .execute(&deployer, world, hooks, agent)
}

fn total_items(agent: &Agent, world: &GridWorld) -> u64 {
    let dropped: u64 = world
        .dropped_items()
        .iter()
        .map(|d| u64::from(d.stack.count))
        .sum();
    agent.inventory.total_count() + dropped
}

/// Records every block click and answers with a fixed verdict.
#[derive(Default)]
struct RecordingHooks {
    clicks: Vec<(BlockPos, Direction)>,
    block_verdict: BlockUseVerdict,
    entity_at_verdict: HookVerdict,
    entity_verdict: HookVerdict,
    item_verdict: HookVerdict,
    veto: Option<String>,
}

impl InteractionHooks for RecordingHooks {
    fn on_place(
        &mut self,
        _agent: &Agent,
        _operator: &OperatorProxy,
        _position: BlockPos,
        _stack: &ItemStack,
    ) -> Result<(), String> {
        self.veto.clone().map_or(Ok(()), Err)
    }

    fn on_interact_entity_at(&mut self, _operator: &OperatorProxy, _entity: EntityId, _location: Vec3) -> HookVerdict {
        self.entity_at_verdict
    }

    fn on_interact_entity(&mut self, _operator: &OperatorProxy, _entity: EntityId) -> HookVerdict {
        self.entity_verdict
    }

    fn on_right_click_block(&mut self, _operator: &OperatorProxy, hit: &BlockHit) -> BlockUseVerdict {
        self.clicks.push((hit.position, hit.side));
        self.block_verdict
    }

    fn on_item_right_click(&mut self, _operator: &OperatorProxy) -> HookVerdict {
        self.item_verdict
    }
}

fn deploy_with(
    world: &mut dyn World,
    agent: &mut Agent,
    hooks: &mut dyn InteractionHooks,
) -> Result<DeploymentOutcome, DeployError> {
    let stack = agent.selected_item().clone();
    Deployer::unprotected(DeployConfig::default()).deploy(world, hooks, &stack, agent, Direction::North, &[])
}

/// A [`GridWorld`] whose use-first step answers with a fixed result and
/// which counts use-on-block calls.
struct FirstUseWorld {
    inner: GridWorld,
    first_use: InteractionResult,
    block_uses: usize,
}

impl World for FirstUseWorld {
    fn is_in_bounds(&self, position: BlockPos) -> bool {
        self.inner.is_in_bounds(position)
    }

    fn block(&self, position: BlockPos) -> BlockKind {
        self.inner.block(position)
    }

    fn block_entity(&self, position: BlockPos) -> Option<BlockEntityId> {
        self.inner.block_entity(position)
    }

    fn sign_text_mut(&mut self, position: BlockPos) -> Option<&mut SignText> {
        self.inner.sign_text_mut(position)
    }

    fn mark_block_entity_changed(&mut self, position: BlockPos) {
        self.inner.mark_block_entity_changed(position);
    }

    fn send_block_updated(&mut self, position: BlockPos) {
        self.inner.send_block_updated(position);
    }

    fn raycast_entities(&self, origin: Vec3, direction: Vec3, range: f64) -> Option<EntityHit> {
        self.inner.raycast_entities(origin, direction, range)
    }

    fn is_living(&self, entity: EntityId) -> bool {
        self.inner.is_living(entity)
    }

    fn interact_entity_at(
        &mut self,
        entity: EntityId,
        operator: &mut OperatorProxy,
        location: Vec3,
        drops: &mut dyn DropSink,
    ) -> InteractionResult {
        self.inner.interact_entity_at(entity, operator, location, drops)
    }

    fn interact_entity(&mut self, entity: EntityId, operator: &mut OperatorProxy, drops: &mut dyn DropSink) -> InteractionResult {
        self.inner.interact_entity(entity, operator, drops)
    }

    fn use_item_on_living(
        &mut self,
        entity: EntityId,
        operator: &mut OperatorProxy,
        drops: &mut dyn DropSink,
    ) -> InteractionResult {
        self.inner.use_item_on_living(entity, operator, drops)
    }

    fn use_item_first(&mut self, _operator: &mut OperatorProxy, _hit: &BlockHit) -> InteractionResult {
        self.first_use
    }

    fn use_item_on_block(&mut self, operator: &mut OperatorProxy, hit: &BlockHit) -> InteractionResult {
        self.block_uses = self.block_uses.saturating_add(1);
        self.inner.use_item_on_block(operator, hit)
    }

    fn use_item(&mut self, operator: &mut OperatorProxy) -> ItemUse {
        self.inner.use_item(operator)
    }

    fn drop_item_stack(&mut self, stack: ItemStack, position: BlockPos, direction: Option<Direction>) {
        self.inner.drop_item_stack(stack, position, direction);
    }
}

// -------------------------------------------------------------------
// Placement
// -------------------------------------------------------------------

#[test]
fn block_lands_in_front_from_own_block() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::new(ItemKind::Stone, 10));

    assert_eq!(place(&mut world, &mut agent), CommandResult::success());
    assert_eq!(world.block(FRONT), BlockKind::Stone);
    assert_eq!(agent.selected_item(), &ItemStack::new(ItemKind::Stone, 9));
}

#[test]
fn block_lands_against_block_beyond() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Wool));
    world.set_block(BEYOND, BlockKind::Stone).unwrap();

    let mut hooks = RecordingHooks::default();
    assert_eq!(place_with(&mut world, &mut agent, &mut hooks, Vec::new()), CommandResult::success());
    assert_eq!(world.block(FRONT), BlockKind::Wool);
    assert_eq!(hooks.clicks, vec![(BEYOND, Direction::South)]);
    assert!(agent.selected_item().is_empty());
}

#[test]
fn trials_run_in_order() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Stick));
    for pos in [FRONT, BEYOND, BELOW_FRONT] {
        world.set_block(pos, BlockKind::Stone).unwrap();
    }

    let mut hooks = RecordingHooks::default();
    let result = place_with(&mut world, &mut agent, &mut hooks, Vec::new());
    assert_eq!(result, CommandResult::failure("Cannot place item here"));
    assert_eq!(
        hooks.clicks,
        vec![
            (FRONT, Direction::South),
            (BEYOND, Direction::South),
            (BELOW_FRONT, Direction::Up),
            (ORIGIN, Direction::North),
        ]
    );
}

#[test]
fn vertical_placement_skips_below_front() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Stick));
    world.set_block(BlockPos::new(0, 63, 0), BlockKind::Stone).unwrap();
    world.set_block(BlockPos::new(0, 62, 0), BlockKind::Stone).unwrap();

    let mut hooks = RecordingHooks::default();
    let deployer = Deployer::unprotected(DeployConfig::default());
    let result = PlaceCommand::new(InteractDirection::Down).execute(&deployer, &mut world, &mut hooks, &mut agent);
    assert!(!result.success);
    assert_eq!(
        hooks.clicks,
        vec![
            (BlockPos::new(0, 63, 0), Direction::Up),
            (BlockPos::new(0, 62, 0), Direction::Up),
            (ORIGIN, Direction::Down),
        ]
    );
}

// -------------------------------------------------------------------
// Entities
// -------------------------------------------------------------------

#[test]
fn entity_takes_precedence_over_block() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::new(ItemKind::Stone, 4));
    let stand = world
        .spawn_entity(
            EntityKind::ArmorStand {
                held: ItemStack::EMPTY,
            },
            Vec3::new(0.5, 64.0, -1.0),
        )
        .unwrap();

    assert_eq!(place(&mut world, &mut agent), CommandResult::success());
    assert_eq!(world.block(FRONT), BlockKind::Air);
    assert_eq!(
        world.entity(stand).unwrap().kind,
        EntityKind::ArmorStand {
            held: ItemStack::one(ItemKind::Stone)
        }
    );
    assert_eq!(agent.selected_item(), &ItemStack::new(ItemKind::Stone, 3));
}

#[test]
fn sheared_wool_goes_to_the_agent() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Shears));
    world
        .spawn_entity(EntityKind::Sheep { sheared: false }, Vec3::new(0.5, 64.0, -1.0))
        .unwrap();

    assert_eq!(place(&mut world, &mut agent), CommandResult::success());
    assert_eq!(agent.selected_item().damage, 1);
    let wool = agent
        .inventory
        .iter()
        .find(|s| s.item == ItemKind::Wool)
        .map_or(0, |s| s.count);
    assert!((1..=3).contains(&wool));
    assert!(world.dropped_items().is_empty());
}

#[test]
fn wool_that_does_not_fit_is_dropped_behind() {
    let mut world = world();
    let mut inventory = AgentInventory::new(TURTLE_SLOTS);
    inventory.set(0, ItemStack::one(ItemKind::Shears)).unwrap();
    for slot in 1..TURTLE_SLOTS {
        inventory.set(slot, ItemStack::new(ItemKind::Dirt, 64)).unwrap();
    }
    world.set_block(ORIGIN, BlockKind::Turtle).unwrap();
    let mut agent = Agent::new(ORIGIN, Direction::North).with_inventory(inventory);
    world
        .spawn_entity(EntityKind::Sheep { sheared: false }, Vec3::new(0.5, 64.0, -1.0))
        .unwrap();

    assert_eq!(place(&mut world, &mut agent), CommandResult::success());
    let drops = world.dropped_items();
    assert_eq!(drops.len(), 1);
    let drop = drops.first().unwrap();
    assert_eq!(drop.stack.item, ItemKind::Wool);
    assert!(drop.position.approx_eq(Vec3::new(0.5, 64.5, 0.9), 1e-9));
    assert!(drop.velocity.z > 0.5);
}

#[test]
fn name_tag_uses_living_fallback() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::new(ItemKind::NameTag, 2));
    let cow = world.spawn_entity(EntityKind::Cow, Vec3::new(0.5, 64.0, -1.0)).unwrap();

    assert_eq!(place(&mut world, &mut agent), CommandResult::success());
    assert!(world.entity(cow).unwrap().named);
    assert_eq!(agent.selected_item(), &ItemStack::one(ItemKind::NameTag));
}

#[test]
fn consumed_entity_hook_counts_as_placed() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::new(ItemKind::Stick, 3));
    world.spawn_entity(EntityKind::Cow, Vec3::new(0.5, 64.0, -1.0)).unwrap();

    let mut hooks = RecordingHooks {
        entity_at_verdict: HookVerdict::Consumed,
        ..RecordingHooks::default()
    };
    let stack = agent.selected_item().clone();
    let outcome = Deployer::unprotected(DeployConfig::default()).deploy(
        &mut world,
        &mut hooks,
        &stack,
        &mut agent,
        Direction::North,
        &[],
    );
    assert_eq!(
        outcome,
        Ok(DeploymentOutcome {
            remainder: ItemStack::new(ItemKind::Stick, 3),
            placed: true,
        })
    );
    assert!(hooks.clicks.is_empty());
}

#[test]
fn denied_entity_interaction_skips_living_fallback() {
    let mut world = world();
    let mut agent = Agent::new(ORIGIN, Direction::North);
    agent.set_selected_item(ItemStack::new(ItemKind::NameTag, 2)).unwrap();
    let cow = world.spawn_entity(EntityKind::Cow, Vec3::new(0.5, 64.0, -1.0)).unwrap();

    let mut hooks = RecordingHooks {
        entity_verdict: HookVerdict::Deny,
        ..RecordingHooks::default()
    };
    let outcome = deploy_with(&mut world, &mut agent, &mut hooks);
    assert_eq!(outcome, Err(DeployError::NoValidTarget { block_like: false }));
    assert!(!world.entity(cow).unwrap().named);
    assert_eq!(agent.selected_item(), &ItemStack::new(ItemKind::NameTag, 2));
}

#[test]
fn consumed_entity_interaction_counts_as_placed() {
    let mut world = world();
    let mut agent = Agent::new(ORIGIN, Direction::North);
    agent.set_selected_item(ItemStack::new(ItemKind::Stick, 3)).unwrap();
    world.spawn_entity(EntityKind::Cow, Vec3::new(0.5, 64.0, -1.0)).unwrap();

    let mut hooks = RecordingHooks {
        entity_verdict: HookVerdict::Consumed,
        ..RecordingHooks::default()
    };
    let outcome = deploy_with(&mut world, &mut agent, &mut hooks);
    assert_eq!(
        outcome,
        Ok(DeploymentOutcome {
            remainder: ItemStack::new(ItemKind::Stick, 3),
            placed: true,
        })
    );
}

#[test]
fn ignored_entity_leaves_world_randomness_alone() {
    let velocity_after = |with_cow: bool| {
        let mut world = world();
        let mut agent = Agent::new(ORIGIN, Direction::North);
        agent.set_selected_item(ItemStack::one(ItemKind::Stick)).unwrap();
        if with_cow {
            world.spawn_entity(EntityKind::Cow, Vec3::new(0.5, 64.0, -1.0)).unwrap();
        }
        assert!(!place(&mut world, &mut agent).success);
        world.drop_item_stack(ItemStack::one(ItemKind::Dirt), ORIGIN, None);
        world.take_dropped_items().pop().unwrap().velocity
    };
    assert_eq!(velocity_after(false), velocity_after(true));
}

// -------------------------------------------------------------------
// Item-use fallback and conservation
// -------------------------------------------------------------------

#[test]
fn bucket_scoops_water_in_front() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Bucket));
    world.set_block(FRONT, BlockKind::Water).unwrap();

    assert_eq!(place(&mut world, &mut agent), CommandResult::success());
    assert_eq!(world.block(FRONT), BlockKind::Air);
    assert_eq!(agent.selected_item(), &ItemStack::one(ItemKind::WaterBucket));
}

#[test]
fn stacked_buckets_conserve_items() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::new(ItemKind::Bucket, 3));
    world.set_block(FRONT, BlockKind::Lava).unwrap();
    let before = total_items(&agent, &world);

    assert_eq!(place(&mut world, &mut agent), CommandResult::success());
    assert_eq!(agent.selected_item(), &ItemStack::new(ItemKind::Bucket, 2));
    assert_eq!(agent.inventory.get(1).unwrap(), &ItemStack::one(ItemKind::LavaBucket));
    assert_eq!(total_items(&agent, &world), before);
}

#[test]
fn filled_bucket_overflows_behind_the_agent() {
    let mut world = world();
    let mut inventory = AgentInventory::new(2);
    inventory.set(0, ItemStack::new(ItemKind::Bucket, 2)).unwrap();
    inventory.set(1, ItemStack::new(ItemKind::Dirt, 64)).unwrap();
    world.set_block(ORIGIN, BlockKind::Turtle).unwrap();
    world.set_block(FRONT, BlockKind::Water).unwrap();
    let mut agent = Agent::new(ORIGIN, Direction::North).with_inventory(inventory);
    let before = total_items(&agent, &world);

    assert_eq!(place(&mut world, &mut agent), CommandResult::success());
    let dropped: Vec<_> = world.dropped_items().iter().map(|d| d.stack.clone()).collect();
    assert_eq!(dropped, vec![ItemStack::one(ItemKind::WaterBucket)]);
    assert_eq!(total_items(&agent, &world), before);
}

#[test]
fn boat_is_launched_onto_water() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Boat));
    world.set_block(FRONT, BlockKind::Water).unwrap();

    assert_eq!(place(&mut world, &mut agent), CommandResult::success());
    assert!(agent.selected_item().is_empty());
    assert!(world.entities().any(|e| e.kind == EntityKind::Boat));
}

#[test]
fn placed_block_consumes_exactly_one() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::new(ItemKind::Planks, 7));
    let before = total_items(&agent, &world);

    assert_eq!(place(&mut world, &mut agent), CommandResult::success());
    assert_eq!(total_items(&agent, &world), before.saturating_sub(1));
}

// -------------------------------------------------------------------
// Failures
// -------------------------------------------------------------------

#[test]
fn failed_deployment_changes_nothing() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::new(ItemKind::Stick, 5));
    world.set_block(FRONT, BlockKind::Stone).unwrap();
    let agent_before = agent.clone();
    let blocks_before = world.block_count();
    let updates_before = world.block_updates().len();

    let result = place(&mut world, &mut agent);
    assert_eq!(result, CommandResult::failure("Cannot place item here"));
    assert_eq!(agent, agent_before);
    assert_eq!(world.block_count(), blocks_before);
    assert_eq!(world.block_updates().len(), updates_before);
    assert!(world.dropped_items().is_empty());
}

#[test]
fn exhausted_block_item_reports_block_message() {
    let mut world = world();
    // No agent block: nothing at all to click.
    let mut agent = Agent::new(ORIGIN, Direction::North);
    agent.set_selected_item(ItemStack::one(ItemKind::Stone)).unwrap();

    assert_eq!(place(&mut world, &mut agent), CommandResult::failure("Cannot place block here"));
}

#[test]
fn empty_slot_reports_no_items() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::EMPTY);
    assert_eq!(place(&mut world, &mut agent), CommandResult::failure("No items to place"));
}

#[test]
fn liquid_accepts_items_but_not_blocks() {
    let mut world = world();
    world.set_block(FRONT, BlockKind::Water).unwrap();
    let mut agent = Agent::new(ORIGIN, Direction::North);
    agent.set_selected_item(ItemStack::one(ItemKind::Stone)).unwrap();
    let mut hooks = RecordingHooks::default();
    let result = place_with(&mut world, &mut agent, &mut hooks, Vec::new());
    assert_eq!(result, CommandResult::failure("Cannot place block here"));
    assert!(hooks.clicks.is_empty());

    agent.set_selected_item(ItemStack::one(ItemKind::GlassBottle)).unwrap();
    let mut hooks = RecordingHooks::default();
    let result = place_with(&mut world, &mut agent, &mut hooks, Vec::new());
    assert_eq!(result, CommandResult::success());
    assert_eq!(hooks.clicks, vec![(FRONT, Direction::South)]);
    assert_eq!(agent.selected_item(), &ItemStack::one(ItemKind::WaterBottle));
}

#[test]
fn pre_place_veto_is_reported_verbatim() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Stone));
    let mut hooks = RecordingHooks {
        veto: Some("Building is disabled".to_owned()),
        ..RecordingHooks::default()
    };

    let result = place_with(&mut world, &mut agent, &mut hooks, Vec::new());
    assert_eq!(result, CommandResult::failure("Building is disabled"));
    assert_eq!(world.block(FRONT), BlockKind::Air);
}

#[test]
fn denied_block_use_is_not_consuming() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Stone));
    let mut hooks = RecordingHooks {
        block_verdict: BlockUseVerdict::DenyItemUse,
        ..RecordingHooks::default()
    };

    let result = place_with(&mut world, &mut agent, &mut hooks, Vec::new());
    assert_eq!(result, CommandResult::failure("Cannot place block here"));
    assert_eq!(world.block(FRONT), BlockKind::Air);
    assert_eq!(agent.selected_item(), &ItemStack::one(ItemKind::Stone));
}

#[test]
fn cancelled_block_click_skips_both_interactions() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Stone));
    let mut hooks = RecordingHooks {
        block_verdict: BlockUseVerdict::Cancel,
        ..RecordingHooks::default()
    };

    let result = place_with(&mut world, &mut agent, &mut hooks, Vec::new());
    assert_eq!(result, CommandResult::failure("Cannot place block here"));
    assert_eq!(world.block(FRONT), BlockKind::Air);
    assert_eq!(hooks.clicks, vec![(ORIGIN, Direction::North)]);
}

#[test]
fn cancelled_block_click_still_tries_plain_use() {
    let mut world = world();
    world.set_block(FRONT, BlockKind::Water).unwrap();
    let mut agent = Agent::new(ORIGIN, Direction::North);
    agent.set_selected_item(ItemStack::one(ItemKind::Bucket)).unwrap();
    let mut hooks = RecordingHooks {
        block_verdict: BlockUseVerdict::Cancel,
        ..RecordingHooks::default()
    };

    let result = place_with(&mut world, &mut agent, &mut hooks, Vec::new());
    assert_eq!(result, CommandResult::success());
    assert_eq!(world.block(FRONT), BlockKind::Air);
    assert_eq!(agent.selected_item(), &ItemStack::one(ItemKind::WaterBucket));
}

#[test]
fn consuming_first_use_skips_use_on_block() {
    let mut inner = world();
    let mut agent = turtle(&mut inner, ItemStack::new(ItemKind::Stone, 2));
    let mut world = FirstUseWorld {
        inner,
        first_use: InteractionResult::Consume,
        block_uses: 0,
    };

    let outcome = deploy_with(&mut world, &mut agent, &mut NoHooks);
    assert_eq!(
        outcome,
        Ok(DeploymentOutcome {
            remainder: ItemStack::new(ItemKind::Stone, 2),
            placed: true,
        })
    );
    assert_eq!(world.block_uses, 0);
    assert_eq!(world.block(FRONT), BlockKind::Air);
}

#[test]
fn passing_first_use_falls_through_to_use_on_block() {
    let mut inner = world();
    let mut agent = turtle(&mut inner, ItemStack::new(ItemKind::Stone, 2));
    let mut world = FirstUseWorld {
        inner,
        first_use: InteractionResult::Pass,
        block_uses: 0,
    };

    let outcome = deploy_with(&mut world, &mut agent, &mut NoHooks);
    assert_eq!(outcome.map(|o| o.remainder), Ok(ItemStack::one(ItemKind::Stone)));
    assert_eq!(world.block_uses, 1);
    assert_eq!(world.block(FRONT), BlockKind::Stone);
}

#[test]
fn denied_item_click_stops_plain_use() {
    let mut world = world();
    world.set_block(FRONT, BlockKind::Water).unwrap();
    let mut agent = Agent::new(ORIGIN, Direction::North);
    agent.set_selected_item(ItemStack::one(ItemKind::Bucket)).unwrap();
    let mut hooks = RecordingHooks {
        item_verdict: HookVerdict::Deny,
        ..RecordingHooks::default()
    };

    let outcome = deploy_with(&mut world, &mut agent, &mut hooks);
    assert_eq!(outcome, Err(DeployError::NoValidTarget { block_like: false }));
    assert_eq!(world.block(FRONT), BlockKind::Water);
}

#[test]
fn consumed_item_click_counts_as_placed() {
    let mut world = world();
    world.set_block(FRONT, BlockKind::Stone).unwrap();
    let mut agent = Agent::new(ORIGIN, Direction::North);
    agent.set_selected_item(ItemStack::one(ItemKind::Bucket)).unwrap();
    let mut hooks = RecordingHooks {
        item_verdict: HookVerdict::Consumed,
        ..RecordingHooks::default()
    };

    let outcome = deploy_with(&mut world, &mut agent, &mut hooks);
    assert_eq!(
        outcome,
        Ok(DeploymentOutcome {
            remainder: ItemStack::one(ItemKind::Bucket),
            placed: true,
        })
    );
    assert_eq!(world.block(FRONT), BlockKind::Stone);
}

// -------------------------------------------------------------------
// Protection
// -------------------------------------------------------------------

fn protected_deployer(obey: bool) -> Deployer<SpawnProtection> {
    let config = DeployConfig {
        obey_block_protection: obey,
        ..DeployConfig::default()
    };
    Deployer::new(
        config,
        SpawnProtection {
            spawn: ORIGIN,
            radius: 8,
        },
    )
}

#[test]
fn protected_area_blocks_placement() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Stone));
    let deployer = protected_deployer(true);

    let result = PlaceCommand::new(InteractDirection::Forward).execute(&deployer, &mut world, &mut NoHooks, &mut agent);
    assert_eq!(result, CommandResult::failure("Cannot place in protected area"));
    assert_eq!(world.block(FRONT), BlockKind::Air);
    assert_eq!(agent.selected_item(), &ItemStack::one(ItemKind::Stone));
}

#[test]
fn protection_is_ignored_unless_obeyed() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Stone));
    let deployer = protected_deployer(false);

    let stack = agent.selected_item().clone();
    let outcome = deployer.deploy(&mut world, &mut NoHooks, &stack, &mut agent, Direction::North, &[]);
    assert!(outcome.is_ok());
    assert_eq!(world.block(FRONT), BlockKind::Stone);
}

#[test]
fn protection_error_is_not_overwritten_by_later_trials() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Stone));
    world.set_block(BEYOND, BlockKind::Stone).unwrap();
    let deployer = protected_deployer(true);

    let stack = agent.selected_item().clone();
    let outcome = deployer.deploy(&mut world, &mut NoHooks, &stack, &mut agent, Direction::North, &[]);
    assert_eq!(outcome, Err(DeployError::PermissionDenied));
}

// -------------------------------------------------------------------
// Signs
// -------------------------------------------------------------------

#[test]
fn sign_text_is_centred() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::new(ItemKind::Sign, 2));

    let result = place_with(&mut world, &mut agent, &mut NoHooks, vec![Value::from("A\nB")]);
    assert_eq!(result, CommandResult::success());
    let sign = world.sign(FRONT).unwrap();
    assert_eq!(sign.text.lines, ["", "A", "B", ""].map(String::from));
    assert!(sign.changed);
}

#[test]
fn sign_text_fills_from_the_top() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Sign));

    let text = "A\nB\nC\nD\nE";
    place_with(&mut world, &mut agent, &mut NoHooks, vec![Value::from(text)]);
    let sign = world.sign(FRONT).unwrap();
    assert_eq!(sign.text.lines, ["A", "B", "C", "D"].map(String::from));
}

#[test]
fn sign_text_is_truncated() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Sign));

    let text = "abcdefghijklmnopqrst";
    place_with(&mut world, &mut agent, &mut NoHooks, vec![Value::from(text)]);
    let sign = world.sign(FRONT).unwrap();
    assert_eq!(sign.text.line(1), Some("abcdefghijklmno"));
}

#[test]
fn non_string_arguments_leave_sign_blank() {
    let mut world = world();
    let mut agent = turtle(&mut world, ItemStack::one(ItemKind::Sign));

    let result = place_with(&mut world, &mut agent, &mut NoHooks, vec![Value::from(42)]);
    assert_eq!(result, CommandResult::success());
    let sign = world.sign(FRONT).unwrap();
    assert!(sign.text.lines.iter().all(String::is_empty));
    assert!(!sign.changed);
}
