//! Scenario setup and execution.
//!
//! A scenario describes one agent, the blocks and entities around it, and
//! a list of place commands to run in order. It is read from the
//! `scenario` section of `deploy-config.yaml`; without one the built-in
//! [`Scenario::demo`] is used.

use deploy_agents::{Agent, AgentInventory, TURTLE_SLOTS};
use deploy_core::{Deployer, InteractDirection, PlaceCommand};
use deploy_types::{BlockKind, BlockPos, CommandResult, Direction, ItemKind, ItemStack, Vec3};
use deploy_world::{DroppedItem, EntityKind, GridWorld, NoHooks, PermissionGate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::EngineError;

/// A complete scenario.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    /// The deploying agent.
    #[serde(default)]
    pub agent: AgentSetup,

    /// Blocks placed before any command runs.
    #[serde(default)]
    pub blocks: Vec<BlockSetup>,

    /// Entities spawned before any command runs.
    #[serde(default)]
    pub entities: Vec<EntitySetup>,

    /// Commands to execute, in order.
    #[serde(default)]
    pub commands: Vec<ScenarioCommand>,
}

/// Where the agent stands and what it carries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentSetup {
    /// The agent's block.
    #[serde(default = "default_agent_position")]
    pub position: BlockPos,

    /// Which way the agent faces.
    #[serde(default = "default_facing")]
    pub facing: Direction,

    /// Initial slot contents.
    #[serde(default)]
    pub inventory: Vec<SlotSetup>,
}

impl Default for AgentSetup {
    fn default() -> Self {
        Self {
            position: default_agent_position(),
            facing: default_facing(),
            inventory: Vec::new(),
        }
    }
}

/// One inventory slot's initial contents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlotSetup {
    /// Slot index.
    pub slot: usize,
    /// What the slot holds.
    pub item: ItemKind,
    /// How many.
    pub count: u32,
}

/// A block present before the scenario starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BlockSetup {
    /// Where.
    pub position: BlockPos,
    /// What.
    pub block: BlockKind,
}

/// An entity present before the scenario starts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntitySetup {
    /// What kind of entity, with its state.
    pub entity: EntityKind,
    /// Feet position.
    pub position: Vec3,
}

/// A place command, optionally preceded by a slot selection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioCommand {
    /// Slot to select before placing; the current one when absent.
    #[serde(default)]
    pub slot: Option<usize>,

    /// The command itself.
    #[serde(flatten)]
    pub command: PlaceCommand,
}

/// What one command did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// Position in the command list.
    pub step: usize,
    /// The slot the command used.
    pub slot: usize,
    /// The command's result.
    pub result: CommandResult,
    /// The slot's contents afterwards.
    pub selected: ItemStack,
}

/// The outcome of a whole scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    /// One entry per command.
    pub steps: Vec<StepReport>,
    /// Non-air blocks in the world at the end.
    pub block_count: usize,
    /// Entities in the world at the end.
    pub entity_count: usize,
    /// Items lying on the ground at the end.
    pub dropped: Vec<DroppedItem>,
}

impl Scenario {
    /// The built-in scenario: an agent on a stone floor facing a pool of
    /// water with a sheep standing in it, carrying a few items to deploy.
    pub fn demo() -> Self {
        let mut blocks: Vec<BlockSetup> = (-3..=3)
            .flat_map(|x| (-3..=3).map(move |z| (x, z)))
            .map(|(x, z)| BlockSetup {
                position: BlockPos::new(x, 63, z),
                block: BlockKind::Stone,
            })
            .collect();
        blocks.push(BlockSetup {
            position: BlockPos::new(0, 64, -1),
            block: BlockKind::Water,
        });

        let slot = |slot, item, count| SlotSetup { slot, item, count };
        let command = |slot, direction| ScenarioCommand {
            slot: Some(slot),
            command: PlaceCommand::new(direction),
        };
        let sign = ScenarioCommand {
            slot: Some(3),
            command: PlaceCommand::new(InteractDirection::Forward)
                .with_args(vec![serde_json::Value::from("Welcome\nto the pond")]),
        };

        Self {
            agent: AgentSetup {
                inventory: vec![
                    slot(0, ItemKind::Shears, 1),
                    slot(1, ItemKind::Stone, 4),
                    slot(2, ItemKind::Bucket, 2),
                    slot(3, ItemKind::Sign, 2),
                ],
                ..AgentSetup::default()
            },
            blocks,
            entities: vec![EntitySetup {
                entity: EntityKind::Sheep { sheared: false },
                position: Vec3::new(0.5, 64.0, -0.5),
            }],
            commands: vec![
                command(0, InteractDirection::Forward),
                command(1, InteractDirection::Up),
                command(2, InteractDirection::Forward),
                sign,
            ],
        }
    }

    /// Put the scenario's blocks, entities, and agent into `world`.
    pub fn build(&self, world: &mut GridWorld) -> Result<Agent, EngineError> {
        for block in &self.blocks {
            world.set_block(block.position, block.block)?;
        }
        for entity in &self.entities {
            world.spawn_entity(entity.entity.clone(), entity.position)?;
        }

        let setup = &self.agent;
        let mut inventory = AgentInventory::new(TURTLE_SLOTS);
        for entry in &setup.inventory {
            inventory.set(entry.slot, ItemStack::new(entry.item, entry.count))?;
        }
        world.set_block(setup.position, BlockKind::Turtle)?;
        Ok(Agent::new(setup.position, setup.facing).with_inventory(inventory))
    }

    /// Run every command against `world` and report what happened.
    pub fn run<G: PermissionGate>(
        &self,
        deployer: &Deployer<G>,
        world: &mut GridWorld,
        agent: &mut Agent,
    ) -> Result<ScenarioReport, EngineError> {
        let mut steps = Vec::with_capacity(self.commands.len());
        for (step, entry) in self.commands.iter().enumerate() {
            if let Some(slot) = entry.slot {
                agent.select_slot(slot)?;
            }
            let result = entry.command.execute(deployer, world, &mut NoHooks, agent);
            info!(
                step,
                slot = agent.selected_slot(),
                direction = ?entry.command.direction,
                success = result.success,
                message = result.error_message.as_deref().unwrap_or(""),
                "command executed"
            );
            steps.push(StepReport {
                step,
                slot: agent.selected_slot(),
                result,
                selected: agent.selected_item().clone(),
            });
        }

        Ok(ScenarioReport {
            steps,
            block_count: world.block_count(),
            entity_count: world.entities().count(),
            dropped: world.dropped_items().to_vec(),
        })
    }
}

const fn default_agent_position() -> BlockPos {
    BlockPos::new(0, 64, 0)
}

const fn default_facing() -> Direction {
    Direction::North
}
