//! The place command: deploy the selected item and write back the result.

use deploy_agents::Agent;
use deploy_types::{CommandResult, Direction};
use deploy_world::{InteractionHooks, PermissionGate, World};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DeployError;
use crate::resolver::{Deployer, initial_operator};

/// Direction of a command relative to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractDirection {
    /// The way the agent faces.
    Forward,
    /// Straight up.
    Up,
    /// Straight down.
    Down,
}

impl InteractDirection {
    /// The world direction for an agent facing `facing`.
    pub const fn to_world(self, facing: Direction) -> Direction {
        match self {
            Self::Forward => facing,
            Self::Up => Direction::Up,
            Self::Down => Direction::Down,
        }
    }
}

/// Place the item in the agent's selected slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCommand {
    /// Where to place.
    pub direction: InteractDirection,
    /// Auxiliary arguments from the caller; a leading string is sign text.
    #[serde(default)]
    pub args: Vec<Value>,
}

impl PlaceCommand {
    /// A command without auxiliary arguments.
    pub const fn new(direction: InteractDirection) -> Self {
        Self {
            direction,
            args: Vec::new(),
        }
    }

    /// Attach auxiliary arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Run the command.
    ///
    /// On success the selected slot holds what is left of its stack and the
    /// inventory is marked changed.
    pub fn execute<G: PermissionGate>(
        &self,
        deployer: &Deployer<G>,
        world: &mut dyn World,
        hooks: &mut dyn InteractionHooks,
        agent: &mut Agent,
    ) -> CommandResult {
        match self.run(deployer, world, hooks, agent) {
            Ok(()) => CommandResult::success(),
            Err(error) => CommandResult::failure(error.to_string()),
        }
    }

    fn run<G: PermissionGate>(
        &self,
        deployer: &Deployer<G>,
        world: &mut dyn World,
        hooks: &mut dyn InteractionHooks,
        agent: &mut Agent,
    ) -> Result<(), DeployError> {
        let stack = agent.selected_item().clone();
        if stack.is_empty() {
            return Err(DeployError::NoItem);
        }

        let direction = self.direction.to_world(agent.facing);
        let target = agent.position.relative(direction);
        let operator = initial_operator(agent, direction);
        hooks
            .on_place(agent, &operator, target, &stack)
            .map_err(|message| DeployError::Vetoed { message })?;

        let outcome = deployer.deploy(world, hooks, &stack, agent, direction, &self.args)?;
        if let Err(error) = agent.set_selected_item(outcome.remainder) {
            tracing::warn!(agent = %agent.id, %error, "selected slot vanished during deployment");
        }
        agent.inventory.mark_changed();
        Ok(())
    }
}
