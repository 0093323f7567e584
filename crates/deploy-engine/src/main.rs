//! Scenario runner for operator item deployment.
//!
//! This is the main entry point that wires together configuration, the
//! reference world, and the place command. It builds one scenario, runs
//! its commands in order, and prints a JSON report of what happened.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `deploy-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Load the scenario (the `scenario` section, or the built-in demo)
//! 4. Create the reference world and place the agent
//! 5. Run the commands
//! 6. Print the report

mod error;
mod scenario;

use std::path::Path;

use deploy_core::{DeployConfig, Deployer, LoggingConfig};
use deploy_world::GridWorld;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::scenario::Scenario;

const CONFIG_FILE: &str = "deploy-config.yaml";

/// Application entry point for the scenario runner.
///
/// # Errors
///
/// Returns an error if configuration, the scenario, or the world cannot
/// be set up. Failed commands are reported, not raised.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(
        obey_block_protection = config.obey_block_protection,
        entity_reach = config.entity_reach,
        seed = config.world.seed,
        "deploy-engine starting"
    );

    // 3. Load the scenario.
    let scenario = load_scenario()?;
    info!(
        blocks = scenario.blocks.len(),
        entities = scenario.entities.len(),
        commands = scenario.commands.len(),
        "Scenario loaded"
    );

    // 4. Create the reference world.
    let bounds = config.world.bounds.validate()?;
    let mut world = GridWorld::new(bounds, config.world.seed);
    let mut agent = scenario.build(&mut world)?;
    info!(agent = %agent.id, position = %agent.position, facing = %agent.facing, "Agent placed");

    // 5. Run the commands.
    let deployer = Deployer::new(config.clone(), config.protection);
    let report = scenario.run(&deployer, &mut world, &mut agent)?;

    // 6. Print the report.
    let succeeded = report.steps.iter().filter(|s| s.result.success).count();
    info!(
        succeeded,
        failed = report.steps.len().saturating_sub(succeeded),
        dropped = report.dropped.len(),
        "deploy-engine finished"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured
/// level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Load the deployment configuration from `deploy-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<DeployConfig, EngineError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        Ok(DeployConfig::from_file(config_path)?)
    } else {
        Ok(DeployConfig::default())
    }
}

/// Load the scenario from `deploy-config.yaml`.
///
/// Reads the `scenario` section from the YAML config file. If the file
/// does not exist or lacks the `scenario` key, the built-in demo is used.
fn load_scenario() -> Result<Scenario, EngineError> {
    let config_path = Path::new(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(Scenario::demo());
    }

    let contents = std::fs::read_to_string(config_path).map_err(|e| EngineError::Scenario {
        message: format!("failed to read config file: {e}"),
    })?;

    // Parse the full YAML and extract just the "scenario" section.
    let raw: serde_yml::Value =
        serde_yml::from_str(&contents).map_err(|e| EngineError::Scenario {
            message: format!("failed to parse config YAML: {e}"),
        })?;

    raw.get("scenario").map_or_else(
        || Ok(Scenario::demo()),
        |section| {
            serde_yml::from_value(section.clone()).map_err(|e| EngineError::Scenario {
                message: format!("failed to parse scenario: {e}"),
            })
        },
    )
}
