//! Error types for the scenario runner binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes while loading configuration and building a scenario.

/// Top-level error for the scenario runner.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: deploy_core::ConfigError,
    },

    /// Building the reference world failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: deploy_world::WorldError,
    },

    /// Setting up the agent failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: deploy_agents::AgentError,
    },

    /// The scenario section could not be read.
    #[error("scenario error: {message}")]
    Scenario {
        /// Description of the scenario failure.
        message: String,
    },
}
