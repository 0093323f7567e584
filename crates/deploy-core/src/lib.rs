//! Deployment resolution for agents placing or using items.
//!
//! An agent asked to place its selected item does not simply put a block in
//! front of itself. It tries an entity first, then several blocks, aiming a
//! short-lived operator proxy at each in turn, until one interaction changes
//! something. This crate owns that decision.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `deploy-config.yaml` into
//!   strongly-typed structs.
//! - [`context`] -- Hit points and proxy poses for clicking a block face.
//! - [`error`] -- [`DeployError`], carrying the exact failure message.
//! - [`place`] -- The [`PlaceCommand`] front door.
//! - [`resolver`] -- [`Deployer`] and the ordered trials.
//! - [`sign`] -- Laying out and writing sign text.
//!
//! [`DeployError`]: error::DeployError
//! [`PlaceCommand`]: place::PlaceCommand
//! [`Deployer`]: resolver::Deployer

pub mod config;
pub mod context;
pub mod error;
pub mod place;
pub mod resolver;
pub mod sign;

pub use config::{ConfigError, DeployConfig, LoggingConfig, ProtectionConfig, WorldConfig};
pub use context::InteractionContext;
pub use error::DeployError;
pub use place::{InteractDirection, PlaceCommand};
pub use resolver::{Deployer, DeploymentOutcome, DeploymentTarget, Unchanged, initial_operator};
pub use sign::{apply_sign_text, layout_sign_text};
