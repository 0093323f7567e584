//! Agent state, the operator proxy, and drop capture for item deployment.
//!
//! This crate holds the state that a deployment borrows from and hands back
//! to: the agent's slotted inventory, the short-lived proxy actor that
//! performs interactions on the agent's behalf, and the capture session that
//! redirects an entity's drops into the agent during an interaction.
//!
//! # Modules
//!
//! - [`agent`] -- The deploying [`Agent`] and its selected slot
//! - [`drops`] -- [`DropCapture`] sessions and the [`DropSink`] trait
//! - [`error`] -- Error types for agent operations ([`AgentError`])
//! - [`inventory`] -- Slotted [`AgentInventory`] with wrap-around merging
//! - [`operator`] -- The [`OperatorProxy`] and its pose

pub mod agent;
pub mod drops;
pub mod error;
pub mod inventory;
pub mod operator;

// Re-export primary types at crate root for convenience.
pub use agent::Agent;
pub use drops::{DropCapture, DropSink, NoCapture};
pub use error::AgentError;
pub use inventory::{AgentInventory, TURTLE_SLOTS};
pub use operator::{Collected, OperatorProxy, PROXY_POCKET_SLOTS, Pose, orientation};
