//! The world side of item deployment.
//!
//! This crate defines what deployment needs from its surroundings and ships
//! one implementation of it. The deployer only queries blocks and asks for
//! interaction responses, with hooks and permission gates able to step in;
//! it never simulates anything itself.
//!
//! # Modules
//!
//! - [`collaborator`] -- The [`World`] and [`InteractionHooks`] traits
//! - [`entity`] -- Entities of the reference world and their bounds
//! - [`error`] -- Error types for world edits ([`WorldError`])
//! - [`gate`] -- [`PermissionGate`] and the provided protection policies
//! - [`grid`] -- [`GridWorld`], a sparse in-memory voxel world
//! - [`response`] -- How [`GridWorld`] answers interactions

pub mod collaborator;
pub mod entity;
pub mod error;
pub mod gate;
pub mod grid;
pub mod response;

// Re-export primary types at crate root for convenience.
pub use collaborator::{InteractionHooks, ItemUse, NoHooks, World};
pub use entity::{Entity, EntityKind};
pub use error::WorldError;
pub use gate::{AllowAll, PermissionGate, ProtectedRegions, Region, SpawnProtection};
pub use grid::{DroppedItem, GridWorld, HORIZONTAL_LIMIT, SignEntity, WorldBounds};
pub use response::ITEM_REACH;
