//! Shared value types for operator item deployment.
//!
//! Everything here is plain data with no world access: positions and
//! directions, the item catalog and stacks, interaction verdicts, and the
//! small records exchanged with the command layer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for agents, entities, and block entities
//! - [`geometry`] -- [`BlockPos`], [`Vec3`], and [`Direction`]
//! - [`item`] -- [`ItemKind`] catalog with capability queries and [`ItemStack`]
//! - [`enums`] -- Block kinds and interaction verdicts
//! - [`structs`] -- Hit records, [`SignText`], and [`CommandResult`]

pub mod enums;
pub mod geometry;
pub mod ids;
pub mod item;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{BlockKind, BlockUseVerdict, HookVerdict, InteractionResult};
pub use geometry::{BlockPos, Direction, Vec3};
pub use ids::{AgentId, BlockEntityId, EntityId};
pub use item::{DEFAULT_MAX_STACK, ItemKind, ItemStack, SHEARS_MAX_DAMAGE};
pub use structs::{BlockHit, CommandResult, EntityHit, SIGN_LINES, SignText};
