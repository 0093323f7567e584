//! Error types for the `deploy-world` crate.
//!
//! Only direct edits of the reference world (building scenarios) can fail.
//! Interaction responses report through [`InteractionResult`] instead.
//!
//! [`InteractionResult`]: deploy_types::InteractionResult

use deploy_types::{BlockPos, EntityId};

/// Errors that can occur while editing a [`GridWorld`](crate::GridWorld).
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The position lies outside the world's build limits.
    #[error("position {0} is outside the world")]
    OutOfBounds(BlockPos),

    /// No entity with the given id exists.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// The configured vertical bounds are empty or inverted.
    #[error("invalid world bounds: min_y {min_y} must be below max_y {max_y}")]
    InvalidBounds {
        /// Lowest buildable y.
        min_y: i32,
        /// One past the highest buildable y.
        max_y: i32,
    },
}
