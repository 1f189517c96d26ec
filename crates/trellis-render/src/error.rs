//! Error types for the render crate.

use thiserror::Error;

use crate::scene::PrimitiveId;

/// Errors that can occur while building a scene.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The referenced primitive does not exist (never created, or removed).
    #[error("unknown primitive {0:?}")]
    UnknownPrimitive(PrimitiveId),

    /// A primitive was created under a parent that cannot hold children.
    #[error("primitive {0:?} is not a group and cannot have children")]
    NotAGroup(PrimitiveId),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
