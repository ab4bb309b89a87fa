/// World Error Handling
///
/// Errors returned by HostWorld mutations.
use super::core::VoxelPos;
use crate::physics::EntityId;

/// Result type for host world operations
pub type WorldResult<T> = Result<T, WorldError>;

// WorldError for HostWorld operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    #[error("Invalid position: {0:?}")]
    InvalidPosition(VoxelPos),

    #[error("Unknown entity: {0}")]
    UnknownEntity(EntityId),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}
