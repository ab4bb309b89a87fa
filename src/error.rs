//! Error handling for level conversion and simulation
//!
//! Most anomalies in source levels are not errors at all (open polygon chains,
//! dangling sidedefs, zero-cell movers): they are logged and degrade coverage.
//! This type covers what remains: bad configuration, rejected host writes
//! during load, and out-of-range requests from the caller.

use crate::world::WorldError;
use std::error::Error as StdError;
use std::fmt;

/// Main error type for sector conversion
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    // Configuration Errors
    InvalidConfig {
        field: String,
        reason: String,
    },

    // Host World Errors
    World {
        operation: String,
        error: WorldError,
    },

    // Caller Errors
    SectorOutOfRange {
        index: usize,
        count: usize,
    },
    LinedefOutOfRange {
        index: usize,
        count: usize,
    },
    MoverNotFound {
        id: usize,
    },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::InvalidConfig { field, reason } => {
                write!(f, "Invalid configuration for {}: {}", field, reason)
            }
            ConversionError::World { operation, error } => {
                write!(f, "Host world rejected {}: {}", operation, error)
            }
            ConversionError::SectorOutOfRange { index, count } => write!(
                f,
                "Sector index out of range: {} >= {}",
                index, count
            ),
            ConversionError::LinedefOutOfRange { index, count } => write!(
                f,
                "Linedef index out of range: {} >= {}",
                index, count
            ),
            ConversionError::MoverNotFound { id } => write!(f, "Mover not found: {}", id),
        }
    }
}

impl StdError for ConversionError {}

/// Type alias for Results in conversion code
pub type ConversionResult<T> = Result<T, ConversionError>;

impl From<WorldError> for ConversionError {
    fn from(error: WorldError) -> Self {
        ConversionError::World {
            operation: "voxel write".to_string(),
            error,
        }
    }
}

// Helper functions for common error patterns

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_conversion<F>(self, f: F) -> ConversionResult<T>
    where
        F: FnOnce() -> ConversionError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_conversion<F>(self, f: F) -> ConversionResult<T>
    where
        F: FnOnce() -> ConversionError,
    {
        self.ok_or_else(f)
    }
}

/// Extension trait for naming the operation a host world error came from
pub trait ErrorContext<T> {
    fn context(self, operation: &str) -> ConversionResult<T>;
}

impl<T> ErrorContext<T> for Result<T, WorldError> {
    fn context(self, operation: &str) -> ConversionResult<T> {
        self.map_err(|error| ConversionError::World {
            operation: operation.to_string(),
            error,
        })
    }
}
