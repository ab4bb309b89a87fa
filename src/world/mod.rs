//! World Module
//!
//! Everything on the host side of the conversion boundary.
//!
//! # Architecture Overview
//!
//! - **Core**: Fundamental data types (MaterialId, VoxelPos, MaterialPalette)
//! - **Host**: The `HostWorld` trait every voxel mutation goes through
//! - **Data types / operations**: `MemoryWorld`, an in-memory host used by
//!   tests and offline conversion
//!
//! # Design Principles
//!
//! 1. The core never owns the grid: it receives `&mut dyn HostWorld`
//! 2. DOP architecture: data structs plus free functions
//! 3. Material identity is re-checked before any clear

pub mod core;
pub mod data_types;
pub mod error;
pub mod host;
pub mod world_operations;

// Re-export core types for convenience
pub use core::{ChunkPos, MaterialId, MaterialPalette, VoxelPos};

pub use data_types::{MemoryEntity, MemoryWorld, VoxelModification, WorldStats};
pub use error::{WorldError, WorldResult};
pub use host::{clear_if_matches, write_voxel_logged, DamageCause, EntityRef, HostWorld};

// Re-export DOP world operations
pub use world_operations::{
    advance_tick, chunk_bytes, column_materials, count_material, create_bounded_world, create_memory_world,
    get_entity, log_world_stats, positions_of, spawn_entity, total_damage, world_stats,
};
