//! World Data Types - Pure DOP Structures
//!
//! These are the data structures that world_operations functions operate on.
//! NO METHODS - just pure data.
//!
//! `MemoryWorld` is a sparse, chunked, in-memory host world. Hosts with their
//! own storage implement `HostWorld` directly; this one backs the tests and
//! offline conversions.

use super::core::{ChunkPos, MaterialId, VoxelPos};
use super::host::DamageCause;
use crate::physics::EntityId;
use cgmath::Point3;
use rustc_hash::FxHashMap;

/// In-memory world data
#[derive(Clone, Debug)]
pub struct MemoryWorld {
    /// Allocated chunks (chunks are created on first non-air write)
    pub chunks: FxHashMap<ChunkPos, ChunkData>,

    /// Chunk edge length
    pub chunk_size: u32,

    /// Inclusive vertical bounds; writes outside are rejected
    pub min_y: i32,
    pub max_y: i32,

    /// Entities living in this world
    pub entities: Vec<MemoryEntity>,

    /// Next entity id handed out
    pub next_entity_id: EntityId,

    /// World tick counter
    pub tick: u64,
}

/// Single chunk's data (flat array: size^3 voxels)
#[derive(Clone, Debug)]
pub struct ChunkData {
    /// Chunk position in chunk coordinates
    pub position: ChunkPos,

    /// Material IDs
    pub voxels: Vec<MaterialId>,

    /// Number of non-air voxels
    pub non_air: u32,

    /// Last modified tick
    pub last_modified: u64,
}

/// Entity stored by the in-memory world
#[derive(Clone, Debug)]
pub struct MemoryEntity {
    pub id: EntityId,
    /// Feet position in absolute voxel space
    pub position: Point3<f32>,
    /// Height in layers
    pub height: f32,
    /// Every damage application, in order
    pub damage_log: Vec<DamageRecord>,
}

/// One damage application
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRecord {
    pub amount: f32,
    pub cause: DamageCause,
    pub tick: u64,
}

/// Voxel change record
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelModification {
    pub position: VoxelPos,
    pub old_material: MaterialId,
    pub new_material: MaterialId,
    pub timestamp: u64,
}

/// World statistics
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldStats {
    pub loaded_chunks: usize,
    pub non_air_voxels: u64,
    pub entities: usize,
    pub tick: u64,
}
