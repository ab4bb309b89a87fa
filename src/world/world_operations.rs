//! World Operations - Pure DOP Functions
//!
//! Functions over `MemoryWorld`: voxel access, entity bookkeeping and the
//! `HostWorld` implementation built on top of them.

use super::core::{ChunkPos, MaterialId, VoxelPos};
use super::data_types::{ChunkData, DamageRecord, MemoryEntity, MemoryWorld, VoxelModification, WorldStats};
use super::error::{WorldError, WorldResult};
use super::host::{DamageCause, EntityRef, HostWorld};
use crate::constants::core::{CHUNK_SIZE, DEFAULT_MAX_Y, DEFAULT_MIN_Y};
use crate::physics::aabb::aabb_contains_point;
use crate::physics::{EntityId, AABB};
use cgmath::Point3;
use rustc_hash::FxHashMap;

// ============================================================================
// CONSTRUCTION
// ============================================================================

/// Create an empty world with the default vertical bounds
pub fn create_memory_world() -> MemoryWorld {
    create_bounded_world(DEFAULT_MIN_Y, DEFAULT_MAX_Y)
}

/// Create an empty world accepting writes only for `min_y..=max_y`
pub fn create_bounded_world(min_y: i32, max_y: i32) -> MemoryWorld {
    MemoryWorld {
        chunks: FxHashMap::default(),
        chunk_size: CHUNK_SIZE,
        min_y,
        max_y,
        entities: Vec::new(),
        next_entity_id: 1,
        tick: 0,
    }
}

// ============================================================================
// VOXEL OPERATIONS
// ============================================================================

fn voxel_index(pos: VoxelPos, chunk_size: u32) -> usize {
    let (x, y, z) = pos.local_in_chunk(chunk_size);
    (x + y * chunk_size + z * chunk_size * chunk_size) as usize
}

/// Get voxel at position
///
/// # Returns
/// MaterialId at that position, or AIR if the chunk was never written
pub fn get_voxel(world: &MemoryWorld, pos: VoxelPos) -> MaterialId {
    let chunk_pos = pos.to_chunk_pos(world.chunk_size);
    world
        .chunks
        .get(&chunk_pos)
        .and_then(|chunk| chunk.voxels.get(voxel_index(pos, world.chunk_size)).copied())
        .unwrap_or(MaterialId::AIR)
}

/// Set voxel at position
///
/// # Returns
/// Ok(VoxelModification) if successful, InvalidPosition outside the vertical bounds
pub fn set_voxel(
    world: &mut MemoryWorld,
    pos: VoxelPos,
    material: MaterialId,
) -> WorldResult<VoxelModification> {
    if pos.y < world.min_y || pos.y > world.max_y {
        return Err(WorldError::InvalidPosition(pos));
    }

    let chunk_size = world.chunk_size;
    let chunk_pos = pos.to_chunk_pos(chunk_size);

    // Writing air into a missing chunk changes nothing
    if material.is_air() && !world.chunks.contains_key(&chunk_pos) {
        return Ok(VoxelModification {
            position: pos,
            old_material: MaterialId::AIR,
            new_material: MaterialId::AIR,
            timestamp: world.tick,
        });
    }

    let tick = world.tick;
    let chunk = world
        .chunks
        .entry(chunk_pos)
        .or_insert_with(|| create_chunk(chunk_pos, chunk_size));

    let index = voxel_index(pos, chunk_size);
    let old_material = chunk.voxels[index];
    chunk.voxels[index] = material;
    match (old_material.is_air(), material.is_air()) {
        (true, false) => chunk.non_air += 1,
        (false, true) => chunk.non_air -= 1,
        _ => {}
    }
    chunk.last_modified = tick;

    Ok(VoxelModification {
        position: pos,
        old_material,
        new_material: material,
        timestamp: tick,
    })
}

fn create_chunk(position: ChunkPos, chunk_size: u32) -> ChunkData {
    let total = (chunk_size * chunk_size * chunk_size) as usize;
    ChunkData {
        position,
        voxels: vec![MaterialId::AIR; total],
        non_air: 0,
        last_modified: 0,
    }
}

/// Materials of one column for layers `y_min..=y_max`, bottom first
pub fn column_materials(world: &MemoryWorld, x: i32, z: i32, y_min: i32, y_max: i32) -> Vec<MaterialId> {
    (y_min..=y_max)
        .map(|y| get_voxel(world, VoxelPos::new(x, y, z)))
        .collect()
}

/// Every position currently holding `material`
pub fn positions_of(world: &MemoryWorld, material: MaterialId) -> Vec<VoxelPos> {
    let size = world.chunk_size as i32;
    let mut out = Vec::new();
    for chunk in world.chunks.values() {
        if chunk.non_air == 0 && !material.is_air() {
            continue;
        }
        for (index, voxel) in chunk.voxels.iter().enumerate() {
            if *voxel != material {
                continue;
            }
            let i = index as i32;
            out.push(VoxelPos::new(
                chunk.position.x * size + i % size,
                chunk.position.y * size + (i / size) % size,
                chunk.position.z * size + i / (size * size),
            ));
        }
    }
    out.sort_by_key(|p| (p.y, p.z, p.x));
    out
}

/// Raw native-endian bytes of a chunk's voxels, for hosts that upload or
/// hash whole chunks
pub fn chunk_bytes(chunk: &ChunkData) -> &[u8] {
    bytemuck::cast_slice(&chunk.voxels)
}

/// Number of voxels holding `material` (non-air materials only)
pub fn count_material(world: &MemoryWorld, material: MaterialId) -> usize {
    positions_of(world, material).len()
}

// ============================================================================
// ENTITY OPERATIONS
// ============================================================================

/// Add an entity with its feet at `position`
pub fn spawn_entity(world: &mut MemoryWorld, position: Point3<f32>, height: f32) -> EntityId {
    let id = world.next_entity_id;
    world.next_entity_id += 1;
    world.entities.push(MemoryEntity {
        id,
        position,
        height,
        damage_log: Vec::new(),
    });
    id
}

/// Look up an entity
pub fn get_entity(world: &MemoryWorld, id: EntityId) -> Option<&MemoryEntity> {
    world.entities.iter().find(|e| e.id == id)
}

/// Total damage an entity has taken
pub fn total_damage(world: &MemoryWorld, id: EntityId) -> f32 {
    get_entity(world, id)
        .map(|e| e.damage_log.iter().map(|d| d.amount).sum())
        .unwrap_or(0.0)
}

// ============================================================================
// CLOCK
// ============================================================================

/// Advance the tick counter by one and return the new tick
pub fn advance_tick(world: &mut MemoryWorld) -> u64 {
    world.tick += 1;
    world.tick
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Collect world statistics
pub fn world_stats(world: &MemoryWorld) -> WorldStats {
    WorldStats {
        loaded_chunks: world.chunks.len(),
        non_air_voxels: world.chunks.values().map(|c| c.non_air as u64).sum(),
        entities: world.entities.len(),
        tick: world.tick,
    }
}

/// Log world statistics
pub fn log_world_stats(world: &MemoryWorld) {
    let stats = world_stats(world);
    log::info!("[MemoryWorld] Statistics:");
    log::info!("  Loaded chunks: {}", stats.loaded_chunks);
    log::info!("  Non-air voxels: {}", stats.non_air_voxels);
    log::info!("  Entities: {}", stats.entities);
    log::info!("  Tick: {}", stats.tick);
}

// ============================================================================
// HOST WORLD
// ============================================================================

impl HostWorld for MemoryWorld {
    fn set_voxel(&mut self, pos: VoxelPos, material: MaterialId) -> WorldResult<()> {
        set_voxel(self, pos, material).map(|_| ())
    }

    fn get_voxel(&self, pos: VoxelPos) -> MaterialId {
        get_voxel(self, pos)
    }

    fn entities_in_region(&self, region: &AABB) -> Vec<EntityRef> {
        self.entities
            .iter()
            .filter(|e| aabb_contains_point(region, e.position))
            .map(|e| EntityRef {
                id: e.id,
                position: e.position,
                height: e.height,
            })
            .collect()
    }

    fn set_entity_position(&mut self, id: EntityId, position: Point3<f32>) -> WorldResult<()> {
        let entity = self
            .entities
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(WorldError::UnknownEntity(id))?;
        entity.position = position;
        Ok(())
    }

    fn apply_damage(&mut self, id: EntityId, amount: f32, cause: DamageCause) -> WorldResult<()> {
        let tick = self.tick;
        let entity = self
            .entities
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(WorldError::UnknownEntity(id))?;
        entity.damage_log.push(DamageRecord { amount, cause, tick });
        Ok(())
    }

    fn current_tick(&self) -> u64 {
        self.tick
    }
}
