//! Host World Interface
//!
//! The voxel grid, the entity set and the tick clock belong to the host. The
//! converter and the movers only ever touch them through this trait, which
//! keeps the simulation testable against `MemoryWorld`.

use super::core::{MaterialId, VoxelPos};
use super::error::WorldResult;
use crate::physics::{EntityId, AABB};
use cgmath::Point3;

/// Snapshot of an entity returned by region queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityRef {
    pub id: EntityId,
    /// Feet position in absolute voxel space
    pub position: Point3<f32>,
    /// Height in layers
    pub height: f32,
}

/// Why damage was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DamageCause {
    /// Pushed into a ceiling by a rising lift
    Crush,
}

/// Narrow interface onto the host's world
pub trait HostWorld {
    /// Write a single voxel
    fn set_voxel(&mut self, pos: VoxelPos, material: MaterialId) -> WorldResult<()>;

    /// Read a single voxel (AIR when unknown)
    fn get_voxel(&self, pos: VoxelPos) -> MaterialId;

    /// Broad-phase occupant query
    fn entities_in_region(&self, region: &AABB) -> Vec<EntityRef>;

    /// Move an entity's feet to `position`
    fn set_entity_position(&mut self, id: EntityId, position: Point3<f32>) -> WorldResult<()>;

    /// Apply damage to an entity
    fn apply_damage(&mut self, id: EntityId, amount: f32, cause: DamageCause) -> WorldResult<()>;

    /// Monotonic tick counter
    fn current_tick(&self) -> u64;
}

/// Write a voxel during simulation, logging instead of failing
///
/// Mover ticks are atomic from the caller's view, so a rejected write is
/// reported and skipped. Returns whether the write succeeded.
pub fn write_voxel_logged(world: &mut dyn HostWorld, pos: VoxelPos, material: MaterialId) -> bool {
    match world.set_voxel(pos, material) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("[HostWorld::set_voxel] Write of {} at {:?} rejected: {}", material, pos, e);
            false
        }
    }
}

/// Clear a voxel to AIR only if it still holds `expected`
///
/// Host edits made after load are left alone. Returns whether the voxel was
/// cleared.
pub fn clear_if_matches(world: &mut dyn HostWorld, pos: VoxelPos, expected: MaterialId) -> bool {
    let current = world.get_voxel(pos);
    if current != expected {
        if !current.is_air() {
            log::debug!(
                "[HostWorld::clear_if_matches] Skipping {:?}: expected {}, found {}",
                pos,
                expected,
                current
            );
        }
        return false;
    }
    write_voxel_logged(world, pos, MaterialId::AIR)
}
