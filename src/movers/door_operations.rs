//! Door Operations - Pure DOP Functions
//!
//! A door's panel fills its sector's interior layers `[floor+1, ceiling-1]`:
//! the lower half in one material, the upper half in another. Opening clears
//! the panel, closing repaints it.

use super::door_data::{DoorData, DoorFacing, DoorState};
use super::mover_data::{Mover, MoverEvent};
use crate::convert::{cells_bounds, FloorCell, SectorHeights};
use crate::error::{ConversionResult, ErrorContext};
use crate::geometry::{column_voxel, MapTransform};
use crate::world::{clear_if_matches, write_voxel_logged, HostWorld, MaterialId, MaterialPalette, VoxelPos};
use rustc_hash::FxHashMap;
use std::ops::RangeInclusive;

/// Door settings taken from the line special that created it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorSettings {
    pub tag: u16,
    pub auto_close: bool,
    pub close_delay: u64,
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Facing of a door from its footprint
///
/// A footprint wider along X than along Z is a panel facing along Z.
pub fn door_facing(cells: &[FloorCell]) -> DoorFacing {
    match cells_bounds(cells) {
        Some(b) if b.max_dz - b.min_dz > b.max_dx - b.min_dx => DoorFacing::EastWest,
        _ => DoorFacing::NorthSouth,
    }
}

/// Doors facing along the same axis can swing together
pub fn facings_compatible(a: DoorFacing, b: DoorFacing) -> bool {
    a == b
}

/// Lower and upper halves of the panel between two layers
///
/// An odd panel gives the extra layer to the lower half.
pub fn panel_halves(floor_y: i32, ceiling_y: i32) -> (RangeInclusive<i32>, RangeInclusive<i32>) {
    let bottom = floor_y + 1;
    let top = ceiling_y - 1;
    let height = (top - bottom + 1).max(0);
    let split = bottom + (height + 1) / 2;
    (bottom..=split - 1, split..=top)
}

/// Every panel voxel with the material it holds when closed
pub fn panel_voxels(door: &DoorData, transform: &MapTransform) -> Vec<(VoxelPos, MaterialId)> {
    let (lower, upper) = panel_halves(door.floor_y, door.ceiling_y);
    let mut out = Vec::new();
    for cell in &door.cells {
        for y in lower.clone() {
            out.push((column_voxel(transform, cell.dx, y, cell.dz), door.lower_material));
        }
        for y in upper.clone() {
            out.push((column_voxel(transform, cell.dx, y, cell.dz), door.upper_material));
        }
    }
    out
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

/// Create a closed door over a rasterized sector and paint its panel
pub fn create_door(
    world: &mut dyn HostWorld,
    sector: usize,
    cells: Vec<FloorCell>,
    heights: &SectorHeights,
    palette: &MaterialPalette,
    transform: &MapTransform,
    settings: DoorSettings,
) -> ConversionResult<DoorData> {
    let door = DoorData {
        sector,
        tag: settings.tag,
        state: DoorState::Closed,
        facing: door_facing(&cells),
        cells,
        floor_y: heights.floor_y,
        ceiling_y: heights.ceiling_y,
        lower_material: palette.door_lower,
        upper_material: palette.door_upper,
        auto_close: settings.auto_close,
        close_delay: settings.close_delay,
        close_at: None,
    };

    for (pos, material) in panel_voxels(&door, transform) {
        world.set_voxel(pos, material).context("paint door panel")?;
    }

    log::debug!(
        "[MoverEngine::create_door] Sector {}: {} cells facing {:?}, auto-close {}",
        sector,
        door.cells.len(),
        door.facing,
        door.auto_close
    );
    Ok(door)
}

/// Map every door column to its mover index
pub fn register_door_columns(door_columns: &mut FxHashMap<FloorCell, usize>, door: &DoorData, index: usize) {
    for cell in &door.cells {
        if let Some(previous) = door_columns.insert(*cell, index) {
            log::warn!(
                "[MoverEngine::register_door_columns] Column {:?} claimed by movers {} and {}",
                cell,
                previous,
                index
            );
        }
    }
}

// ============================================================================
// STATE CHANGES
// ============================================================================

/// Whether every panel voxel is air
pub fn panel_is_clear(door: &DoorData, world: &dyn HostWorld, transform: &MapTransform) -> bool {
    panel_voxels(door, transform)
        .iter()
        .all(|(pos, _)| world.get_voxel(*pos).is_air())
}

fn open_door(door: &mut DoorData, world: &mut dyn HostWorld, transform: &MapTransform, now: u64) -> MoverEvent {
    for (pos, material) in panel_voxels(door, transform) {
        clear_if_matches(world, pos, material);
    }
    door.state = DoorState::Open;
    let delay = door.close_delay;
    door.close_at = door.auto_close.then(|| now + delay);
    MoverEvent::DoorOpened { sector: door.sector }
}

fn close_door(door: &mut DoorData, world: &mut dyn HostWorld, transform: &MapTransform) -> MoverEvent {
    for (pos, material) in panel_voxels(door, transform) {
        write_voxel_logged(world, pos, material);
    }
    door.state = DoorState::Closed;
    door.close_at = None;
    MoverEvent::DoorClosed { sector: door.sector }
}

/// Flip a door; both halves change together
pub fn toggle_door(door: &mut DoorData, world: &mut dyn HostWorld, transform: &MapTransform, now: u64) -> MoverEvent {
    match door.state {
        DoorState::Closed => open_door(door, world, transform, now),
        DoorState::Open => close_door(door, world, transform),
    }
}

/// Run a due auto-close re-check
///
/// The door closes only if it is still open and its doorway is still clear.
pub fn tick_door(
    door: &mut DoorData,
    world: &mut dyn HostWorld,
    transform: &MapTransform,
    now: u64,
) -> Option<MoverEvent> {
    let due = door.close_at?;
    if now < due {
        return None;
    }
    door.close_at = None;

    if door.state != DoorState::Open {
        return None;
    }
    if !panel_is_clear(door, world, transform) {
        log::debug!(
            "[MoverEngine::tick_door] Sector {}: doorway obstructed, staying open",
            door.sector
        );
        return Some(MoverEvent::DoorCloseSkipped { sector: door.sector });
    }
    Some(close_door(door, world, transform))
}

/// Drop any pending auto-close
pub fn cancel_auto_close(door: &mut DoorData) {
    door.close_at = None;
}

// ============================================================================
// LOCKSTEP
// ============================================================================

/// Doors that swing together with `movers[index]`
///
/// A partner occupies a column cardinally adjacent to one of the door's
/// columns, faces a compatible direction and is in the same state.
pub fn find_lockstep_partners(
    movers: &[Mover],
    door_columns: &FxHashMap<FloorCell, usize>,
    index: usize,
) -> Vec<usize> {
    let Some(Mover::Door(door)) = movers.get(index) else {
        return Vec::new();
    };

    let mut partners = Vec::new();
    for cell in &door.cells {
        for (ox, oz) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let neighbor = FloorCell {
                dx: cell.dx + ox,
                dz: cell.dz + oz,
            };
            let Some(&other_index) = door_columns.get(&neighbor) else {
                continue;
            };
            if other_index == index || partners.contains(&other_index) {
                continue;
            }
            if let Some(Mover::Door(other)) = movers.get(other_index) {
                if facings_compatible(door.facing, other.facing) && other.state == door.state {
                    partners.push(other_index);
                }
            }
        }
    }
    partners
}
