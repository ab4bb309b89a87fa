//! Lift Operations - Pure DOP Functions
//!
//! A lift lowers its platform from `top_y` to `bottom_y` one layer at a time,
//! waits, then rises back. Every layer step runs in a fixed order: carry
//! occupants (read against the pre-move floor), move the platform, clear
//! stray platform material above it, reseal the boundary seams.

use super::lift_data::{LiftData, LiftState};
use super::mover_data::{MoverEvent, SpeedClass};
use super::mover_operations::ticks_per_layer;
use crate::config::{ConversionConfig, MoverConfig};
use crate::convert::{cells_bounds, BoundaryColumn, FloorCell, SectorHeights};
use crate::geometry::{column_voxel, point_inside, voxel_space_to_map, MapTransform, SectorPolygon};
use crate::physics::aabb::aabb_from_columns;
use crate::world::{clear_if_matches, write_voxel_logged, DamageCause, HostWorld, MaterialId, VoxelPos};
use cgmath::Point3;
use rustc_hash::FxHashSet;
use std::ops::RangeInclusive;

/// Lift settings taken from the line special that created it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiftSettings {
    pub tag: u16,
    pub speed: SpeedClass,
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

/// Create an idle lift resting at its sector's floor
///
/// Boundary columns lying on the lift's own cells become platform-edge
/// columns. A lift without cells is kept but can never leave Idle.
#[allow(clippy::too_many_arguments)]
pub fn create_lift(
    sector: usize,
    cells: Vec<FloorCell>,
    polygon: SectorPolygon,
    heights: &SectorHeights,
    bottom_y: i32,
    floor_material: MaterialId,
    boundary: Vec<BoundaryColumn>,
    settings: LiftSettings,
) -> LiftData {
    let own: FxHashSet<FloorCell> = cells.iter().copied().collect();
    let (platform_edge, boundary): (Vec<BoundaryColumn>, Vec<BoundaryColumn>) = boundary
        .into_iter()
        .partition(|c| own.contains(&FloorCell { dx: c.dx, dz: c.dz }));

    if cells.is_empty() {
        log::warn!(
            "[MoverEngine::create_lift] Sector {} rasterized no cells; lift stays idle",
            sector
        );
    }
    log::debug!(
        "[MoverEngine::create_lift] Sector {}: {} cells, layers {}..{}, {} boundary and {} platform-edge columns",
        sector,
        cells.len(),
        bottom_y,
        heights.floor_y,
        boundary.len(),
        platform_edge.len()
    );

    LiftData {
        sector,
        tag: settings.tag,
        state: LiftState::Idle,
        speed: settings.speed,
        cells,
        boundary,
        platform_edge,
        polygon,
        top_y: heights.floor_y,
        bottom_y: bottom_y.min(heights.floor_y),
        current_y: heights.floor_y,
        ceiling_y: heights.ceiling_y,
        floor_material,
        last_step: 0,
        wait_until: 0,
    }
}

/// Replace the extruder's trimmed step faces with the lift's seam
///
/// Afterwards every boundary column holds only `wall_material` inside its
/// seam range, which is what later repaints expect to clear. Platform-edge
/// columns get their platform voxel back where the extruder painted over it.
pub fn seal_lift_boundary(
    lift: &LiftData,
    world: &mut dyn HostWorld,
    transform: &MapTransform,
    trims: &[MaterialId],
) {
    for column in &lift.boundary {
        for y in travel_range(lift, column) {
            clear_trim(world, column_voxel(transform, column.dx, y, column.dz), trims);
        }
    }
    for column in &lift.platform_edge {
        for y in travel_range(lift, column).filter(|&y| y != lift.current_y) {
            clear_trim(world, column_voxel(transform, column.dx, y, column.dz), trims);
        }
        let platform = column_voxel(transform, column.dx, lift.current_y, column.dz);
        if world.get_voxel(platform) != lift.floor_material {
            write_voxel_logged(world, platform, lift.floor_material);
        }
    }
    repaint_boundary(lift, world, transform);
}

fn clear_trim(world: &mut dyn HostWorld, pos: VoxelPos, trims: &[MaterialId]) {
    if trims.contains(&world.get_voxel(pos)) {
        write_voxel_logged(world, pos, MaterialId::AIR);
    }
}

// ============================================================================
// SEAMS
// ============================================================================

/// Seam layers between a platform at `current_y` and a neighbor floor
///
/// Always includes the neighbor's floor layer so the neighbor's edge stays
/// sealed when the platform drops below it or sits level with it.
pub fn seam_layers(current_y: i32, neighbor_floor_y: i32) -> RangeInclusive<i32> {
    current_y.min(neighbor_floor_y)..=(current_y - 1).max(neighbor_floor_y)
}

/// Seam layers on a column the platform itself occupies
///
/// The step face below the platform down to the neighbor floor; empty once
/// the platform is level with or below the neighbor.
pub fn platform_edge_seam_layers(current_y: i32, neighbor_floor_y: i32) -> RangeInclusive<i32> {
    current_y.min(neighbor_floor_y)..=current_y - 1
}

/// Every layer a column's seam can occupy over the lift's travel
fn travel_range(lift: &LiftData, column: &BoundaryColumn) -> RangeInclusive<i32> {
    let nb = column.neighbor_floor_y;
    lift.bottom_y.min(nb)..=(lift.top_y - 1).max(nb)
}

/// Clear each boundary column's travel range and repaint the current seam
///
/// The platform layer of a platform-edge column is never touched.
pub fn repaint_boundary(lift: &LiftData, world: &mut dyn HostWorld, transform: &MapTransform) {
    for column in &lift.boundary {
        for y in travel_range(lift, column) {
            clear_if_matches(world, column_voxel(transform, column.dx, y, column.dz), column.wall_material);
        }
        for y in seam_layers(lift.current_y, column.neighbor_floor_y) {
            write_voxel_logged(world, column_voxel(transform, column.dx, y, column.dz), column.wall_material);
        }
    }

    for column in &lift.platform_edge {
        for y in travel_range(lift, column).filter(|&y| y != lift.current_y) {
            clear_if_matches(world, column_voxel(transform, column.dx, y, column.dz), column.wall_material);
        }
        for y in platform_edge_seam_layers(lift.current_y, column.neighbor_floor_y) {
            write_voxel_logged(world, column_voxel(transform, column.dx, y, column.dz), column.wall_material);
        }
    }
}

// ============================================================================
// STATE MACHINE
// ============================================================================

/// Start a lift cycle
///
/// No-op unless the lift is idle, has cells, and can actually travel.
pub fn activate_lift(lift: &mut LiftData, now: u64) -> Option<MoverEvent> {
    if lift.state != LiftState::Idle || lift.top_y <= lift.bottom_y || lift.cells.is_empty() {
        return None;
    }
    lift.state = LiftState::MovingDown;
    lift.last_step = now;
    log::debug!("[MoverEngine::activate_lift] Sector {} lowering", lift.sector);
    Some(MoverEvent::LiftLowering { sector: lift.sector })
}

/// Force a lift back to Idle where it stands
pub fn halt_lift(lift: &mut LiftData) {
    lift.state = LiftState::Idle;
}

/// Advance a lift by one simulation tick
pub fn tick_lift(
    lift: &mut LiftData,
    world: &mut dyn HostWorld,
    config: &ConversionConfig,
    now: u64,
) -> Vec<MoverEvent> {
    let mut events = Vec::new();

    let delta = match lift.state {
        LiftState::Idle => return events,
        LiftState::Waiting => {
            if now >= lift.wait_until {
                lift.state = LiftState::MovingUp;
                lift.last_step = now;
                events.push(MoverEvent::LiftRising { sector: lift.sector });
            }
            return events;
        }
        LiftState::MovingDown => -1,
        LiftState::MovingUp => 1,
    };

    if now.saturating_sub(lift.last_step) < ticks_per_layer(lift.speed) {
        return events;
    }
    lift.last_step = now;

    step_lift(lift, world, config, delta, &mut events);

    match lift.state {
        LiftState::MovingDown if lift.current_y <= lift.bottom_y => {
            lift.state = LiftState::Waiting;
            lift.wait_until = now + config.movers.lift_wait_ticks;
            events.push(MoverEvent::LiftReachedBottom { sector: lift.sector });
        }
        LiftState::MovingUp if lift.current_y >= lift.top_y => {
            lift.state = LiftState::Idle;
            events.push(MoverEvent::LiftReachedTop { sector: lift.sector });
        }
        _ => {}
    }

    events
}

/// Move the platform one layer by `delta` (+1 up, -1 down)
pub fn step_lift(
    lift: &mut LiftData,
    world: &mut dyn HostWorld,
    config: &ConversionConfig,
    delta: i32,
    events: &mut Vec<MoverEvent>,
) {
    let transform = &config.transform;
    let old_y = lift.current_y;
    let new_y = old_y + delta;

    carry_entities(lift, world, transform, &config.movers, delta, events);

    for cell in &lift.cells {
        clear_if_matches(world, column_voxel(transform, cell.dx, old_y, cell.dz), lift.floor_material);
        write_voxel_logged(world, column_voxel(transform, cell.dx, new_y, cell.dz), lift.floor_material);
    }
    lift.current_y = new_y;

    clear_interior(lift, world, transform);
    repaint_boundary(lift, world, transform);
}

/// Remove stray platform material between the platform and the ceiling
///
/// Light markers and anything the host placed are left alone.
fn clear_interior(lift: &LiftData, world: &mut dyn HostWorld, transform: &MapTransform) {
    for cell in &lift.cells {
        for y in lift.current_y + 1..lift.ceiling_y {
            let pos = column_voxel(transform, cell.dx, y, cell.dz);
            if world.get_voxel(pos) == lift.floor_material {
                write_voxel_logged(world, pos, MaterialId::AIR);
            }
        }
    }
}

// ============================================================================
// OCCUPANTS
// ============================================================================

/// Ceiling penetration of an entity's head after rising `delta` layers
pub fn ceiling_penetration(feet_y: f32, height: f32, delta: i32, ceiling_y: i32) -> f32 {
    feet_y + delta as f32 + height - ceiling_y as f32
}

/// Carry entities standing on the platform, crushing those a rise would
/// push into the ceiling
fn carry_entities(
    lift: &LiftData,
    world: &mut dyn HostWorld,
    transform: &MapTransform,
    movers: &MoverConfig,
    delta: i32,
    events: &mut Vec<MoverEvent>,
) {
    let Some(bounds) = cells_bounds(&lift.cells) else {
        return;
    };
    let standing_y = (lift.current_y + 1) as f32;
    let region = aabb_from_columns(
        column_voxel(transform, bounds.min_dx, 0, bounds.min_dz),
        column_voxel(transform, bounds.max_dx, 0, bounds.max_dz),
        standing_y - movers.standing_epsilon,
        standing_y + movers.standing_epsilon,
    );

    for entity in world.entities_in_region(&region) {
        if (entity.position.y - standing_y).abs() > movers.standing_epsilon {
            continue;
        }
        let (mx, my) = voxel_space_to_map(transform, entity.position.x, entity.position.z);
        if !point_inside(&lift.polygon, mx, my) {
            continue;
        }

        if delta > 0 {
            let penetration = ceiling_penetration(entity.position.y, entity.height, delta, lift.ceiling_y);
            if penetration > movers.crush_margin {
                let damage = penetration * movers.crush_damage_per_layer;
                if let Err(e) = world.apply_damage(entity.id, damage, DamageCause::Crush) {
                    log::warn!("[MoverEngine::carry_entities] Damage to {} rejected: {}", entity.id, e);
                }
                events.push(MoverEvent::EntityCrushed {
                    sector: lift.sector,
                    entity: entity.id,
                    damage,
                });
                continue;
            }
        }

        let moved = Point3::new(entity.position.x, entity.position.y + delta as f32, entity.position.z);
        if let Err(e) = world.set_entity_position(entity.id, moved) {
            log::warn!("[MoverEngine::carry_entities] Move of {} rejected: {}", entity.id, e);
        }
    }
}
