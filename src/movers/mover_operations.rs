//! Mover Operations - dispatch over the Mover variants

use super::door_operations::{cancel_auto_close, tick_door};
use super::lift_operations::{halt_lift, tick_lift};
use super::mover_data::{Mover, MoverEvent, SpeedClass};
use crate::config::ConversionConfig;
use crate::convert::FloorCell;
use crate::geometry::{column_voxel, MapTransform};
use crate::constants::movers::{TICKS_PER_LAYER_FAST, TICKS_PER_LAYER_NORMAL, TICKS_PER_LAYER_SLOW};
use crate::world::HostWorld;

/// Ticks between layer steps
pub fn ticks_per_layer(speed: SpeedClass) -> u64 {
    match speed {
        SpeedClass::Slow => TICKS_PER_LAYER_SLOW,
        SpeedClass::Normal => TICKS_PER_LAYER_NORMAL,
        SpeedClass::Fast => TICKS_PER_LAYER_FAST,
    }
}

pub fn mover_sector(mover: &Mover) -> usize {
    match mover {
        Mover::Door(door) => door.sector,
        Mover::Lift(lift) => lift.sector,
    }
}

pub fn mover_tag(mover: &Mover) -> u16 {
    match mover {
        Mover::Door(door) => door.tag,
        Mover::Lift(lift) => lift.tag,
    }
}

/// Advance one mover by one tick
pub fn tick_mover(
    mover: &mut Mover,
    world: &mut dyn HostWorld,
    config: &ConversionConfig,
    now: u64,
) -> Vec<MoverEvent> {
    match mover {
        Mover::Door(door) => tick_door(door, world, &config.transform, now).into_iter().collect(),
        Mover::Lift(lift) => tick_lift(lift, world, config, now),
    }
}

/// Stop a mover: lifts go Idle where they stand, doors forget pending closes
pub fn halt_mover(mover: &mut Mover) {
    match mover {
        Mover::Door(door) => cancel_auto_close(door),
        Mover::Lift(lift) => halt_lift(lift),
    }
}

/// Cells whose first layer above `floor_y` is still open after wall extrusion
///
/// Columns an extruded wall runs through are left out of a mover so opening a
/// door or moving a platform never carves into a wall.
pub fn open_cells(
    world: &dyn HostWorld,
    cells: &[FloorCell],
    floor_y: i32,
    transform: &MapTransform,
) -> Vec<FloorCell> {
    cells
        .iter()
        .copied()
        .filter(|c| world.get_voxel(column_voxel(transform, c.dx, floor_y + 1, c.dz)).is_air())
        .collect()
}
