//! Mover Engine - doors and lifts that repaint the grid every tick
//!
//! Movers are created at level load from tagged or special-bearing sectors
//! and own the cells, boundary columns and polygon captured for them. The
//! level simulation drives them through `tick_mover`.

pub mod door_data;
pub mod door_operations;
pub mod lift_data;
pub mod lift_operations;
pub mod mover_data;
pub mod mover_operations;

#[cfg(test)]
mod tests;

pub use door_data::{DoorData, DoorFacing, DoorState};
pub use door_operations::{
    create_door, door_facing, facings_compatible, find_lockstep_partners, panel_halves,
    panel_is_clear, register_door_columns, toggle_door, DoorSettings,
};
pub use lift_data::{LiftData, LiftState};
pub use lift_operations::{
    activate_lift, ceiling_penetration, create_lift, platform_edge_seam_layers, seal_lift_boundary,
    seam_layers, LiftSettings,
};
pub use mover_data::{Mover, MoverEvent, SpeedClass};
pub use mover_operations::{
    halt_mover, mover_sector, mover_tag, open_cells, tick_mover, ticks_per_layer,
};
