//! Door Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in door_operations.rs

use crate::convert::FloorCell;
use crate::world::MaterialId;

/// Binary door state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorState {
    Open,
    Closed,
}

/// Axis the door panel faces along
///
/// A panel is symmetric, so only the axis is tracked: NorthSouth faces
/// along Z, EastWest along X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorFacing {
    NorthSouth,
    EastWest,
}

/// Runtime state of one door sector
#[derive(Debug, Clone, PartialEq)]
pub struct DoorData {
    pub sector: usize,
    pub tag: u16,
    pub state: DoorState,
    pub facing: DoorFacing,
    pub cells: Vec<FloorCell>,
    pub floor_y: i32,
    pub ceiling_y: i32,
    pub lower_material: MaterialId,
    pub upper_material: MaterialId,
    /// Whether opening schedules an automatic close
    pub auto_close: bool,
    pub close_delay: u64,
    /// Tick of the pending auto-close re-check
    pub close_at: Option<u64>,
}
