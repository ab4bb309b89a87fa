//! Lift Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in lift_operations.rs

use super::mover_data::SpeedClass;
use crate::convert::{BoundaryColumn, FloorCell};
use crate::geometry::SectorPolygon;
use crate::world::MaterialId;

/// Lift cycle: Idle -> MovingDown -> Waiting -> MovingUp -> Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiftState {
    Idle,
    MovingDown,
    Waiting,
    MovingUp,
}

/// Runtime state of one lift sector
///
/// Cells, boundary columns and the polygon are captured at load time and
/// owned by the lift.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftData {
    pub sector: usize,
    pub tag: u16,
    pub state: LiftState,
    pub speed: SpeedClass,
    pub cells: Vec<FloorCell>,
    /// Seam columns outside the platform
    pub boundary: Vec<BoundaryColumn>,
    /// Seam columns that are themselves platform cells; their seam stays
    /// below the platform
    pub platform_edge: Vec<BoundaryColumn>,
    pub polygon: SectorPolygon,
    pub top_y: i32,
    pub bottom_y: i32,
    /// Layer currently holding the platform
    pub current_y: i32,
    pub ceiling_y: i32,
    pub floor_material: MaterialId,
    pub last_step: u64,
    pub wait_until: u64,
}
