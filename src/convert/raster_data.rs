//! Sector Raster Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in raster_operations.rs

use crate::world::MaterialId;

/// Voxel column relative to the build origin whose center lies inside a sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FloorCell {
    pub dx: i32,
    pub dz: i32,
}

/// Absolute layers of a sector after clearance and door adjustments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorHeights {
    pub floor_y: i32,
    /// Effective ceiling, at least `floor_y + min_clearance_layers`
    pub ceiling_y: i32,
    /// Ceiling layer straight from the sector's ceiling height
    pub raw_ceiling_y: i32,
}

/// Inclusive column rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    pub min_dx: i32,
    pub min_dz: i32,
    pub max_dx: i32,
    pub max_dz: i32,
}

/// Result of rasterizing one sector
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedSector {
    pub sector: usize,
    pub heights: SectorHeights,
    pub cells: Vec<FloorCell>,
    /// Column rectangle scanned (None for an empty polygon)
    pub bounds: Option<CellBounds>,
    pub floor_material: MaterialId,
    pub ceiling_material: MaterialId,
    pub is_pillar: bool,
    pub is_door: bool,
    pub light_markers: usize,
}
