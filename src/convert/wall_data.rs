//! Wall Extrusion Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in wall_operations.rs

use crate::world::MaterialId;

/// Which part of a linedef's face a span covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSpanKind {
    /// One-sided wall, floor to ceiling
    Solid,
    /// Step between two floors
    Lower,
    /// Step between two ceilings
    Upper,
    /// See-through middle texture on a two-sided line
    Masked,
}

/// Inclusive layer range to paint on every column of an edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallSpan {
    pub kind: WallSpanKind,
    pub bottom: i32,
    pub top: i32,
    pub texture: String,
}

/// Textures the owning sector's side of a linedef resolves to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallTextures {
    pub upper: String,
    pub lower: String,
    pub middle: String,
}

/// Trim/body material pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallStyle {
    pub trim: MaterialId,
    pub body: MaterialId,
}

/// Column on a two-sided boundary and the seam material painted on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryColumn {
    pub dx: i32,
    pub dz: i32,
    pub neighbor_floor_y: i32,
    pub wall_material: MaterialId,
}

/// Result of extruding one sector's walls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtrudedWalls {
    pub sector: usize,
    pub spans_painted: usize,
    pub voxels_painted: usize,
    pub boundary: Vec<BoundaryColumn>,
}
