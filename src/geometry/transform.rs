//! Map units <-> voxel grid transform
//!
//! Map x maps to grid x, map y maps to the grid's horizontal depth axis z,
//! and floor/ceiling heights map to grid y. Columns are addressed relative to
//! the build origin; layers are absolute.

use crate::world::core::VoxelPos;
use serde::{Deserialize, Serialize};

/// Coordinate transform used by rasterizer, extruder and movers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapTransform {
    /// Map units per voxel edge
    pub units_per_voxel: f32,
    /// Map-space point that lands on column (0, 0)
    pub map_origin: [f32; 2],
    /// Absolute voxel position of column (0, 0) at height 0
    pub voxel_origin: VoxelPos,
}

impl Default for MapTransform {
    fn default() -> Self {
        Self {
            units_per_voxel: crate::constants::conversion::DEFAULT_UNITS_PER_VOXEL,
            map_origin: [0.0, 0.0],
            voxel_origin: VoxelPos::new(0, 0, 0),
        }
    }
}

/// Column (dx, dz) containing a map-space point
pub fn map_to_column(transform: &MapTransform, x: f32, y: f32) -> (i32, i32) {
    let u = transform.units_per_voxel;
    (
        ((x - transform.map_origin[0]) / u).floor() as i32,
        ((y - transform.map_origin[1]) / u).floor() as i32,
    )
}

/// Map-space center of column (dx, dz)
pub fn column_center_to_map(transform: &MapTransform, dx: i32, dz: i32) -> (f32, f32) {
    let u = transform.units_per_voxel;
    (
        transform.map_origin[0] + (dx as f32 + 0.5) * u,
        transform.map_origin[1] + (dz as f32 + 0.5) * u,
    )
}

/// Absolute layer of a map-unit height
pub fn height_to_layer(transform: &MapTransform, height: i16) -> i32 {
    transform.voxel_origin.y + (height as f32 / transform.units_per_voxel).floor() as i32
}

/// Absolute voxel of column (dx, dz) at absolute layer y
pub fn column_voxel(transform: &MapTransform, dx: i32, y: i32, dz: i32) -> VoxelPos {
    VoxelPos::new(
        transform.voxel_origin.x + dx,
        y,
        transform.voxel_origin.z + dz,
    )
}

/// Map-space point under an absolute voxel-space position
pub fn voxel_space_to_map(transform: &MapTransform, x: f32, z: f32) -> (f32, f32) {
    let u = transform.units_per_voxel;
    (
        transform.map_origin[0] + (x - transform.voxel_origin.x as f32) * u,
        transform.map_origin[1] + (z - transform.voxel_origin.z as f32) * u,
    )
}
