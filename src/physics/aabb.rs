/// Data-Oriented Axis-Aligned Bounding Box System
///
/// Pure functions for occupant queries - no methods, just data transformations.
/// Coordinates are absolute voxel-space floats: voxel (x, y, z) spans
/// [x, x+1) x [y, y+1) x [z, z+1).

use crate::world::core::VoxelPos;
use cgmath::Point3;

/// Axis-Aligned Bounding Box - pure data structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

/// Create new AABB from min/max points
/// Pure function - constructs AABB data structure
pub fn create_aabb(min: Point3<f32>, max: Point3<f32>) -> AABB {
    AABB { min, max }
}

/// Create the AABB covering a rectangle of voxel columns between two layers
/// Pure function - `min_y`/`max_y` are float heights, columns are inclusive
pub fn aabb_from_columns(min_column: VoxelPos, max_column: VoxelPos, min_y: f32, max_y: f32) -> AABB {
    AABB {
        min: Point3::new(min_column.x as f32, min_y, min_column.z as f32),
        max: Point3::new(max_column.x as f32 + 1.0, max_y, max_column.z as f32 + 1.0),
    }
}

/// Test if AABB contains a point (faces included)
/// Pure function - an entity's feet position is tested, not its extent
pub fn aabb_contains_point(aabb: &AABB, point: Point3<f32>) -> bool {
    point.x >= aabb.min.x && point.x <= aabb.max.x &&
    point.y >= aabb.min.y && point.y <= aabb.max.y &&
    point.z >= aabb.min.z && point.z <= aabb.max.z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_box_covers_whole_voxels() {
        let aabb = aabb_from_columns(VoxelPos::new(2, 0, 3), VoxelPos::new(4, 0, 5), 1.0, 1.5);
        assert!(aabb_contains_point(&aabb, Point3::new(4.9, 1.2, 5.9)));
        assert!(aabb_contains_point(&aabb, Point3::new(2.0, 1.0, 3.0)));
        assert!(!aabb_contains_point(&aabb, Point3::new(5.1, 1.2, 4.0)));
        assert!(!aabb_contains_point(&aabb, Point3::new(3.0, 2.0, 4.0)));
    }
}
