//! Level Data - Pure DOP
//!
//! NO METHODS. Just data.
//! The arrays arrive already decoded from the source level file; index
//! resolution and neighbor queries live in level_operations.rs.

use serde::{Deserialize, Serialize};

/// 2-D point in source map units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    pub x: i16,
    pub y: i16,
}

/// Directed boundary edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Linedef {
    pub start_vertex: usize,
    pub end_vertex: usize,
    pub flags: u16,
    pub special_type: u16,
    pub sector_tag: u16,
    /// Sidedef index, NO_SIDEDEF (-1) when absent
    pub right_sidedef: i32,
    /// Sidedef index, NO_SIDEDEF (-1) when absent
    pub left_sidedef: i32,
}

/// Textured face of a linedef
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidedef {
    pub x_offset: i16,
    pub y_offset: i16,
    pub upper_texture: String,
    pub lower_texture: String,
    pub middle_texture: String,
    /// Owning sector index (may be out of range in truncated files)
    pub sector: i32,
}

/// Region with its own floor, ceiling and light
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub floor_height: i16,
    pub ceiling_height: i16,
    pub floor_texture: String,
    pub ceiling_texture: String,
    pub light_level: u8,
    pub sector_type: u16,
    pub tag: u16,
}

/// One decoded level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    pub vertices: Vec<Vertex>,
    pub linedefs: Vec<Linedef>,
    pub sidedefs: Vec<Sidedef>,
    pub sectors: Vec<Sector>,
}

/// Level statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelStats {
    pub vertices: usize,
    pub linedefs: usize,
    pub two_sided_linedefs: usize,
    pub special_linedefs: usize,
    pub sidedefs: usize,
    pub sectors: usize,
    pub tagged_sectors: usize,
    /// Linedefs referencing a vertex that does not exist
    pub dangling_vertices: usize,
    /// Sidedef references that resolve to no sector
    pub dangling_sidedefs: usize,
}
