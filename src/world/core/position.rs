use serde::{Deserialize, Serialize};

/// Absolute voxel coordinate in the host grid (y is up)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct VoxelPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Chunk containing this voxel
    pub fn to_chunk_pos(self, chunk_size: u32) -> ChunkPos {
        let size = chunk_size as i32;
        ChunkPos {
            x: self.x.div_euclid(size),
            y: self.y.div_euclid(size),
            z: self.z.div_euclid(size),
        }
    }

    /// Position of this voxel inside its chunk (0 to chunk_size-1)
    pub fn local_in_chunk(self, chunk_size: u32) -> (u32, u32, u32) {
        let size = chunk_size as i32;
        (
            self.x.rem_euclid(size) as u32,
            self.y.rem_euclid(size) as u32,
            self.z.rem_euclid(size) as u32,
        )
    }
}

/// Chunk coordinate of the in-memory world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}
