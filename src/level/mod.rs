//! Level Module - decoded source level arrays
//!
//! The binary decoding of the source file belongs to the host. This module
//! only describes the decoded arrays and answers index/neighbor questions
//! about them.

pub mod level_data;
pub mod level_operations;

#[cfg(test)]
pub(crate) mod fixtures;

pub use level_data::{LevelData, LevelStats, Linedef, Sector, Sidedef, Vertex};
pub use level_operations::{
    is_two_sided, level_stats, linedef_endpoints, linedef_sectors, linedefs_of_sector,
    log_level_stats, lowest_neighbor_ceiling_above, lowest_neighbor_floor, neighbor_sectors,
    sectors_with_tag, side_facing, sidedef, sidedef_sector,
};
