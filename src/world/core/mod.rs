//! Core world data types and fundamental structures
//!
//! This module contains the essential data types shared by the converter,
//! the movers and any host world implementation.

mod block;
pub mod palette;
mod position;

pub use block::MaterialId;
pub use palette::MaterialPalette;
pub use position::{ChunkPos, VoxelPos};
