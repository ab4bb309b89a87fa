//! Sound Module - sector adjacency for sound propagation queries

pub mod sound_graph_data;
pub mod sound_graph_operations;

pub use sound_graph_data::{SectorGraphNode, SectorSoundGraph};
pub use sound_graph_operations::{build_sound_graph, locate_sector_node, reachable_from};
