//! Sector Sound Graph Data - Pure DOP
//!
//! NO METHODS. Just data.
//! Built once per level load and never mutated afterwards.

use crate::geometry::SectorPolygon;

/// One sector's entry in the adjacency list
#[derive(Debug, Clone, PartialEq)]
pub struct SectorGraphNode {
    pub tag: u16,
    pub polygon: SectorPolygon,
    /// Sorted, deduplicated sector indices sound can reach directly
    pub sound_neighbors: Vec<usize>,
}

/// Undirected sound adjacency over sector indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectorSoundGraph {
    /// Indexed by sector
    pub nodes: Vec<SectorGraphNode>,
}
