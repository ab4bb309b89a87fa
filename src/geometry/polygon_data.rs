//! Sector Polygon Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in polygon_operations.rs

use crate::level::Vertex;

/// Directed edge with the owning sector's interior on a consistent side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectedEdge {
    pub start: Vertex,
    pub end: Vertex,
    /// Linedef this edge came from
    pub linedef: usize,
}

/// Ordered vertex loop reconstructed for one sector
///
/// `vertices` are the starts of the chained edges. When `closed` is false the
/// chain broke before returning to its first vertex and only covers the area
/// enclosed up to the break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorPolygon {
    pub sector: usize,
    pub vertices: Vec<Vertex>,
    pub closed: bool,
    /// Edges of the sector left out of the chain
    pub unused_edges: usize,
}

/// Map-space bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub min: [f32; 2],
    pub max: [f32; 2],
}
