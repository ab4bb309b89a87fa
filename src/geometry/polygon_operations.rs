//! Sector Polygon Operations - Pure DOP Functions
//!
//! Reconstructs one ordered vertex loop per sector from the unordered
//! linedef soup, and answers point-location queries against the loops.

use super::polygon_data::{DirectedEdge, MapBounds, SectorPolygon};
use crate::level::{linedef_endpoints, linedef_sectors, LevelData, Vertex};
use bit_vec::BitVec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// ============================================================================
// EDGE COLLECTION
// ============================================================================

/// Directed edges bounding `sector`
///
/// Right-side edges are emitted start->end, left-side edges end->start, so
/// the interior always lies on the same side. Linedefs with a missing vertex
/// are skipped.
pub fn collect_sector_edges(level: &LevelData, sector: usize) -> Vec<DirectedEdge> {
    let mut edges = Vec::new();

    for (index, line) in level.linedefs.iter().enumerate() {
        let (right, left) = linedef_sectors(level, line);
        if right != Some(sector) && left != Some(sector) {
            continue;
        }
        let Some((start, end)) = linedef_endpoints(level, line) else {
            log::warn!(
                "[SectorPolygonBuilder] Linedef {} of sector {} references a missing vertex",
                index,
                sector
            );
            continue;
        };

        if right == Some(sector) {
            edges.push(DirectedEdge { start, end, linedef: index });
        }
        if left == Some(sector) {
            edges.push(DirectedEdge { start: end, end: start, linedef: index });
        }
    }

    edges
}

// ============================================================================
// CHAINING
// ============================================================================

/// Greedily chain `edges` beginning with `edges[first]`
///
/// Repeatedly appends the first unused edge whose start equals the chain's
/// current end, until no continuation exists. Returns the chain's edge starts
/// and whether the last edge ends on the first vertex.
pub fn chain_edges(edges: &[DirectedEdge], first: usize) -> (Vec<Vertex>, bool) {
    if first >= edges.len() {
        return (Vec::new(), false);
    }

    let mut used = BitVec::from_elem(edges.len(), false);
    used.set(first, true);

    let mut vertices = vec![edges[first].start];
    let mut end = edges[first].end;

    loop {
        let next = edges
            .iter()
            .enumerate()
            .find(|(i, edge)| !used.get(*i).unwrap_or(true) && edge.start == end);

        match next {
            Some((i, edge)) => {
                used.set(i, true);
                vertices.push(edge.start);
                end = edge.end;
            }
            None => break,
        }
    }

    let closed = end == edges[first].start;
    (vertices, closed)
}

/// Reconstruct the polygon of `sector`, chaining from its first edge
pub fn build_sector_polygon(level: &LevelData, sector: usize) -> SectorPolygon {
    let edges = collect_sector_edges(level, sector);
    let (vertices, closed) = chain_edges(&edges, 0);
    let unused_edges = edges.len().saturating_sub(vertices.len());

    if !edges.is_empty() && (!closed || unused_edges > 0) {
        log::warn!(
            "[SectorPolygonBuilder] Sector {}: chain of {} of {} edges (closed: {})",
            sector,
            vertices.len(),
            edges.len(),
            closed
        );
    }

    SectorPolygon {
        sector,
        vertices,
        closed,
        unused_edges,
    }
}

/// Reconstruct the polygons of every sector, indexed by sector
pub fn build_all_polygons(level: &LevelData) -> Vec<SectorPolygon> {
    #[cfg(feature = "parallel")]
    let polygons: Vec<SectorPolygon> = (0..level.sectors.len())
        .into_par_iter()
        .map(|sector| build_sector_polygon(level, sector))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let polygons: Vec<SectorPolygon> = (0..level.sectors.len())
        .map(|sector| build_sector_polygon(level, sector))
        .collect();

    log::debug!(
        "[SectorPolygonBuilder] Built {} polygons ({} closed)",
        polygons.len(),
        polygons.iter().filter(|p| p.closed).count()
    );
    polygons
}

// ============================================================================
// QUERIES
// ============================================================================

/// Whether a polygon can take part in point location
pub fn is_locatable(polygon: &SectorPolygon) -> bool {
    polygon.vertices.len() >= 3
}

/// Even-odd ray-casting point-in-polygon test in map units
///
/// An open chain is treated as if closed by its last-to-first segment.
pub fn point_inside(polygon: &SectorPolygon, x: f32, y: f32) -> bool {
    let vertices = &polygon.vertices;
    if vertices.len() < 3 {
        return false;
    }

    let (px, py) = (x as f64, y as f64);
    let mut inside = false;
    let mut j = vertices.len() - 1;

    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].x as f64, vertices[i].y as f64);
        let (xj, yj) = (vertices[j].x as f64, vertices[j].y as f64);

        if (yi > py) != (yj > py) {
            let x_cross = (xj - xi) * (py - yi) / (yj - yi) + xi;
            if px < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

/// Map-space bounding box of a polygon
pub fn polygon_bounds(polygon: &SectorPolygon) -> Option<MapBounds> {
    let first = polygon.vertices.first()?;
    let mut bounds = MapBounds {
        min: [first.x as f32, first.y as f32],
        max: [first.x as f32, first.y as f32],
    };
    for v in &polygon.vertices[1..] {
        bounds.min[0] = bounds.min[0].min(v.x as f32);
        bounds.min[1] = bounds.min[1].min(v.y as f32);
        bounds.max[0] = bounds.max[0].max(v.x as f32);
        bounds.max[1] = bounds.max[1].max(v.y as f32);
    }
    Some(bounds)
}

/// Linear scan for the first sector whose polygon contains the point
pub fn locate_sector(polygons: &[SectorPolygon], x: f32, y: f32) -> Option<usize> {
    polygons
        .iter()
        .filter(|p| is_locatable(p))
        .find(|p| point_inside(p, x, y))
        .map(|p| p.sector)
}
