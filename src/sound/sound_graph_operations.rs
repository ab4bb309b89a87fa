//! Sector Sound Graph Operations - Pure DOP Functions

use super::sound_graph_data::{SectorGraphNode, SectorSoundGraph};
use crate::constants::level::ML_SOUND_BLOCK;
use crate::geometry::{is_locatable, point_inside, SectorPolygon};
use crate::level::{linedef_sectors, LevelData};
use bit_vec::BitVec;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Build the sound graph from the level and its reconstructed polygons
///
/// Every two-sided linedef without the sound-blocking flag joins its two
/// sectors. `polygons` is indexed by sector.
pub fn build_sound_graph(level: &LevelData, polygons: &[SectorPolygon]) -> SectorSoundGraph {
    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); level.sectors.len()];
    let mut edges = 0;

    for line in &level.linedefs {
        if line.flags & ML_SOUND_BLOCK != 0 {
            continue;
        }
        if let (Some(a), Some(b)) = linedef_sectors(level, line) {
            if a == b || a >= neighbors.len() || b >= neighbors.len() {
                continue;
            }
            neighbors[a].push(b);
            neighbors[b].push(a);
            edges += 1;
        }
    }

    let nodes: Vec<SectorGraphNode> = neighbors
        .into_iter()
        .enumerate()
        .map(|(sector, mut sound_neighbors)| {
            sound_neighbors.sort_unstable();
            sound_neighbors.dedup();
            SectorGraphNode {
                tag: level.sectors[sector].tag,
                polygon: polygons.get(sector).cloned().unwrap_or(SectorPolygon {
                    sector,
                    vertices: Vec::new(),
                    closed: false,
                    unused_edges: 0,
                }),
                sound_neighbors,
            }
        })
        .collect();

    log::debug!(
        "[SectorSoundGraph::build] {} nodes, {} sound-passing linedefs",
        nodes.len(),
        edges
    );
    SectorSoundGraph { nodes }
}

/// Every sector reachable from `start` without crossing a sound-blocking edge
///
/// Includes `start` itself. Unknown start sectors reach nothing.
pub fn reachable_from(graph: &SectorSoundGraph, start: usize) -> FxHashSet<usize> {
    let mut reached = FxHashSet::default();
    if start >= graph.nodes.len() {
        return reached;
    }

    let mut visited = BitVec::from_elem(graph.nodes.len(), false);
    let mut queue = VecDeque::new();
    visited.set(start, true);
    queue.push_back(start);

    while let Some(sector) = queue.pop_front() {
        reached.insert(sector);
        for &next in &graph.nodes[sector].sound_neighbors {
            if !visited.get(next).unwrap_or(true) {
                visited.set(next, true);
                queue.push_back(next);
            }
        }
    }

    reached
}

/// First sector whose polygon contains the map-space point
///
/// Sectors without a usable polygon stay in the graph but are never located.
pub fn locate_sector_node(graph: &SectorSoundGraph, x: f32, y: f32) -> Option<usize> {
    graph
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| is_locatable(&node.polygon))
        .find(|(_, node)| point_inside(&node.polygon, x, y))
        .map(|(sector, _)| sector)
}
