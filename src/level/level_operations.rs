//! Level Operations - Pure DOP Functions
//!
//! Index resolution and neighbor queries over `LevelData`.
//! Out-of-range indices never panic: they resolve to `None`, since the source
//! format tolerates truncated directories.

use super::level_data::{LevelData, LevelStats, Linedef, Sidedef, Vertex};

// ============================================================================
// INDEX RESOLUTION
// ============================================================================

/// Resolve a raw sidedef index
pub fn sidedef(level: &LevelData, index: i32) -> Option<&Sidedef> {
    usize::try_from(index).ok().and_then(|i| level.sidedefs.get(i))
}

/// Sector owning a raw sidedef index, `None` when either index dangles
pub fn sidedef_sector(level: &LevelData, index: i32) -> Option<usize> {
    let side = sidedef(level, index)?;
    let sector = usize::try_from(side.sector).ok()?;
    (sector < level.sectors.len()).then_some(sector)
}

/// (right, left) sectors of a linedef
pub fn linedef_sectors(level: &LevelData, linedef: &Linedef) -> (Option<usize>, Option<usize>) {
    (
        sidedef_sector(level, linedef.right_sidedef),
        sidedef_sector(level, linedef.left_sidedef),
    )
}

/// Start and end vertex of a linedef
pub fn linedef_endpoints(level: &LevelData, linedef: &Linedef) -> Option<(Vertex, Vertex)> {
    let start = level.vertices.get(linedef.start_vertex)?;
    let end = level.vertices.get(linedef.end_vertex)?;
    Some((*start, *end))
}

/// Whether both sides of a linedef resolve to a sector
pub fn is_two_sided(level: &LevelData, linedef: &Linedef) -> bool {
    matches!(linedef_sectors(level, linedef), (Some(_), Some(_)))
}

/// The sidedef of `linedef` facing `sector` and the sector on the other side
///
/// Returns `None` when neither side belongs to `sector`. A linedef with the
/// same sector on both sides reports its right sidedef and that sector as the
/// neighbor.
pub fn side_facing<'a>(
    level: &'a LevelData,
    linedef: &Linedef,
    sector: usize,
) -> Option<(&'a Sidedef, Option<usize>, Option<&'a Sidedef>)> {
    let (right, left) = linedef_sectors(level, linedef);
    if right == Some(sector) {
        let own = sidedef(level, linedef.right_sidedef)?;
        let other = left.and_then(|_| sidedef(level, linedef.left_sidedef));
        Some((own, left, other))
    } else if left == Some(sector) {
        let own = sidedef(level, linedef.left_sidedef)?;
        let other = right.and_then(|_| sidedef(level, linedef.right_sidedef));
        Some((own, right, other))
    } else {
        None
    }
}

// ============================================================================
// SECTOR QUERIES
// ============================================================================

/// Indices of linedefs with a side in `sector`
pub fn linedefs_of_sector(level: &LevelData, sector: usize) -> Vec<usize> {
    level
        .linedefs
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            let (right, left) = linedef_sectors(level, line);
            right == Some(sector) || left == Some(sector)
        })
        .map(|(i, _)| i)
        .collect()
}

/// Sectors sharing a two-sided linedef with `sector` (sorted, deduplicated)
pub fn neighbor_sectors(level: &LevelData, sector: usize) -> Vec<usize> {
    let mut out: Vec<usize> = level
        .linedefs
        .iter()
        .filter_map(|line| match linedef_sectors(level, line) {
            (Some(r), Some(l)) if r == sector && l != sector => Some(l),
            (Some(r), Some(l)) if l == sector && r != sector => Some(r),
            _ => None,
        })
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Lowest floor height among the neighbors of `sector`
pub fn lowest_neighbor_floor(level: &LevelData, sector: usize) -> Option<i16> {
    neighbor_sectors(level, sector)
        .into_iter()
        .filter_map(|n| level.sectors.get(n))
        .map(|s| s.floor_height)
        .min()
}

/// Lowest neighbor ceiling strictly above `height`
///
/// Neighbors closed down to `height` or below (other shut doors) are ignored.
pub fn lowest_neighbor_ceiling_above(level: &LevelData, sector: usize, height: i16) -> Option<i16> {
    neighbor_sectors(level, sector)
        .into_iter()
        .filter_map(|n| level.sectors.get(n))
        .map(|s| s.ceiling_height)
        .filter(|&c| c > height)
        .min()
}

/// All sectors carrying `tag` (tag 0 means untagged and matches nothing)
pub fn sectors_with_tag(level: &LevelData, tag: u16) -> Vec<usize> {
    if tag == 0 {
        return Vec::new();
    }
    level
        .sectors
        .iter()
        .enumerate()
        .filter(|(_, s)| s.tag == tag)
        .map(|(i, _)| i)
        .collect()
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Collect level statistics
pub fn level_stats(level: &LevelData) -> LevelStats {
    let mut stats = LevelStats {
        vertices: level.vertices.len(),
        linedefs: level.linedefs.len(),
        sidedefs: level.sidedefs.len(),
        sectors: level.sectors.len(),
        tagged_sectors: level.sectors.iter().filter(|s| s.tag != 0).count(),
        ..LevelStats::default()
    };

    for line in &level.linedefs {
        if linedef_endpoints(level, line).is_none() {
            stats.dangling_vertices += 1;
        }
        if line.special_type != 0 {
            stats.special_linedefs += 1;
        }
        let (right, left) = linedef_sectors(level, line);
        if right.is_some() && left.is_some() {
            stats.two_sided_linedefs += 1;
        }
        if line.right_sidedef >= 0 && right.is_none() {
            stats.dangling_sidedefs += 1;
        }
        if line.left_sidedef >= 0 && left.is_none() {
            stats.dangling_sidedefs += 1;
        }
    }

    stats
}

/// Log level statistics
pub fn log_level_stats(level: &LevelData) {
    let stats = level_stats(level);
    log::info!(
        "[Level] {} vertices, {} linedefs ({} two-sided, {} special), {} sidedefs, {} sectors ({} tagged)",
        stats.vertices,
        stats.linedefs,
        stats.two_sided_linedefs,
        stats.special_linedefs,
        stats.sidedefs,
        stats.sectors,
        stats.tagged_sectors
    );
    if stats.dangling_vertices > 0 || stats.dangling_sidedefs > 0 {
        log::warn!(
            "[Level] {} linedefs with missing vertices, {} sidedef references without a sector",
            stats.dangling_vertices,
            stats.dangling_sidedefs
        );
    }
}
