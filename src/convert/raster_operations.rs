//! Sector Rasterizer - Pure DOP Functions
//!
//! Fills a sector's interior into the voxel grid: floor layer, ceiling
//! layer, air in between, and light markers one layer under the ceiling.

use super::lighting::{light_bucket, marker_level_at, marker_spacing};
use super::raster_data::{CellBounds, FloorCell, RasterizedSector, SectorHeights};
use crate::config::{ConversionConfig, PillarThresholds};
use crate::error::{ConversionError, ConversionResult, ErrorContext};
use crate::geometry::{
    column_center_to_map, column_voxel, height_to_layer, map_to_column, point_inside,
    polygon_bounds, MapTransform, SectorPolygon,
};
use crate::level::{lowest_neighbor_ceiling_above, LevelData};
use crate::world::core::palette::{light_marker, texture_material};
use crate::world::{HostWorld, MaterialId};

// ============================================================================
// HEIGHTS
// ============================================================================

/// Floor and effective ceiling layers of `sector`
///
/// Door sectors are closed in the source data (ceiling at floor height), so
/// their ceiling is raised to the lowest neighboring ceiling above their
/// floor to make room for the doorway.
pub fn sector_heights(
    level: &LevelData,
    sector: usize,
    config: &ConversionConfig,
    is_door: bool,
) -> ConversionResult<SectorHeights> {
    let source = level
        .sectors
        .get(sector)
        .ok_or(ConversionError::SectorOutOfRange {
            index: sector,
            count: level.sectors.len(),
        })?;

    let mut ceiling_height = source.ceiling_height;
    if is_door {
        if let Some(neighbor_ceiling) = lowest_neighbor_ceiling_above(level, sector, source.floor_height) {
            ceiling_height = neighbor_ceiling;
        }
    }

    let transform = &config.transform;
    let floor_y = height_to_layer(transform, source.floor_height);
    let raw_ceiling_y = height_to_layer(transform, ceiling_height);

    Ok(SectorHeights {
        floor_y,
        ceiling_y: raw_ceiling_y.max(floor_y + config.min_clearance_layers),
        raw_ceiling_y,
    })
}

// ============================================================================
// CELL CLASSIFICATION
// ============================================================================

/// Column rectangle covering a polygon's bounding box
pub fn polygon_cell_bounds(polygon: &SectorPolygon, transform: &MapTransform) -> Option<CellBounds> {
    let bounds = polygon_bounds(polygon)?;
    let (min_dx, min_dz) = map_to_column(transform, bounds.min[0], bounds.min[1]);
    let (max_dx, max_dz) = map_to_column(transform, bounds.max[0], bounds.max[1]);
    Some(CellBounds {
        min_dx,
        min_dz,
        max_dx,
        max_dz,
    })
}

/// Columns whose center falls inside the polygon, in (dz, dx) scan order
pub fn collect_floor_cells(polygon: &SectorPolygon, transform: &MapTransform) -> Vec<FloorCell> {
    let Some(bounds) = polygon_cell_bounds(polygon, transform) else {
        return Vec::new();
    };

    let mut cells = Vec::new();
    for dz in bounds.min_dz..=bounds.max_dz {
        for dx in bounds.min_dx..=bounds.max_dx {
            let (mx, my) = column_center_to_map(transform, dx, dz);
            if point_inside(polygon, mx, my) {
                cells.push(FloorCell { dx, dz });
            }
        }
    }
    cells
}

/// Bounding rectangle of a set of cells
pub fn cells_bounds(cells: &[FloorCell]) -> Option<CellBounds> {
    let first = cells.first()?;
    let mut bounds = CellBounds {
        min_dx: first.dx,
        min_dz: first.dz,
        max_dx: first.dx,
        max_dz: first.dz,
    };
    for cell in &cells[1..] {
        bounds.min_dx = bounds.min_dx.min(cell.dx);
        bounds.min_dz = bounds.min_dz.min(cell.dz);
        bounds.max_dx = bounds.max_dx.max(cell.dx);
        bounds.max_dz = bounds.max_dz.max(cell.dz);
    }
    Some(bounds)
}

/// Footprint (width x depth in columns) of a rectangle
pub fn bounds_footprint(bounds: &CellBounds) -> i32 {
    (bounds.max_dx - bounds.min_dx + 1) * (bounds.max_dz - bounds.min_dz + 1)
}

/// Small sectors are painted with the pillar trim/body pair
pub fn classify_pillar(cells: &[FloorCell], thresholds: &PillarThresholds) -> bool {
    match cells_bounds(cells) {
        Some(bounds) => {
            cells.len() < thresholds.max_cells && bounds_footprint(&bounds) < thresholds.max_footprint
        }
        None => false,
    }
}

// ============================================================================
// RASTERIZATION
// ============================================================================

/// Rasterize one sector into the world
///
/// Light markers are skipped in door sectors, whose interior is taken over by
/// the door panel.
pub fn rasterize_sector(
    world: &mut dyn HostWorld,
    level: &LevelData,
    polygon: &SectorPolygon,
    config: &ConversionConfig,
    is_door: bool,
) -> ConversionResult<RasterizedSector> {
    let sector = polygon.sector;
    let heights = sector_heights(level, sector, config, is_door)?;
    let source = &level.sectors[sector];
    let palette = &config.palette;
    let transform = &config.transform;

    let floor_material = texture_material(palette, &source.floor_texture, palette.floor);
    let ceiling_material = texture_material(palette, &source.ceiling_texture, palette.ceiling);

    let cells = collect_floor_cells(polygon, transform);
    let bucket = light_bucket(source.light_level, &config.lighting);
    let spacing = marker_spacing(bucket, &config.lighting);
    let marker_y = heights.ceiling_y - 1;
    let mut light_markers = 0;

    for cell in &cells {
        let FloorCell { dx, dz } = *cell;
        world
            .set_voxel(column_voxel(transform, dx, heights.floor_y, dz), floor_material)
            .context("rasterize floor")?;
        world
            .set_voxel(column_voxel(transform, dx, heights.ceiling_y, dz), ceiling_material)
            .context("rasterize ceiling")?;
        for y in heights.floor_y + 1..heights.ceiling_y {
            world
                .set_voxel(column_voxel(transform, dx, y, dz), MaterialId::AIR)
                .context("rasterize interior")?;
        }

        if is_door {
            continue;
        }
        if let Some(marker) = marker_level_at(dx, dz, bucket, spacing) {
            world
                .set_voxel(column_voxel(transform, dx, marker_y, dz), light_marker(palette, marker))
                .context("place light marker")?;
            light_markers += 1;
        }
    }

    let is_pillar = classify_pillar(&cells, &config.pillar);

    log::debug!(
        "[SectorRasterizer::rasterize_sector] Sector {}: {} cells, layers {}..{}{}, {} lights{}",
        sector,
        cells.len(),
        heights.floor_y,
        heights.ceiling_y,
        if heights.ceiling_y != heights.raw_ceiling_y { " (raised)" } else { "" },
        light_markers,
        if is_pillar { ", pillar" } else { "" }
    );

    Ok(RasterizedSector {
        sector,
        heights,
        bounds: polygon_cell_bounds(polygon, transform),
        cells,
        floor_material,
        ceiling_material,
        is_pillar,
        is_door,
        light_markers,
    })
}
