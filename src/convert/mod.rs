//! Convert Module - sector polygons into voxels
//!
//! Runs once per level load: every sector is rasterized first, then walls
//! are extruded using all sectors' heights.

pub mod lighting;
pub mod raster_data;
pub mod raster_operations;
pub mod wall_data;
pub mod wall_operations;

pub use lighting::{light_bucket, marker_level_at, marker_spacing, spacing_tier};
pub use raster_data::{CellBounds, FloorCell, RasterizedSector, SectorHeights};
pub use raster_operations::{
    bounds_footprint, cells_bounds, classify_pillar, collect_floor_cells, polygon_cell_bounds,
    rasterize_sector, sector_heights,
};
pub use wall_data::{BoundaryColumn, ExtrudedWalls, WallSpan, WallSpanKind, WallStyle, WallTextures};
pub use wall_operations::{
    extrude_sector_walls, line_columns, plan_wall_spans, resolve_textures, span_material,
    wall_style,
};
