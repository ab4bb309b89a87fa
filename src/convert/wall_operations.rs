//! Wall Extruder - Pure DOP Functions
//!
//! Paints vertical wall spans along every linedef bounding a sector and
//! records the two-sided boundary columns movers repaint later.

use super::raster_data::{RasterizedSector, SectorHeights};
use super::wall_data::{BoundaryColumn, ExtrudedWalls, WallSpan, WallSpanKind, WallStyle, WallTextures};
use crate::config::ConversionConfig;
use crate::error::{ConversionError, ConversionResult, ErrorContext};
use crate::geometry::{column_voxel, map_to_column, MapTransform};
use crate::level::{linedef_endpoints, linedefs_of_sector, side_facing, LevelData, Sidedef};
use crate::world::core::palette::{has_texture, texture_material};
use crate::world::{HostWorld, MaterialId, MaterialPalette};
use rustc_hash::FxHashSet;

// ============================================================================
// SPAN PLANNING
// ============================================================================

/// Spans to paint on one linedef as seen from the owning sector
///
/// `neighbor` is None for a one-sided line.
pub fn plan_wall_spans(
    own: &SectorHeights,
    neighbor: Option<&SectorHeights>,
    textures: &WallTextures,
) -> Vec<WallSpan> {
    let Some(other) = neighbor else {
        return vec![WallSpan {
            kind: WallSpanKind::Solid,
            bottom: own.floor_y,
            top: own.ceiling_y,
            texture: textures.middle.clone(),
        }];
    };

    let mut spans = Vec::new();

    if own.floor_y != other.floor_y {
        spans.push(WallSpan {
            kind: WallSpanKind::Lower,
            bottom: own.floor_y.min(other.floor_y),
            top: own.floor_y.max(other.floor_y) - 1,
            texture: textures.lower.clone(),
        });
    }

    if own.ceiling_y != other.ceiling_y {
        spans.push(WallSpan {
            kind: WallSpanKind::Upper,
            bottom: own.ceiling_y.min(other.ceiling_y) + 1,
            top: own.ceiling_y.max(other.ceiling_y),
            texture: textures.upper.clone(),
        });
    }

    if spans.is_empty() && has_texture(&textures.middle) {
        spans.push(WallSpan {
            kind: WallSpanKind::Masked,
            bottom: own.floor_y,
            top: own.ceiling_y,
            texture: textures.middle.clone(),
        });
    }

    spans
}

/// Textures for the owning side, borrowing step textures from the other side
/// when the owning side leaves them blank
pub fn resolve_textures(own: &Sidedef, other: Option<&Sidedef>) -> WallTextures {
    let pick = |mine: &str, theirs: Option<&str>| -> String {
        if has_texture(mine) {
            mine.to_string()
        } else {
            theirs.filter(|t| has_texture(t)).unwrap_or(mine).to_string()
        }
    };

    WallTextures {
        upper: pick(&own.upper_texture, other.map(|s| s.upper_texture.as_str())),
        lower: pick(&own.lower_texture, other.map(|s| s.lower_texture.as_str())),
        middle: own.middle_texture.clone(),
    }
}

// ============================================================================
// MATERIALS
// ============================================================================

/// Trim/body pair for a sector
pub fn wall_style(palette: &MaterialPalette, is_pillar: bool) -> WallStyle {
    if is_pillar {
        WallStyle {
            trim: palette.pillar_trim,
            body: palette.pillar_body,
        }
    } else {
        WallStyle {
            trim: palette.wall_trim,
            body: palette.wall_body,
        }
    }
}

/// Material of `layer` within `span`
///
/// The `trim_layers` layers nearest each end get the trim material. Masked
/// spans are uniform.
pub fn span_material(
    span: &WallSpan,
    layer: i32,
    style: &WallStyle,
    palette: &MaterialPalette,
    trim_layers: i32,
) -> MaterialId {
    if span.kind == WallSpanKind::Masked {
        return texture_material(palette, &span.texture, palette.masked_middle);
    }
    if layer - span.bottom < trim_layers || span.top - layer < trim_layers {
        style.trim
    } else {
        texture_material(palette, &span.texture, style.body)
    }
}

// ============================================================================
// LINE STEPPING
// ============================================================================

/// Columns on the integer line between two columns, both ends included
pub fn line_columns(from: (i32, i32), to: (i32, i32)) -> Vec<(i32, i32)> {
    let (mut x, mut z) = from;
    let dx = (to.0 - x).abs();
    let dz = -(to.1 - z).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sz = if z < to.1 { 1 } else { -1 };
    let mut err = dx + dz;

    let mut columns = Vec::with_capacity((dx - dz + 1) as usize);
    loop {
        columns.push((x, z));
        if x == to.0 && z == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dz {
            err += dz;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            z += sz;
        }
    }
    columns
}

fn project_vertex(transform: &MapTransform, x: i16, y: i16) -> (i32, i32) {
    map_to_column(transform, x as f32, y as f32)
}

// ============================================================================
// EXTRUSION
// ============================================================================

/// Paint the walls of `sector` and collect its boundary columns
///
/// `rasters` holds every sector's rasterization, indexed by sector.
pub fn extrude_sector_walls(
    world: &mut dyn HostWorld,
    level: &LevelData,
    sector: usize,
    rasters: &[RasterizedSector],
    config: &ConversionConfig,
) -> ConversionResult<ExtrudedWalls> {
    let own_raster = rasters.get(sector).ok_or(ConversionError::SectorOutOfRange {
        index: sector,
        count: rasters.len(),
    })?;
    let own = own_raster.heights;
    let palette = &config.palette;
    let style = wall_style(palette, own_raster.is_pillar);

    let mut result = ExtrudedWalls {
        sector,
        ..ExtrudedWalls::default()
    };
    let mut seen_boundary: FxHashSet<(i32, i32)> = FxHashSet::default();

    for index in linedefs_of_sector(level, sector) {
        let line = &level.linedefs[index];
        let Some((own_side, neighbor, other_side)) = side_facing(level, line, sector) else {
            continue;
        };
        let Some((start, end)) = linedef_endpoints(level, line) else {
            continue;
        };

        let neighbor_heights = match neighbor {
            Some(n) => match rasters.get(n) {
                Some(raster) => Some(raster.heights),
                None => {
                    log::warn!(
                        "[WallExtruder::extrude_sector_walls] Linedef {} neighbor {} has no raster; treating as one-sided",
                        index,
                        n
                    );
                    None
                }
            },
            None => None,
        };

        let textures = resolve_textures(own_side, other_side);
        let spans = plan_wall_spans(&own, neighbor_heights.as_ref(), &textures);
        let columns = line_columns(
            project_vertex(&config.transform, start.x, start.y),
            project_vertex(&config.transform, end.x, end.y),
        );

        for span in &spans {
            for &(dx, dz) in &columns {
                for y in span.bottom..=span.top {
                    let material = span_material(span, y, &style, palette, config.trim_layers);
                    world
                        .set_voxel(column_voxel(&config.transform, dx, y, dz), material)
                        .context("extrude wall")?;
                    result.voxels_painted += 1;
                }
            }
            result.spans_painted += 1;
        }

        if let (Some(n), Some(heights)) = (neighbor, neighbor_heights) {
            if n == sector {
                continue;
            }
            let wall_material = texture_material(palette, &textures.lower, style.body);
            for &(dx, dz) in &columns {
                if seen_boundary.insert((dx, dz)) {
                    result.boundary.push(BoundaryColumn {
                        dx,
                        dz,
                        neighbor_floor_y: heights.floor_y,
                        wall_material,
                    });
                }
            }
        }
    }

    log::debug!(
        "[WallExtruder::extrude_sector_walls] Sector {}: {} spans, {} voxels, {} boundary columns",
        sector,
        result.spans_painted,
        result.voxels_painted,
        result.boundary.len()
    );
    Ok(result)
}
