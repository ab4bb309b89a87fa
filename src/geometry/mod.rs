//! Geometry Module - sector polygons and the map/voxel transform

pub mod polygon_data;
pub mod polygon_operations;
pub mod transform;

pub use polygon_data::{DirectedEdge, MapBounds, SectorPolygon};
pub use polygon_operations::{
    build_all_polygons, build_sector_polygon, chain_edges, collect_sector_edges, is_locatable,
    locate_sector, point_inside, polygon_bounds,
};
pub use transform::{
    column_center_to_map, column_voxel, height_to_layer, map_to_column, voxel_space_to_map,
    MapTransform,
};
