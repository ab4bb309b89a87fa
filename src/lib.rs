// Sector Voxel - Data-Oriented Programming (DOP) Architecture
//
// Converts a decoded sector/linedef level into voxels and runs its doors and
// lifts against a host-owned voxel world.
//
// For new code, prefer:
// - *_data modules for plain state
// - *_operations modules for transformations over that state
// - world::HostWorld for every grid or entity change

// Constants module
pub mod constants;

// Core modules
pub mod config;
pub mod error;

// Source level and host world
pub mod level;
pub mod physics;
pub mod world;

// Conversion pipeline
pub mod convert;
pub mod geometry;
pub mod sound;

// Runtime
pub mod movers;
pub mod simulation;

pub use config::{ConversionConfig, LightingConfig, MoverConfig, PillarThresholds};
pub use error::{ConversionError, ConversionResult, ErrorContext, OptionExt};
pub use level::{LevelData, Linedef, Sector, Sidedef, Vertex};
pub use physics::{EntityId, AABB};
pub use world::{
    DamageCause, EntityRef, HostWorld, MaterialId, MaterialPalette, MemoryWorld, VoxelPos, WorldError,
};

// === Conversion ===
pub use convert::{ExtrudedWalls, FloorCell, RasterizedSector, SectorHeights};
pub use geometry::{MapTransform, SectorPolygon};
pub use sound::SectorSoundGraph;

// === Runtime ===
pub use movers::{DoorData, DoorState, LiftData, LiftState, Mover, MoverEvent, SpeedClass};
pub use simulation::{classify_special, Action, LevelSimulation, LoadStats, SpecialKind};

/// Convert `level` into `world` and prepare its movers
///
/// Shorthand for `LevelSimulation::load`; the returned simulation is dropped
/// when the level unloads.
pub fn load_level(
    level: &LevelData,
    world: &mut dyn HostWorld,
    config: ConversionConfig,
) -> ConversionResult<LevelSimulation> {
    LevelSimulation::load(level, world, config)
}
