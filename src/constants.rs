//! Default constants for level conversion and mover simulation
//!
//! Grouped by the subsystem that consumes them. Every value here is only a
//! default: the effective value is read from `ConversionConfig`.

/// Voxel storage constants
pub mod core {
    /// Edge length of a chunk in the in-memory world
    pub const CHUNK_SIZE: u32 = 16;

    /// Default vertical bounds of the in-memory world
    pub const DEFAULT_MIN_Y: i32 = -256;
    pub const DEFAULT_MAX_Y: i32 = 511;
}

/// Source level format constants
pub mod level {
    /// Sidedef index meaning "no sidedef"
    pub const NO_SIDEDEF: i32 = -1;

    /// Linedef flags
    pub const ML_BLOCKING: u16 = 0x0001;
    pub const ML_TWO_SIDED: u16 = 0x0004;
    pub const ML_SOUND_BLOCK: u16 = 0x0040;

    /// Texture name used for "no texture"
    pub const NO_TEXTURE: &str = "-";
}

/// Rasterization constants
pub mod conversion {
    /// Map units covered by one voxel edge
    pub const DEFAULT_UNITS_PER_VOXEL: f32 = 16.0;

    /// Interior clearance never drops below this many layers
    pub const MIN_CLEARANCE_LAYERS: i32 = 3;

    /// Layers at each end of a wall span painted with the trim material
    pub const TRIM_LAYERS: i32 = 2;
}

/// Lighting constants
pub mod lighting {
    /// 0-255 light level >> LIGHT_SHIFT gives one of LIGHT_BUCKETS buckets
    pub const LIGHT_SHIFT: u8 = 4;
    pub const LIGHT_BUCKETS: u8 = 16;

    /// No sector interior is darker than this bucket
    pub const MIN_LIGHT_BUCKET: u8 = 4;

    /// Light marker spacing per brightness tier, dimmest first
    pub const SPACING_TIERS: [i32; 6] = [3, 4, 5, 6, 8, 10];
}

/// Pillar classification thresholds
pub mod pillar {
    /// A pillar fills fewer cells than this
    pub const MAX_CELLS: usize = 16;

    /// and its bounding footprint (width * depth, in columns) is below this
    pub const MAX_FOOTPRINT: i32 = 25;
}

/// Mover constants
pub mod movers {
    /// Ticks per layer for each speed class
    pub const TICKS_PER_LAYER_SLOW: u64 = 4;
    pub const TICKS_PER_LAYER_NORMAL: u64 = 2;
    pub const TICKS_PER_LAYER_FAST: u64 = 1;

    /// Ticks a lift rests at the bottom before rising again
    pub const DEFAULT_LIFT_WAIT_TICKS: u64 = 60;

    /// Ticks before an auto-closing door re-checks and closes
    pub const DEFAULT_DOOR_CLOSE_DELAY_TICKS: u64 = 150;

    /// Ceiling penetration (in layers) tolerated before an entity is crushed
    pub const CRUSH_MARGIN: f32 = 0.25;

    /// Damage per layer of ceiling penetration
    pub const CRUSH_DAMAGE_PER_LAYER: f32 = 10.0;

    /// Vertical tolerance for "standing on the floor"
    pub const STANDING_EPSILON: f32 = 0.05;
}
