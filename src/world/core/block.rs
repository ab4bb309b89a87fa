use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;
use std::fmt;

/// Unique identifier for a voxel material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MaterialId(pub u16);

// Safe because MaterialId is just a u16
unsafe impl bytemuck::Pod for MaterialId {}
unsafe impl bytemuck::Zeroable for MaterialId {}

const_assert_eq!(std::mem::size_of::<MaterialId>(), 2);

impl Default for MaterialId {
    fn default() -> Self {
        MaterialId::AIR
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display material name if it's a known material
        match *self {
            MaterialId::AIR => write!(f, "Air"),
            MaterialId::STONE => write!(f, "Stone"),
            MaterialId::SMOOTH_STONE => write!(f, "Smooth Stone"),
            MaterialId::STONE_BRICK => write!(f, "Stone Brick"),
            MaterialId::BRICK => write!(f, "Brick"),
            MaterialId::PLANKS => write!(f, "Planks"),
            MaterialId::POLISHED_STONE => write!(f, "Polished Stone"),
            MaterialId::QUARTZ => write!(f, "Quartz"),
            MaterialId::IRON_BARS => write!(f, "Iron Bars"),
            MaterialId::DOOR_LOWER => write!(f, "Door (lower)"),
            MaterialId::DOOR_UPPER => write!(f, "Door (upper)"),
            id if id.0 >= MaterialId::LIGHT_BASE.0 && id.0 < MaterialId::LIGHT_BASE.0 + 16 => {
                write!(f, "Light({})", id.0 - MaterialId::LIGHT_BASE.0)
            }
            _ => write!(f, "Material({})", self.0),
        }
    }
}

impl MaterialId {
    pub const AIR: MaterialId = MaterialId(0);
    pub const STONE: MaterialId = MaterialId(1);
    pub const SMOOTH_STONE: MaterialId = MaterialId(2);
    pub const STONE_BRICK: MaterialId = MaterialId(3);
    pub const BRICK: MaterialId = MaterialId(4);
    pub const PLANKS: MaterialId = MaterialId(5);
    pub const POLISHED_STONE: MaterialId = MaterialId(6);
    pub const QUARTZ: MaterialId = MaterialId(7);
    pub const IRON_BARS: MaterialId = MaterialId(8);
    pub const DOOR_LOWER: MaterialId = MaterialId(9);
    pub const DOOR_UPPER: MaterialId = MaterialId(10);
    /// First of 16 consecutive light marker ids (levels 0-15)
    pub const LIGHT_BASE: MaterialId = MaterialId(100);

    /// Create a new MaterialId from a raw u16 value
    pub const fn new(id: u16) -> Self {
        MaterialId(id)
    }

    pub const fn is_air(self) -> bool {
        self.0 == 0
    }
}
