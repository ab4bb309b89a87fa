//! Material Palette - Pure DOP
//!
//! Maps every painted role (floor, ceiling, wall trim/body, door halves,
//! light markers) to a material id, plus per-texture overrides.

use super::MaterialId;
use crate::constants::level::NO_TEXTURE;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Material roles used by the converter and movers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialPalette {
    pub floor: MaterialId,
    pub ceiling: MaterialId,
    pub wall_trim: MaterialId,
    pub wall_body: MaterialId,
    pub pillar_trim: MaterialId,
    pub pillar_body: MaterialId,
    /// See-through middle texture on two-sided lines (bars, grates)
    pub masked_middle: MaterialId,
    pub door_lower: MaterialId,
    pub door_upper: MaterialId,
    /// First of 16 consecutive light marker ids
    pub light_base: MaterialId,
    /// Texture or flat name -> material
    pub textures: FxHashMap<String, MaterialId>,
}

impl Default for MaterialPalette {
    fn default() -> Self {
        Self {
            floor: MaterialId::SMOOTH_STONE,
            ceiling: MaterialId::STONE,
            wall_trim: MaterialId::POLISHED_STONE,
            wall_body: MaterialId::STONE_BRICK,
            pillar_trim: MaterialId::QUARTZ,
            pillar_body: MaterialId::BRICK,
            masked_middle: MaterialId::IRON_BARS,
            door_lower: MaterialId::DOOR_LOWER,
            door_upper: MaterialId::DOOR_UPPER,
            light_base: MaterialId::LIGHT_BASE,
            textures: FxHashMap::default(),
        }
    }
}

/// Whether a texture/flat name denotes an actual texture
pub fn has_texture(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed != NO_TEXTURE
}

/// Material for a texture name, or `fallback` when unmapped or absent
pub fn texture_material(palette: &MaterialPalette, texture: &str, fallback: MaterialId) -> MaterialId {
    if !has_texture(texture) {
        return fallback;
    }
    palette
        .textures
        .get(texture.trim())
        .copied()
        .unwrap_or(fallback)
}

/// Light marker material for a 0-15 light level
pub fn light_marker(palette: &MaterialPalette, level: u8) -> MaterialId {
    MaterialId(palette.light_base.0 + level.min(15) as u16)
}

/// Whether a material is one of the 16 light markers
pub fn is_light_marker(palette: &MaterialPalette, material: MaterialId) -> bool {
    material.0 >= palette.light_base.0 && material.0 < palette.light_base.0 + 16
}

/// All role materials, for validation
pub fn role_materials(palette: &MaterialPalette) -> [(&'static str, MaterialId); 9] {
    [
        ("floor", palette.floor),
        ("ceiling", palette.ceiling),
        ("wall_trim", palette.wall_trim),
        ("wall_body", palette.wall_body),
        ("pillar_trim", palette.pillar_trim),
        ("pillar_body", palette.pillar_body),
        ("masked_middle", palette.masked_middle),
        ("door_lower", palette.door_lower),
        ("door_upper", palette.door_upper),
    ]
}
