//! Conversion configuration
//!
//! Every tunable of the rasterizer, extruder and movers, with defaults from
//! `constants`. Loadable from TOML; missing keys take their defaults.

use crate::constants::{conversion, lighting, movers, pillar};
use crate::geometry::MapTransform;
use crate::world::core::palette::role_materials;
use crate::world::MaterialPalette;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Light marker placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Buckets below this are raised to it
    pub min_bucket: u8,
    /// Marker spacing per brightness tier, dimmest first
    pub spacing_tiers: [i32; 6],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            min_bucket: lighting::MIN_LIGHT_BUCKET,
            spacing_tiers: lighting::SPACING_TIERS,
        }
    }
}

/// Thresholds below which a sector counts as a pillar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PillarThresholds {
    pub max_cells: usize,
    pub max_footprint: i32,
}

impl Default for PillarThresholds {
    fn default() -> Self {
        Self {
            max_cells: pillar::MAX_CELLS,
            max_footprint: pillar::MAX_FOOTPRINT,
        }
    }
}

/// Door and lift timing and entity handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverConfig {
    pub lift_wait_ticks: u64,
    pub door_close_delay_ticks: u64,
    pub crush_margin: f32,
    pub crush_damage_per_layer: f32,
    pub standing_epsilon: f32,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            lift_wait_ticks: movers::DEFAULT_LIFT_WAIT_TICKS,
            door_close_delay_ticks: movers::DEFAULT_DOOR_CLOSE_DELAY_TICKS,
            crush_margin: movers::CRUSH_MARGIN,
            crush_damage_per_layer: movers::CRUSH_DAMAGE_PER_LAYER,
            standing_epsilon: movers::STANDING_EPSILON,
        }
    }
}

/// Configuration for converting one level and simulating its movers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub transform: MapTransform,
    pub min_clearance_layers: i32,
    pub trim_layers: i32,
    pub lighting: LightingConfig,
    pub pillar: PillarThresholds,
    pub movers: MoverConfig,
    pub palette: MaterialPalette,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            transform: MapTransform::default(),
            min_clearance_layers: conversion::MIN_CLEARANCE_LAYERS,
            trim_layers: conversion::TRIM_LAYERS,
            lighting: LightingConfig::default(),
            pillar: PillarThresholds::default(),
            movers: MoverConfig::default(),
            palette: MaterialPalette::default(),
        }
    }
}

impl ConversionConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let u = self.transform.units_per_voxel;
        if !(u.is_finite() && u > 0.0) {
            return Err(anyhow::anyhow!(
                "ConversionConfig: transform.units_per_voxel must be positive, got {}",
                u
            ));
        }

        if self.min_clearance_layers < 2 {
            return Err(anyhow::anyhow!(
                "ConversionConfig: min_clearance_layers {} leaves no interior (min 2)",
                self.min_clearance_layers
            ));
        }

        if self.trim_layers < 0 {
            return Err(anyhow::anyhow!("ConversionConfig: trim_layers cannot be negative"));
        }

        if self.lighting.min_bucket > 15 {
            return Err(anyhow::anyhow!(
                "ConversionConfig: lighting.min_bucket {} exceeds 15",
                self.lighting.min_bucket
            ));
        }

        let tiers = &self.lighting.spacing_tiers;
        if tiers[0] < 1 || tiers.windows(2).any(|w| w[1] < w[0]) {
            return Err(anyhow::anyhow!(
                "ConversionConfig: lighting.spacing_tiers {:?} must be positive and non-decreasing",
                tiers
            ));
        }

        let m = &self.movers;
        if m.crush_margin < 0.0 || m.crush_damage_per_layer < 0.0 || m.standing_epsilon < 0.0 {
            return Err(anyhow::anyhow!(
                "ConversionConfig: movers crush_margin, crush_damage_per_layer and standing_epsilon cannot be negative"
            ));
        }

        for (role, material) in role_materials(&self.palette) {
            if material.is_air() {
                return Err(anyhow::anyhow!("ConversionConfig: palette.{} cannot be air", role));
            }
        }
        if self.palette.light_base.is_air() || self.palette.light_base.0 > u16::MAX - 15 {
            return Err(anyhow::anyhow!(
                "ConversionConfig: palette.light_base {} leaves no room for 16 markers",
                self.palette.light_base.0
            ));
        }

        log::debug!("[ConversionConfig] Configuration validated successfully");
        Ok(())
    }

    /// Parse from TOML text and validate
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ConversionConfig =
            toml::from_str(text).context("ConversionConfig: malformed TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("ConversionConfig: cannot read {}", path.display()))?;
        let config = Self::from_toml_str(&text)?;
        log::info!("[ConversionConfig::load] Loaded {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::MaterialId;
    use std::io::Write;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_defaults_validate() {
        init_logging();
        assert!(ConversionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = ConversionConfig::default();
        config.transform.units_per_voxel = 0.0;
        assert!(config.validate().is_err());

        let mut config = ConversionConfig::default();
        config.min_clearance_layers = 1;
        assert!(config.validate().is_err());

        let mut config = ConversionConfig::default();
        config.lighting.spacing_tiers = [3, 4, 2, 6, 8, 10];
        assert!(config.validate().is_err());

        let mut config = ConversionConfig::default();
        config.lighting.min_bucket = 16;
        assert!(config.validate().is_err());

        let mut config = ConversionConfig::default();
        config.movers.crush_margin = -1.0;
        assert!(config.validate().is_err());

        let mut config = ConversionConfig::default();
        config.palette.wall_body = MaterialId::AIR;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("wall_body"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConversionConfig::from_toml_str(
            r#"
            min_clearance_layers = 4

            [transform]
            units_per_voxel = 64.0

            [movers]
            lift_wait_ticks = 35

            [palette.textures]
            STARTAN3 = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.transform.units_per_voxel, 64.0);
        assert_eq!(config.min_clearance_layers, 4);
        assert_eq!(config.movers.lift_wait_ticks, 35);
        assert_eq!(config.movers.door_close_delay_ticks, movers::DEFAULT_DOOR_CLOSE_DELAY_TICKS);
        assert_eq!(config.palette.textures.get("STARTAN3"), Some(&MaterialId::PLANKS));
        assert_eq!(config.lighting, LightingConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        init_logging();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "trim_layers = 1").unwrap();
        writeln!(file, "[pillar]").unwrap();
        writeln!(file, "max_cells = 9").unwrap();

        let config = ConversionConfig::load(file.path()).unwrap();
        assert_eq!(config.trim_layers, 1);
        assert_eq!(config.pillar.max_cells, 9);
        assert_eq!(config.pillar.max_footprint, pillar::MAX_FOOTPRINT);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(ConversionConfig::from_toml_str("min_clearance_layers = 1").is_err());
        assert!(ConversionConfig::from_toml_str("min_clearance_layers = [").is_err());
    }
}
