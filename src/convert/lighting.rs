//! Light marker placement
//!
//! The 0-255 sector light level becomes one of 16 buckets. Brighter sectors
//! get a sparser marker lattice; a half-spacing lattice of dimmer fillers
//! closes the gaps between primary markers.

use crate::config::LightingConfig;
use crate::constants::lighting::{LIGHT_BUCKETS, LIGHT_SHIFT};

/// Quantized light level, never below the configured baseline
pub fn light_bucket(light_level: u8, config: &LightingConfig) -> u8 {
    (light_level >> LIGHT_SHIFT).max(config.min_bucket).min(LIGHT_BUCKETS - 1)
}

/// Tier index (0 = dimmest) for a bucket
pub fn spacing_tier(bucket: u8, config: &LightingConfig) -> usize {
    let baseline = config.min_bucket.min(LIGHT_BUCKETS - 1) as usize;
    let above = (bucket as usize).saturating_sub(baseline);
    let tiers = config.spacing_tiers.len();
    (above * tiers / (LIGHT_BUCKETS as usize - baseline)).min(tiers - 1)
}

/// Primary marker spacing for a bucket
pub fn marker_spacing(bucket: u8, config: &LightingConfig) -> i32 {
    config.spacing_tiers[spacing_tier(bucket, config)].max(1)
}

/// Light level of the marker at column (dx, dz), if one belongs there
pub fn marker_level_at(dx: i32, dz: i32, bucket: u8, spacing: i32) -> Option<u8> {
    if dx.rem_euclid(spacing) == 0 && dz.rem_euclid(spacing) == 0 {
        return Some(bucket);
    }
    let half = (spacing / 2).max(1);
    if dx.rem_euclid(half) == 0 && dz.rem_euclid(half) == 0 {
        return Some((bucket / 2).max(1));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_respects_baseline() {
        let config = LightingConfig::default();
        assert_eq!(light_bucket(0, &config), config.min_bucket);
        assert_eq!(light_bucket(160, &config), 10);
        assert_eq!(light_bucket(255, &config), 15);
    }

    #[test]
    fn test_brighter_is_never_denser() {
        let config = LightingConfig::default();
        let mut previous = 0;
        for level in 0..=255u8 {
            let spacing = marker_spacing(light_bucket(level, &config), &config);
            assert!(spacing >= previous);
            previous = spacing;
        }
        assert_eq!(marker_spacing(config.min_bucket, &config), config.spacing_tiers[0]);
        assert_eq!(marker_spacing(15, &config), config.spacing_tiers[5]);
    }

    #[test]
    fn test_primary_and_filler_lattices() {
        assert_eq!(marker_level_at(0, 0, 10, 6), Some(10));
        assert_eq!(marker_level_at(-6, 12, 10, 6), Some(10));
        assert_eq!(marker_level_at(3, 0, 10, 6), Some(5));
        assert_eq!(marker_level_at(3, 3, 10, 6), Some(5));
        assert_eq!(marker_level_at(1, 0, 10, 6), None);
        // Spacing 1 leaves no room for fillers
        assert_eq!(marker_level_at(7, 3, 4, 1), Some(4));
    }
}
