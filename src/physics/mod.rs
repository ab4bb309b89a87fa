//! Physics Module - occupant bounding boxes

pub mod aabb;

// Simple re-exports
pub use aabb::AABB;

/// Entity ID type
pub type EntityId = u32;
