//! Mover Data - Pure DOP
//!
//! NO METHODS. Just data.

use super::door_data::DoorData;
use super::lift_data::LiftData;
use crate::physics::EntityId;
use serde::{Deserialize, Serialize};

/// Movement speed of a mover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedClass {
    Slow,
    Normal,
    Fast,
}

/// A door or lift owned by the level simulation
#[derive(Debug, Clone, PartialEq)]
pub enum Mover {
    Door(DoorData),
    Lift(LiftData),
}

/// Something observable that happened during a tick or an activation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoverEvent {
    DoorOpened { sector: usize },
    DoorClosed { sector: usize },
    /// The auto-close re-check found the doorway obstructed
    DoorCloseSkipped { sector: usize },
    LiftLowering { sector: usize },
    LiftReachedBottom { sector: usize },
    LiftRising { sector: usize },
    LiftReachedTop { sector: usize },
    EntityCrushed { sector: usize, entity: EntityId, damage: f32 },
    EntityTeleported { sector: usize, entity: EntityId },
}
