//! Line specials and the actions they trigger

use crate::movers::SpeedClass;
use crate::physics::EntityId;

/// Mover behaviour a linedef special asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKind {
    /// Door in the sector behind the line, used directly
    ///
    /// Doors toggle in a single step, so fast and normal door specials
    /// classify the same.
    ManualDoor { auto_close: bool },
    /// Doors in every sector carrying the line's tag
    TaggedDoor { auto_close: bool },
    /// Lifts in every sector carrying the line's tag
    Lift { speed: SpeedClass },
    /// Teleport into the first sector carrying the line's tag
    Teleport { monsters_only: bool },
}

/// Trigger requests dispatched by `LevelSimulation::execute`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleDoor { sector: usize },
    ToggleDoorsByTag { tag: u16 },
    ActivateLift { tag: u16 },
    Teleport { tag: u16, entity: EntityId },
}

/// Classify a linedef special; unknown specials give None
pub fn classify_special(special_type: u16) -> Option<SpecialKind> {
    use SpeedClass::{Fast, Normal};

    let kind = match special_type {
        // Use-activated doors, keyed variants included
        1 | 26 | 27 | 28 | 117 => SpecialKind::ManualDoor { auto_close: true },
        31 | 32 | 33 | 34 | 118 => SpecialKind::ManualDoor { auto_close: false },

        // Tagged doors (walk, switch and repeatable forms)
        4 | 29 | 63 | 90 | 105 | 108 | 114 => SpecialKind::TaggedDoor { auto_close: true },
        2 | 61 | 86 | 103 | 106 | 109 | 112 | 115 => SpecialKind::TaggedDoor { auto_close: false },

        // Lower-wait-raise lifts
        10 | 21 | 62 | 88 => SpecialKind::Lift { speed: Normal },
        120..=123 => SpecialKind::Lift { speed: Fast },

        39 | 97 => SpecialKind::Teleport { monsters_only: false },
        125 | 126 => SpecialKind::Teleport { monsters_only: true },

        _ => return None,
    };
    Some(kind)
}
