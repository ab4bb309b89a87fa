//! Level Simulation - load, trigger and tick one converted level
//!
//! `LevelSimulation` owns the per-level state (rasters, walls, sound graph,
//! movers). Linedef specials map to `Action`s through `classify_special`.

pub mod level_simulation;
pub mod specials;


pub use level_simulation::{LevelSimulation, LoadStats};
pub use specials::{classify_special, Action, SpecialKind};
