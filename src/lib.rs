//! Tile Platformer - a grid-based platformer simulation kernel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, actors, level, per-tick driver)
//! - `parser`: Level plan text to grid + actor list
//! - `settings`: Demo runner configuration
//! - `error`: Crate-wide error type

pub mod error;
pub mod parser;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use parser::{ActorSymbol, Legend, LevelParser};
pub use settings::Settings;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the demo runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Time a finished level keeps running before the driver treats it as over
    pub const FINISH_DELAY: f32 = 1.0;

    /// Fireball velocities (tiles per second)
    pub const HORIZONTAL_FIREBALL_SPEED: (f32, f32) = (2.0, 0.0);
    pub const VERTICAL_FIREBALL_SPEED: (f32, f32) = (0.0, 2.0);
    pub const FIRE_RAIN_SPEED: (f32, f32) = (0.0, 3.0);

    /// Coin spring oscillation
    pub const COIN_SPRING_SPEED: f32 = 8.0;
    pub const COIN_SPRING_AMPLITUDE: f32 = 0.07;
    /// Offset from the spawn cell so the coin sits centered in its tile
    pub const COIN_OFFSET: (f32, f32) = (0.2, 0.1);
    pub const COIN_SIZE: (f32, f32) = (0.6, 0.6);

    /// Player box - taller than one tile, lifted half a tile above the spawn cell
    pub const PLAYER_OFFSET: (f32, f32) = (0.0, -0.5);
    pub const PLAYER_SIZE: (f32, f32) = (0.8, 1.5);
}
