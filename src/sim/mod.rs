//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only (coin spring phases)
//! - Stable iteration order (actor list order)
//! - No rendering, input or platform dependencies

pub mod actor;
pub mod collision;
pub mod level;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorId, ActorKind, ActorType, Spring};
pub use collision::{Bounds, boxes_intersect, probe_terrain};
pub use level::{Grid, Level, ObjectKind, Status, Terrain};
pub use tick::{TickInput, TickReport, Touch, tick};
pub use vector::Vector;
