//! Actors: the movable (or merely classified) boxes that live in a level

use std::f32::consts::TAU;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::collision::{Bounds, boxes_intersect};
use super::level::Grid;
use super::vector::Vector;
use crate::consts::*;
use crate::error::{SimError, SimResult};

/// Identity of an actor, unique for the lifetime of the process
///
/// Two actors with identical boxes are still different actors; equality of
/// ids is the only notion of "same actor".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u64);

impl ActorId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse actor classification used by collision rules and win checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Actor,
    Player,
    Fireball,
    Coin,
}

/// Sinusoidal bob used by coins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// Current phase (radians)
    pub phase: f32,
    /// Phase advance per second
    pub speed: f32,
    /// Peak vertical offset (tiles)
    pub amplitude: f32,
    /// Rest position the coin bobs around
    pub origin: Vector,
}

impl Spring {
    /// Advance the phase and return the new position
    pub fn advance(&mut self, dt: f32) -> Vector {
        self.phase += self.speed * dt;
        self.origin.plus(self.offset())
    }

    fn offset(&self) -> Vector {
        Vector::new(0.0, self.phase.sin() * self.amplitude)
    }
}

/// Behavior variant of an actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActorKind {
    /// Plain box with no behavior
    Generic,
    /// Input-driven; never acts on its own
    Player,
    /// Fireball with an arbitrary velocity, bounces off obstacles
    Fireball,
    HorizontalFireball,
    VerticalFireball,
    /// Falls, and restarts from `spawn` instead of bouncing
    FireRain { spawn: Vector },
    Coin(Spring),
}

impl ActorKind {
    pub fn actor_type(&self) -> ActorType {
        match self {
            ActorKind::Generic => ActorType::Actor,
            ActorKind::Player => ActorType::Player,
            ActorKind::Fireball
            | ActorKind::HorizontalFireball
            | ActorKind::VerticalFireball
            | ActorKind::FireRain { .. } => ActorType::Fireball,
            ActorKind::Coin(_) => ActorType::Coin,
        }
    }
}

/// An axis-aligned box with a position, size and velocity
#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    id: ActorId,
    pub pos: Vector,
    size: Vector,
    pub speed: Vector,
    pub kind: ActorKind,
}

impl Actor {
    /// A generic actor. Fails if either size component is not positive.
    pub fn new(pos: Vector, size: Vector, speed: Vector) -> SimResult<Self> {
        Self::with_kind(pos, size, speed, ActorKind::Generic)
    }

    pub fn with_kind(pos: Vector, size: Vector, speed: Vector, kind: ActorKind) -> SimResult<Self> {
        // Written so NaN is rejected too
        if !(size.x() > 0.0 && size.y() > 0.0) {
            return Err(SimError::InvalidSize(size));
        }
        Ok(Self {
            id: ActorId::next(),
            pos,
            size,
            speed,
            kind,
        })
    }

    /// Sizes below come from constants known to be positive
    fn spawn(pos: Vector, size: Vector, speed: Vector, kind: ActorKind) -> Self {
        Self {
            id: ActorId::next(),
            pos,
            size,
            speed,
            kind,
        }
    }

    /// Player standing on the given spawn cell
    pub fn player(cell: Vector) -> Self {
        Self::spawn(
            cell.plus(PLAYER_OFFSET.into()),
            PLAYER_SIZE.into(),
            Vector::ZERO,
            ActorKind::Player,
        )
    }

    /// One-tile fireball with an arbitrary velocity
    pub fn fireball(pos: Vector, speed: Vector) -> Self {
        Self::spawn(pos, Vector::new(1.0, 1.0), speed, ActorKind::Fireball)
    }

    pub fn horizontal_fireball(pos: Vector) -> Self {
        Self::spawn(
            pos,
            Vector::new(1.0, 1.0),
            HORIZONTAL_FIREBALL_SPEED.into(),
            ActorKind::HorizontalFireball,
        )
    }

    pub fn vertical_fireball(pos: Vector) -> Self {
        Self::spawn(
            pos,
            Vector::new(1.0, 1.0),
            VERTICAL_FIREBALL_SPEED.into(),
            ActorKind::VerticalFireball,
        )
    }

    pub fn fire_rain(pos: Vector) -> Self {
        Self::spawn(
            pos,
            Vector::new(1.0, 1.0),
            FIRE_RAIN_SPEED.into(),
            ActorKind::FireRain { spawn: pos },
        )
    }

    /// Coin centered in the given cell, with a random starting spring phase
    pub fn coin<R: Rng>(cell: Vector, rng: &mut R) -> Self {
        let origin = cell.plus(COIN_OFFSET.into());
        let spring = Spring {
            phase: rng.random_range(0.0..TAU),
            speed: COIN_SPRING_SPEED,
            amplitude: COIN_SPRING_AMPLITUDE,
            origin,
        };
        Self::spawn(origin, COIN_SIZE.into(), Vector::ZERO, ActorKind::Coin(spring))
    }

    /// Build a generic actor from untyped JSON
    ///
    /// Expects an object with a required `pos` and optional `size` (default
    /// one tile) and `speed` (default zero), each in a form accepted by
    /// [`Vector::from_value`].
    pub fn from_value(value: &Value) -> SimResult<Self> {
        let Value::Object(map) = value else {
            return Err(SimError::type_kind("actor object", value));
        };

        let pos = match map.get("pos") {
            Some(v) => Vector::from_value(v)?,
            None => return Err(SimError::type_kind("actor object with `pos`", value)),
        };
        let size = map
            .get("size")
            .map(Vector::from_value)
            .transpose()?
            .unwrap_or(Vector::new(1.0, 1.0));
        let speed = map
            .get("speed")
            .map(Vector::from_value)
            .transpose()?
            .unwrap_or(Vector::ZERO);

        Self::new(pos, size, speed)
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.id
    }

    #[inline]
    pub fn size(&self) -> Vector {
        self.size
    }

    #[inline]
    pub fn actor_type(&self) -> ActorType {
        self.kind.actor_type()
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x()
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x() + self.size.x()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y() + self.size.y()
    }

    /// Current edges, computed from `pos` and `size` on every call
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.pos, self.size)
    }

    /// Does `other` overlap this actor? An actor never intersects itself.
    pub fn is_intersect(&self, other: &Actor) -> bool {
        if other.id == self.id {
            return false;
        }
        boxes_intersect(&self.bounds(), &other.bounds())
    }

    /// Where a fireball would be after `dt` if nothing is in the way
    pub fn next_position(&self, dt: f32) -> Vector {
        if self.speed.is_zero() {
            return self.pos;
        }
        self.pos.plus(self.speed.times(dt))
    }

    /// Response to a blocked move: fire rain restarts, other fireballs bounce
    pub fn handle_obstacle(&mut self) {
        match self.kind {
            ActorKind::FireRain { spawn } => self.pos = spawn,
            _ => self.speed = self.speed.times(-1.0),
        }
    }

    /// Advance this actor by `dt` seconds
    ///
    /// Moving actors look ahead before committing: the candidate position is
    /// probed against the grid and only taken if nothing is there.
    pub fn act(&mut self, dt: f32, grid: &Grid) {
        match &mut self.kind {
            ActorKind::Generic | ActorKind::Player => {}
            ActorKind::Coin(spring) => {
                self.pos = spring.advance(dt);
            }
            ActorKind::Fireball
            | ActorKind::HorizontalFireball
            | ActorKind::VerticalFireball
            | ActorKind::FireRain { .. } => {
                let next = self.next_position(dt);
                match grid.obstacle_at(next, self.size) {
                    None => self.pos = next,
                    Some(terrain) => {
                        log::debug!("{} blocked by {:?} at {:?}", self.id, terrain, next);
                        self.handle_obstacle();
                    }
                }
            }
        }
    }
}
