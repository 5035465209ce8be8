//! Level state: static terrain grid, live actors, and the win/loss machine
//!
//! The level exclusively owns its grid and actors. Actors never point back at
//! the level; anything an actor needs from it (terrain lookups) is passed in.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorType};
use super::collision::{Bounds, probe_terrain};
use super::vector::Vector;
use crate::consts::FINISH_DELAY;

/// Static cell contents. Empty cells are `None` in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Wall,
    Lava,
}

/// Terminal outcome of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Won,
    Lost,
}

/// Anything the player can touch: terrain or another actor's type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Wall,
    Lava,
    Actor,
    Player,
    Fireball,
    Coin,
}

impl From<Terrain> for ObjectKind {
    fn from(terrain: Terrain) -> Self {
        match terrain {
            Terrain::Wall => ObjectKind::Wall,
            Terrain::Lava => ObjectKind::Lava,
        }
    }
}

impl From<ActorType> for ObjectKind {
    fn from(actor_type: ActorType) -> Self {
        match actor_type {
            ActorType::Actor => ObjectKind::Actor,
            ActorType::Player => ObjectKind::Player,
            ActorType::Fireball => ObjectKind::Fireball,
            ActorType::Coin => ObjectKind::Coin,
        }
    }
}

/// Row-major terrain grid; rows may have different lengths
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Option<Terrain>>>,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<Option<Terrain>>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Option<Terrain>>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Longest row length, recomputed on each call
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Terrain at (row, col); out-of-range cells are empty
    pub fn cell(&self, row: usize, col: usize) -> Option<Terrain> {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Overwrite a cell, growing the grid with empty cells as needed
    pub fn set_cell(&mut self, row: usize, col: usize, terrain: Option<Terrain>) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, None);
        }
        cells[col] = terrain;
    }

    /// Terrain a box of `size` at `pos` would touch, if any
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Terrain> {
        probe_terrain(self, &Bounds::new(pos, size))
    }
}

/// A single playable level
#[derive(Debug, Clone, Serialize)]
pub struct Level {
    grid: Grid,
    actors: Vec<Actor>,
    player: Option<ActorId>,
    status: Option<Status>,
    finish_delay: f32,
}

impl Level {
    /// Build a level; the first player-typed actor becomes the player
    pub fn new(grid: Grid, actors: Vec<Actor>) -> Self {
        let mut players = actors
            .iter()
            .filter(|a| a.actor_type() == ActorType::Player)
            .map(Actor::id);
        let player = players.next();
        let extra = players.count();
        if extra > 0 {
            log::warn!("Level has {} extra player actors; using the first", extra);
        }

        Self {
            grid,
            actors,
            player,
            status: None,
            finish_delay: FINISH_DELAY,
        }
    }

    /// Override the post-finish hold time (defaults to [`FINISH_DELAY`])
    pub fn with_finish_delay(mut self, finish_delay: f32) -> Self {
        self.finish_delay = finish_delay;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn finish_delay(&self) -> f32 {
        self.finish_delay
    }

    pub fn player_id(&self) -> Option<ActorId> {
        self.player
    }

    pub fn player(&self) -> Option<&Actor> {
        self.player.and_then(|id| self.actor(id))
    }

    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        let id = self.player?;
        self.actors.iter_mut().find(|a| a.id() == id)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id() == id)
    }

    /// True once a status is set and the finish delay has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.finish_delay < 0.0
    }

    /// Count down the finish delay; does nothing while the level is running
    pub fn advance_finish_delay(&mut self, dt: f32) {
        if self.status.is_some() {
            self.finish_delay -= dt;
        }
    }

    /// First actor (in list order) that `actor` intersects
    pub fn actor_at(&self, actor: &Actor) -> Option<&Actor> {
        self.actors.iter().find(|other| actor.is_intersect(other))
    }

    /// Every actor `actor` intersects, in list order
    pub fn actors_touching(&self, actor: &Actor) -> Vec<(ActorId, ActorType)> {
        self.actors
            .iter()
            .filter(|other| actor.is_intersect(other))
            .map(|other| (other.id(), other.actor_type()))
            .collect()
    }

    /// Terrain a box of `size` at `pos` would touch, if any
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Terrain> {
        self.grid.obstacle_at(pos, size)
    }

    /// Remove an actor by identity; returns it if it was present
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.actors.iter().position(|a| a.id() == id)?;
        Some(self.actors.remove(index))
    }

    /// True if no remaining actor has the given type
    pub fn no_more_actors(&self, actor_type: ActorType) -> bool {
        !self.actors.iter().any(|a| a.actor_type() == actor_type)
    }

    /// Apply the effect of the player touching something
    ///
    /// Lava and fireballs lose the level. Touching a coin collects it, and
    /// collecting the last coin wins. Once a status is set this is a no-op.
    pub fn player_touched(&mut self, kind: ObjectKind, actor: Option<ActorId>) {
        if self.status.is_some() {
            return;
        }

        if matches!(kind, ObjectKind::Lava | ObjectKind::Fireball) {
            self.status = Some(Status::Lost);
            log::info!("Level lost ({:?})", kind);
        }

        if kind == ObjectKind::Coin {
            if let Some(id) = actor {
                self.remove_actor(id);
            }
            if self.no_more_actors(ActorType::Coin) {
                self.status = Some(Status::Won);
                log::info!("Level won - all coins collected");
            }
        }
    }

    /// Advance every non-player actor by `dt`, in list order
    pub fn act(&mut self, dt: f32) {
        let grid = &self.grid;
        for actor in self.actors.iter_mut() {
            if actor.actor_type() != ActorType::Player {
                actor.act(dt, grid);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|r| {
                    r.chars()
                        .map(|c| match c {
                            'x' => Some(Terrain::Wall),
                            '!' => Some(Terrain::Lava),
                            _ => None,
                        })
                        .collect()
                })
                .collect(),
        )
    }

    fn coin(x: f32, y: f32) -> Actor {
        let mut rng = Pcg32::seed_from_u64(42);
        Actor::coin(Vector::new(x, y), &mut rng)
    }

    #[test]
    fn test_empty_level() {
        let level = Level::new(Grid::default(), Vec::new());
        assert_eq!(level.height(), 0);
        assert_eq!(level.width(), 0);
        assert_eq!(level.status(), None);
        assert_eq!(level.finish_delay(), 1.0);
        assert!(level.player().is_none());
        assert!(!level.is_finished());
    }

    #[test]
    fn test_dimensions_from_ragged_grid() {
        let level = Level::new(grid(&["xx", "xxxxx", "x"]), Vec::new());
        assert_eq!(level.height(), 3);
        assert_eq!(level.width(), 5);
    }

    #[test]
    fn test_width_tracks_grid_edits() {
        let mut level = Level::new(grid(&["   ", "   "]), Vec::new());
        assert_eq!(level.width(), 3);

        level.grid_mut().set_cell(1, 6, Some(Terrain::Wall));
        assert_eq!(level.width(), 7);
        assert_eq!(level.grid().cell(1, 6), Some(Terrain::Wall));
        assert_eq!(level.grid().cell(1, 5), None);

        level.grid_mut().set_cell(3, 0, Some(Terrain::Lava));
        assert_eq!(level.height(), 4);
    }

    #[test]
    fn test_player_is_first_player_actor() {
        let first = Actor::player(Vector::new(1.0, 1.0));
        let second = Actor::player(Vector::new(3.0, 1.0));
        let first_id = first.id();
        let actors = vec![coin(0.0, 0.0), first, second];

        let level = Level::new(grid(&["     ", "     ", "     "]), actors);
        assert_eq!(level.player_id(), Some(first_id));
        assert_eq!(level.player().map(Actor::id), Some(first_id));
    }

    #[test]
    fn test_actor_at_returns_first_match_in_order() {
        let probe = Actor::new(Vector::new(1.0, 1.0), Vector::new(2.0, 2.0), Vector::ZERO).unwrap();
        let far = Actor::new(Vector::new(10.0, 10.0), Vector::new(1.0, 1.0), Vector::ZERO).unwrap();
        let a = Actor::new(Vector::new(2.0, 2.0), Vector::new(1.0, 1.0), Vector::ZERO).unwrap();
        let b = Actor::new(Vector::new(1.5, 1.5), Vector::new(1.0, 1.0), Vector::ZERO).unwrap();
        let a_id = a.id();
        let b_id = b.id();

        let level = Level::new(Grid::default(), vec![far, a, b]);
        assert_eq!(level.actor_at(&probe).map(Actor::id), Some(a_id));
        assert_eq!(
            level.actors_touching(&probe),
            vec![(a_id, ActorType::Actor), (b_id, ActorType::Actor)]
        );

        let lonely = Actor::new(Vector::new(20.0, 20.0), Vector::new(1.0, 1.0), Vector::ZERO).unwrap();
        assert!(level.actor_at(&lonely).is_none());
    }

    #[test]
    fn test_actor_at_skips_the_probe_itself() {
        let only = Actor::new(Vector::new(1.0, 1.0), Vector::new(1.0, 1.0), Vector::ZERO).unwrap();
        let level = Level::new(Grid::default(), vec![only.clone()]);
        assert!(level.actor_at(&only).is_none());
    }

    #[test]
    fn test_obstacle_at_delegates_to_grid() {
        let level = Level::new(grid(&["     ", " x   ", "     "]), Vec::new());
        assert_eq!(
            level.obstacle_at(Vector::new(1.0, 1.0), Vector::new(1.0, 1.0)),
            Some(Terrain::Wall)
        );
        assert_eq!(
            level.obstacle_at(Vector::new(2.0, 1.0), Vector::new(1.0, 1.0)),
            None
        );
        assert_eq!(
            level.obstacle_at(Vector::new(2.0, 1.5), Vector::new(1.0, 1.0)),
            Some(Terrain::Lava)
        );
    }

    #[test]
    fn test_remove_actor_by_identity() {
        let a = Actor::new(Vector::ZERO, Vector::new(1.0, 1.0), Vector::ZERO).unwrap();
        let twin = Actor::new(Vector::ZERO, Vector::new(1.0, 1.0), Vector::ZERO).unwrap();
        let a_id = a.id();
        let twin_id = twin.id();
        let mut level = Level::new(Grid::default(), vec![a, twin]);

        assert_eq!(level.remove_actor(a_id).map(|a| a.id()), Some(a_id));
        assert_eq!(level.actors().len(), 1);
        assert_eq!(level.actors()[0].id(), twin_id);

        // Absent: no-op
        assert!(level.remove_actor(a_id).is_none());
        assert_eq!(level.actors().len(), 1);
    }

    #[test]
    fn test_no_more_actors() {
        let level = Level::new(Grid::default(), vec![coin(1.0, 1.0)]);
        assert!(!level.no_more_actors(ActorType::Coin));
        assert!(level.no_more_actors(ActorType::Fireball));
    }

    #[test]
    fn test_collecting_last_coin_wins() {
        let the_coin = coin(1.0, 1.0);
        let id = the_coin.id();
        let mut level = Level::new(grid(&["x x", "   ", "x x"]), vec![the_coin]);

        level.player_touched(ObjectKind::Coin, Some(id));

        assert!(level.actors().is_empty());
        assert_eq!(level.status(), Some(Status::Won));
    }

    #[test]
    fn test_collecting_one_of_two_coins_keeps_playing() {
        let first = coin(1.0, 1.0);
        let second = coin(2.0, 1.0);
        let first_id = first.id();
        let second_id = second.id();
        let mut level = Level::new(grid(&["    ", "    "]), vec![first, second]);

        level.player_touched(ObjectKind::Coin, Some(first_id));
        assert_eq!(level.status(), None);
        assert_eq!(level.actors().len(), 1);

        level.player_touched(ObjectKind::Coin, Some(second_id));
        assert_eq!(level.status(), Some(Status::Won));
    }

    #[test]
    fn test_lava_loses_and_freezes_status() {
        let other_coin = coin(1.0, 1.0);
        let coin_id = other_coin.id();
        let bystander = Actor::new(Vector::ZERO, Vector::new(1.0, 1.0), Vector::ZERO).unwrap();
        let bystander_id = bystander.id();
        let mut level = Level::new(grid(&["   ", "   "]), vec![other_coin, bystander]);

        level.player_touched(ObjectKind::Lava, Some(bystander_id));
        assert_eq!(level.status(), Some(Status::Lost));

        level.player_touched(ObjectKind::Coin, Some(coin_id));
        assert_eq!(level.status(), Some(Status::Lost));
        assert_eq!(level.actors().len(), 2);
    }

    #[test]
    fn test_fireball_loses() {
        let mut level = Level::new(grid(&["   "]), Vec::new());
        level.player_touched(ObjectKind::Fireball, None);
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_harmless_touches_change_nothing() {
        let c = coin(1.0, 1.0);
        let mut level = Level::new(grid(&["   "]), vec![c]);
        level.player_touched(ObjectKind::Wall, None);
        level.player_touched(ObjectKind::Actor, None);
        assert_eq!(level.status(), None);
        assert_eq!(level.actors().len(), 1);
    }

    #[test]
    fn test_is_finished_waits_for_delay() {
        let mut level = Level::new(grid(&["   "]), Vec::new());

        // Running levels do not count down
        level.advance_finish_delay(0.5);
        assert_eq!(level.finish_delay(), 1.0);

        level.player_touched(ObjectKind::Lava, None);
        assert!(!level.is_finished());

        level.advance_finish_delay(0.5);
        assert!(!level.is_finished());
        level.advance_finish_delay(0.5);
        // Exactly zero is not yet finished
        assert!(!level.is_finished());
        level.advance_finish_delay(0.1);
        assert!(level.is_finished());
    }

    #[test]
    fn test_act_moves_hazards_not_player() {
        let player = Actor::player(Vector::new(0.0, 1.0));
        let player_pos = player.pos;
        let fireball = Actor::horizontal_fireball(Vector::new(1.0, 1.0));
        let fireball_id = fireball.id();
        let mut level = Level::new(grid(&["     ", "     ", "     "]), vec![player, fireball]);

        level.act(1.0);

        assert_eq!(level.player().map(|p| p.pos), Some(player_pos));
        assert_eq!(
            level.actor(fireball_id).map(|a| a.pos),
            Some(Vector::new(3.0, 1.0))
        );
    }
}
