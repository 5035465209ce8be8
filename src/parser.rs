//! Level plans: text rows to terrain grid + actor list
//!
//! Each character of a plan is one tile. `x` is wall, `!` is lava, and
//! legend symbols spawn actors at their tile. Blanks (space or `.`) are empty.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::sim::{Actor, Grid, Level, Terrain, Vector};

/// Actor a legend symbol stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorSymbol {
    Player,
    Coin,
    HorizontalFireball,
    VerticalFireball,
    FireRain,
}

impl ActorSymbol {
    /// Create the actor for a symbol found at `cell`
    pub fn spawn<R: Rng>(self, cell: Vector, rng: &mut R) -> Actor {
        match self {
            ActorSymbol::Player => Actor::player(cell),
            ActorSymbol::Coin => Actor::coin(cell, rng),
            ActorSymbol::HorizontalFireball => Actor::horizontal_fireball(cell),
            ActorSymbol::VerticalFireball => Actor::vertical_fireball(cell),
            ActorSymbol::FireRain => Actor::fire_rain(cell),
        }
    }
}

/// Mapping from plan characters to actors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend(HashMap<char, ActorSymbol>);

impl Default for Legend {
    fn default() -> Self {
        Self(HashMap::from([
            ('@', ActorSymbol::Player),
            ('o', ActorSymbol::Coin),
            ('=', ActorSymbol::HorizontalFireball),
            ('|', ActorSymbol::VerticalFireball),
            ('v', ActorSymbol::FireRain),
        ]))
    }
}

impl Legend {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    pub fn with(mut self, symbol: char, actor: ActorSymbol) -> Self {
        self.0.insert(symbol, actor);
        self
    }

    pub fn get(&self, symbol: char) -> Option<ActorSymbol> {
        self.0.get(&symbol).copied()
    }
}

/// Turns plan text into a [`Level`]
#[derive(Debug, Clone, Default)]
pub struct LevelParser {
    legend: Legend,
    strict: bool,
}

impl LevelParser {
    pub fn new(legend: Legend) -> Self {
        Self {
            legend,
            strict: false,
        }
    }

    /// Reject unknown symbols instead of skipping them with a warning
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn obstacle_from_symbol(symbol: char) -> Option<Terrain> {
        match symbol {
            'x' => Some(Terrain::Wall),
            '!' => Some(Terrain::Lava),
            _ => None,
        }
    }

    pub fn actor_from_symbol(&self, symbol: char) -> Option<ActorSymbol> {
        self.legend.get(symbol)
    }

    pub fn create_grid<S: AsRef<str>>(&self, plan: &[S]) -> Grid {
        Grid::from_rows(
            plan.iter()
                .map(|line| {
                    line.as_ref()
                        .chars()
                        .map(Self::obstacle_from_symbol)
                        .collect()
                })
                .collect(),
        )
    }

    pub fn create_actors<S: AsRef<str>, R: Rng>(
        &self,
        plan: &[S],
        rng: &mut R,
    ) -> SimResult<Vec<Actor>> {
        let mut actors = Vec::new();

        for (row, line) in plan.iter().enumerate() {
            for (col, symbol) in line.as_ref().chars().enumerate() {
                if let Some(actor) = self.actor_from_symbol(symbol) {
                    let cell = Vector::new(col as f32, row as f32);
                    actors.push(actor.spawn(cell, rng));
                    continue;
                }
                if Self::obstacle_from_symbol(symbol).is_some() || matches!(symbol, ' ' | '.') {
                    continue;
                }
                if self.strict {
                    return Err(SimError::UnknownSymbol { symbol, row, col });
                }
                log::warn!("Skipping unknown symbol {:?} at row {}, column {}", symbol, row, col);
            }
        }

        Ok(actors)
    }

    pub fn parse<S: AsRef<str>, R: Rng>(&self, plan: &[S], rng: &mut R) -> SimResult<Level> {
        let grid = self.create_grid(plan);
        let actors = self.create_actors(plan, rng)?;
        log::info!(
            "Parsed level {}x{} with {} actors",
            grid.width(),
            grid.height(),
            actors.len()
        );
        Ok(Level::new(grid, actors))
    }

    /// Parse newline-separated plan text (a trailing newline is ignored)
    pub fn parse_str<R: Rng>(&self, text: &str, rng: &mut R) -> SimResult<Level> {
        let plan: Vec<&str> = text.lines().collect();
        self.parse(&plan, rng)
    }
}
