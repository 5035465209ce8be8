//! Per-tick simulation driver
//!
//! One call to [`tick`] advances a level by `dt`: hazards and collectibles act,
//! the player's requested motion is resolved against terrain, and whatever the
//! player ends up touching is fed into the level's status machine.

use super::actor::ActorId;
use super::level::{Level, ObjectKind, Status};
use super::vector::Vector;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Displacement the player wants to make this tick (already scaled by dt)
    pub player_motion: Option<Vector>,
}

/// Something the player touched during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Touch {
    pub kind: ObjectKind,
    pub actor: Option<ActorId>,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Touches handed to the level, in the order they were applied
    pub touches: Vec<Touch>,
    /// Level status after the tick
    pub status: Option<Status>,
    /// Whether the player's requested motion was committed
    pub player_moved: bool,
}

/// Advance the level by one fixed timestep
pub fn tick(level: &mut Level, input: &TickInput, dt: f32) -> TickReport {
    let mut report = TickReport {
        status: level.status(),
        ..Default::default()
    };

    if level.is_finished() {
        return report;
    }

    // The hold window starts on the tick after the status is set
    let was_set = level.status().is_some();

    level.act(dt);

    if !was_set {
        resolve_player(level, input, &mut report);
    }

    if was_set {
        level.advance_finish_delay(dt);
    }
    report.status = level.status();
    report
}

fn resolve_player(level: &mut Level, input: &TickInput, report: &mut TickReport) {
    let Some(player) = level.player() else {
        return;
    };
    let size = player.size();

    // Look ahead, then commit
    if let Some(motion) = input.player_motion {
        let next = player.pos.plus(motion);
        match level.obstacle_at(next, size) {
            Some(terrain) => apply(level, report, terrain.into(), None),
            None => {
                if let Some(player) = level.player_mut() {
                    player.pos = next;
                    report.player_moved = true;
                }
            }
        }
    }

    let Some(player) = level.player() else {
        return;
    };

    // Snapshot first: collecting a coin removes it from the level
    let standing_in = level.obstacle_at(player.pos, size);
    let touching = level.actors_touching(player);

    // Standing in lava counts even without moving into it
    if let Some(terrain) = standing_in {
        if ObjectKind::from(terrain) == ObjectKind::Lava {
            apply(level, report, terrain.into(), None);
        }
    }

    for (id, actor_type) in touching {
        apply(level, report, actor_type.into(), Some(id));
    }
}

fn apply(level: &mut Level, report: &mut TickReport, kind: ObjectKind, actor: Option<ActorId>) {
    log::debug!("Player touched {:?} {:?}", kind, actor);
    level.player_touched(kind, actor);
    report.touches.push(Touch { kind, actor });
}
