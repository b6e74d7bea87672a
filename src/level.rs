//! Level rosters, enemy spawning and the level-advance trigger.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::behavior::waypoint_grid;
use crate::config::Tunables;
use crate::entities::{
    Enemy, EnemyClass, EnemyKind, EnemyState, GameState, GameStatus, Gun, Patrol, SoundCue,
};
use crate::geometry::{Rect, Vec2};
use crate::powerup;

/// Clearing this level wins the game.
pub const MAX_LEVEL: u32 = 3;

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Enemy composition of a level. Levels past the last reuse its roster.
pub fn roster(level: u32) -> &'static [(EnemyClass, usize)] {
    match level {
        0 | 1 => &[
            (EnemyClass::Grunt, 1),
            (EnemyClass::Shooter, 1),
            (EnemyClass::Strong, 1),
        ],
        2 => &[
            (EnemyClass::Grunt, 2),
            (EnemyClass::Shooter, 1),
            (EnemyClass::Strong, 1),
        ],
        _ => &[
            (EnemyClass::Grunt, 2),
            (EnemyClass::Shooter, 2),
            (EnemyClass::Strong, 2),
        ],
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

pub fn spawn_roster(level: u32, tunables: &Tunables, rng: &mut impl Rng) -> Vec<Enemy> {
    roster(level)
        .iter()
        .flat_map(|&(class, count)| std::iter::repeat(class).take(count))
        .map(|class| spawn_enemy(class, tunables, rng))
        .collect()
}

pub fn spawn_enemy(class: EnemyClass, tunables: &Tunables, rng: &mut impl Rng) -> Enemy {
    match class {
        EnemyClass::Grunt => {
            let rect = spawn_rect(tunables.enemy_size, tunables, rng);
            Enemy {
                rect,
                speed: tunables.enemy_speed,
                kind: EnemyKind::Grunt(new_patrol(&rect, tunables, rng)),
            }
        }
        EnemyClass::Shooter => {
            let rect = spawn_rect(tunables.shooting_enemy_size, tunables, rng);
            Enemy {
                rect,
                speed: tunables.shooting_enemy_speed,
                kind: EnemyKind::Shooter {
                    patrol: new_patrol(&rect, tunables, rng),
                    gun: Gun {
                        cooldown_ms: tunables.shoot_cooldown_ms,
                        last_shot: None,
                        bullets: Vec::new(),
                    },
                },
            }
        }
        EnemyClass::Strong => Enemy {
            rect: spawn_rect(tunables.strong_enemy_size, tunables, rng),
            speed: tunables.strong_enemy_speed,
            kind: EnemyKind::Strong {
                hp: tunables.strong_enemy_hp,
            },
        },
    }
}

fn new_patrol(rect: &Rect, tunables: &Tunables, rng: &mut impl Rng) -> Patrol {
    let waypoints = waypoint_grid(tunables);
    let target = waypoints.choose(rng).copied().unwrap_or_else(|| rect.center());
    Patrol {
        state: EnemyState::Patrol,
        waypoints,
        target,
        attack_range: tunables.attack_range,
        disengage_range: tunables.disengage_range,
    }
}

/// A box whose center avoids the safe zone around the player's spawn on both
/// axes, pulled inside the arena.
fn spawn_rect(size: f32, tunables: &Tunables, rng: &mut impl Rng) -> Rect {
    let center = Vec2::new(
        outside_band(tunables.arena_width, tunables.safe_zone_half_width, rng),
        outside_band(tunables.arena_height, tunables.safe_zone_half_height, rng),
    );
    let mut rect = Rect::from_center(center, size, size);
    rect.clamp_within(&tunables.arena());
    rect
}

/// Uniform pick from `[0, extent]` minus the open band of `half` around the
/// middle.
fn outside_band(extent: f32, half: f32, rng: &mut impl Rng) -> f32 {
    let middle = extent / 2.0;
    let left = (middle - half).max(0.0);
    let right_start = (middle + half).min(extent);
    let right = extent - right_start;
    let total = left + right;
    if total <= 0.0 {
        return 0.0;
    }
    let t = rng.gen_range(0.0..=total);
    if t <= left {
        t
    } else {
        right_start + (t - left)
    }
}

// ── Level flow ───────────────────────────────────────────────────────────────

/// Seed `level`'s roster and a fresh power-up, and grant the level-start
/// grace so nothing materialising on top of the player kills it.
pub fn start_level(state: &mut GameState, level: u32, now: u64, rng: &mut impl Rng) {
    state.level = level;
    state.enemies = spawn_roster(level, &state.tunables, rng);
    state.powerup = Some(powerup::spawn(&state.tunables, rng));
    state.next_powerup_at = now + state.tunables.powerup_interval_ms;
    state.player.invincible_until = Some(now + state.tunables.level_grace_ms);
    info!(level, enemies = state.enemies.len(), "level started");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelProgress {
    Ongoing,
    Advanced(u32),
    Victory,
}

pub fn advance_if_cleared(
    state: &mut GameState,
    now: u64,
    rng: &mut impl Rng,
    cues: &mut Vec<SoundCue>,
) -> LevelProgress {
    if !state.enemies.is_empty() {
        return LevelProgress::Ongoing;
    }
    if state.level < MAX_LEVEL {
        let next = state.level + 1;
        debug!(from = state.level, to = next, "level cleared");
        start_level(state, next, now, rng);
        LevelProgress::Advanced(next)
    } else {
        info!(level = state.level, "final level cleared");
        state.status = GameStatus::Victory;
        cues.push(SoundCue::Victory);
        LevelProgress::Victory
    }
}
