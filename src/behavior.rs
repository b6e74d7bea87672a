//! Per-enemy movement: the patrol/attack state machine, the shooter's runaway
//! and fire control, and the strong enemy's unconditional pursuit.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::config::Tunables;
use crate::entities::{Enemy, EnemyKind, EnemyState, GameState, Gun, Patrol};
use crate::geometry::{Rect, Vec2};
use crate::projectile;

/// Every grid point `(x, y)` with both coordinates multiples of the grid step
/// and strictly inside the arena's width/height.
pub fn waypoint_grid(tunables: &Tunables) -> Vec<Vec2> {
    let step = tunables.patrol_grid_step;
    let mut points = Vec::new();
    let mut x = 0.0;
    while x < tunables.arena_width {
        let mut y = 0.0;
        while y < tunables.arena_height {
            points.push(Vec2::new(x, y));
            y += step;
        }
        x += step;
    }
    points
}

/// Advance every live enemy (and the bullets shooters own) by one tick.
pub fn update_all(state: &mut GameState, now: u64, rng: &mut impl Rng) {
    let player_center = state.player.rect.center();
    let has_power = state.player.has_power;
    let tunables = &state.tunables;
    for enemy in state.enemies.iter_mut() {
        update_enemy(enemy, player_center, has_power, now, tunables, rng);
    }
}

pub fn update_enemy(
    enemy: &mut Enemy,
    player_center: Vec2,
    player_has_power: bool,
    now: u64,
    tunables: &Tunables,
    rng: &mut impl Rng,
) {
    let Enemy { rect, speed, kind } = enemy;
    match kind {
        EnemyKind::Grunt(patrol) => run_state_machine(rect, *speed, patrol, player_center, rng),
        EnemyKind::Shooter { patrol, gun } => {
            if player_has_power {
                runaway(rect, *speed, player_center, &tunables.arena());
            } else {
                run_state_machine(rect, *speed, patrol, player_center, rng);
            }
            fire_control(gun, rect.center(), player_center, now, tunables);
            projectile::advance(&mut gun.bullets, &tunables.arena());
        }
        EnemyKind::Strong { .. } => {
            chase(rect, *speed, player_center);
        }
    }
}

/// One tick of the patrol/attack machine. The transition is decided on the
/// distance measured before this tick's movement.
pub fn run_state_machine(
    rect: &mut Rect,
    speed: f32,
    patrol: &mut Patrol,
    player_center: Vec2,
    rng: &mut impl Rng,
) {
    let distance = player_center.distance(rect.center());
    match patrol.state {
        EnemyState::Patrol => {
            patrol_step(rect, speed, patrol, rng);
            if distance < patrol.attack_range {
                debug!(distance, "enemy engages");
                patrol.state = EnemyState::Attack;
            }
        }
        EnemyState::Attack => {
            chase(rect, speed, player_center);
            if distance > patrol.disengage_range {
                debug!(distance, "enemy disengages");
                patrol.state = EnemyState::Patrol;
                // Resume patrolling from here rather than a stale waypoint.
                patrol.target = rect.center();
            }
        }
    }
}

/// Head for the current waypoint. Arrival is speed-quantized: once the target
/// is within one step the enemy lands on it and picks another waypoint.
pub fn patrol_step(rect: &mut Rect, speed: f32, patrol: &mut Patrol, rng: &mut impl Rng) {
    let delta = patrol.target - rect.center();
    if delta.length() > speed {
        if let Some(dir) = delta.normalize() {
            rect.translate(dir * speed);
        }
    } else {
        rect.translate(delta);
        if let Some(next) = patrol.waypoints.choose(rng) {
            trace!(x = next.x, y = next.y, "new waypoint");
            patrol.target = *next;
        }
    }
}

/// Step straight toward `target`. Returns `false` when already on it.
pub fn chase(rect: &mut Rect, speed: f32, target: Vec2) -> bool {
    match (target - rect.center()).normalize() {
        Some(dir) => {
            rect.translate(dir * speed);
            true
        }
        None => false,
    }
}

/// Step straight away from the player, but only if the new box stays inside
/// the arena. A blocked step is dropped, not reflected.
pub fn runaway(rect: &mut Rect, speed: f32, player_center: Vec2, arena: &Rect) -> bool {
    let Some(dir) = (rect.center() - player_center).normalize() else {
        return false;
    };
    let candidate = rect.translated(dir * speed);
    if arena.contains_rect(&candidate) {
        *rect = candidate;
        true
    } else {
        false
    }
}

/// Fire one bullet at the player whenever the cooldown has elapsed.
/// Returns `true` when a bullet was spawned this tick.
pub fn fire_control(
    gun: &mut Gun,
    origin: Vec2,
    player_center: Vec2,
    now: u64,
    tunables: &Tunables,
) -> bool {
    let due = match gun.last_shot {
        None => true,
        Some(last) => now.saturating_sub(last) > gun.cooldown_ms,
    };
    if !due {
        return false;
    }
    // Player exactly on the muzzle: no direction to aim, retry next tick.
    let Some(direction) = (player_center - origin).normalize() else {
        return false;
    };
    gun.bullets.push(projectile::spawn(
        origin,
        direction,
        tunables.bullet_size,
        tunables.bullet_speed,
    ));
    gun.last_shot = Some(now);
    trace!(now, live = gun.bullets.len(), "shooter fired");
    true
}
