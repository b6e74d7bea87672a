//! The bouncing power-up: movement, collection and the respawn timer.

use rand::Rng;
use tracing::debug;

use crate::config::Tunables;
use crate::entities::{GameState, Powerup, SoundCue};
use crate::geometry::{Rect, Vec2};

/// A fresh power-up somewhere in the arena, moving diagonally in a random
/// direction.
pub fn spawn(tunables: &Tunables, rng: &mut impl Rng) -> Powerup {
    let center = Vec2::new(
        rng.gen_range(0.0..=tunables.arena_width),
        rng.gen_range(0.0..=tunables.arena_height),
    );
    let mut rect = Rect::from_center(center, tunables.powerup_size, tunables.powerup_size);
    rect.clamp_within(&tunables.arena());

    let speed = tunables.powerup_speed;
    let vx = if rng.gen_bool(0.5) { speed } else { -speed };
    let vy = if rng.gen_bool(0.5) { speed } else { -speed };
    Powerup {
        rect,
        velocity: Vec2::new(vx, vy),
    }
}

/// Move one step. A wall contact pushes the box back onto the wall and
/// reflects the matching velocity component, so the box never leaves `arena`.
pub fn step(powerup: &mut Powerup, arena: &Rect) {
    powerup.rect.translate(powerup.velocity);
    let r = &mut powerup.rect;
    let v = &mut powerup.velocity;

    if r.x < arena.x {
        r.x = arena.x;
        v.x = v.x.abs();
    } else if r.right() > arena.right() {
        r.x = arena.right() - r.w;
        v.x = -v.x.abs();
    }
    if r.y < arena.y {
        r.y = arena.y;
        v.y = v.y.abs();
    } else if r.bottom() > arena.bottom() {
        r.y = arena.bottom() - r.h;
        v.y = -v.y.abs();
    }
}

/// Per-tick power-up pass: move, let the player collect it, respawn it once
/// the timer has run out and the player holds no power.
pub fn update(state: &mut GameState, now: u64, rng: &mut impl Rng, cues: &mut Vec<SoundCue>) {
    let arena = state.tunables.arena();

    if let Some(powerup) = state.powerup.as_mut() {
        step(powerup, &arena);
    }

    let collected = state
        .powerup
        .as_ref()
        .map_or(false, |p| p.rect.intersects(&state.player.rect));
    if collected {
        debug!("power-up collected");
        state.player.has_power = true;
        state.powerup = None;
        cues.push(SoundCue::Get);
    }

    if state.powerup.is_none() && !state.player.has_power && now >= state.next_powerup_at {
        state.powerup = Some(spawn(&state.tunables, rng));
        state.next_powerup_at = now + state.tunables.powerup_interval_ms;
        debug!(next_at = state.next_powerup_at, "power-up respawned");
    }
}
