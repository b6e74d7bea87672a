//! Encounter resolution: adjudicates player contact with enemies and enemy
//! bullets against the player's power and invincibility state.
//!
//! Runs once per tick after every movement update. A powered contact spends
//! the power and arms a short grace window; the pass ends right there, so two
//! enemies overlapping the player in the same tick cost one power-up and never
//! turn into a game over. An unpowered contact is the only fatal outcome.

use tracing::{debug, info};

use crate::durability::{self, HitOutcome};
use crate::entities::{EnemyKind, GameState, SoundCue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encounter {
    /// Nothing touched the player, or the player was invincible.
    Clear,
    /// A powered contact was resolved.
    PoweredHit,
    /// The player was struck without power.
    GameOver,
}

pub fn resolve_encounters(state: &mut GameState, now: u64, cues: &mut Vec<SoundCue>) -> Encounter {
    // Grace window still running: no contact counts this tick.
    if state.player.is_invincible(now) {
        return Encounter::Clear;
    }
    state.player.invincible_until = None;

    let player = state.player.rect;

    // ── Player ↔ enemy ───────────────────────────────────────────────────────
    if let Some(idx) = state.enemies.iter().position(|e| e.rect.intersects(&player)) {
        if !state.player.has_power {
            info!(enemy = ?state.enemies[idx].class(), "player struck by enemy");
            return Encounter::GameOver;
        }
        cues.push(SoundCue::Nice);
        let class = state.enemies[idx].class();
        match durability::hit(&mut state.enemies[idx]) {
            HitOutcome::Destroyed => {
                state.enemies.remove(idx);
                debug!(?class, left = state.enemies.len(), "enemy destroyed");
            }
            HitOutcome::Damaged { hp_left } => {
                debug!(?class, hp_left, "enemy damaged");
            }
        }
        spend_power(state, now);
        return Encounter::PoweredHit;
    }

    // ── Player ↔ enemy bullets ───────────────────────────────────────────────
    let bullet_hit = state.enemies.iter().enumerate().find_map(|(ei, e)| {
        e.bullets()
            .iter()
            .position(|b| b.rect.intersects(&player))
            .map(|bi| (ei, bi))
    });
    if let Some((ei, bi)) = bullet_hit {
        if !state.player.has_power {
            info!("player struck by bullet");
            return Encounter::GameOver;
        }
        cues.push(SoundCue::Nice);
        if let EnemyKind::Shooter { gun, .. } = &mut state.enemies[ei].kind {
            gun.bullets.remove(bi);
        }
        debug!("bullet absorbed by power");
        spend_power(state, now);
        return Encounter::PoweredHit;
    }

    Encounter::Clear
}

/// Consume the power-up, open the grace window and restart the respawn timer.
fn spend_power(state: &mut GameState, now: u64) {
    state.player.has_power = false;
    state.player.invincible_until = Some(now + state.tunables.hit_grace_ms);
    state.next_powerup_at = now + state.tunables.powerup_interval_ms;
}
