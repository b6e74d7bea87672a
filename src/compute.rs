//! Tick orchestration and the top-level `Menu | Playing | GameOver | Victory`
//! state machine.
//!
//! Every function takes the host-owned [`GameState`] by mutable reference
//! (and, where needed, an RNG handle and the current time in milliseconds).
//! Randomness only enters through the injected RNG, so a seeded RNG and a
//! scripted clock reproduce a run exactly.

use rand::Rng;
use tracing::{info, trace};

use crate::behavior;
use crate::collision::{self, Encounter};
use crate::config::Tunables;
use crate::entities::{GameState, GameStatus, Player, SoundCue, TickInput, TickReport};
use crate::geometry::{Rect, Vec2};
use crate::level::{self, LevelProgress};
use crate::powerup;

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh game sitting in the menu. Nothing is spawned until a level starts.
pub fn new_game(tunables: Tunables) -> GameState {
    GameState {
        status: GameStatus::Menu,
        level: 1,
        player: spawn_player(&tunables),
        enemies: Vec::new(),
        powerup: None,
        next_powerup_at: 0,
        tunables,
    }
}

/// Player box with its top-left corner at the arena center.
fn spawn_player(tunables: &Tunables) -> Player {
    Player {
        rect: Rect::square(
            tunables.arena_width / 2.0,
            tunables.arena_height / 2.0,
            tunables.player_size,
        ),
        has_power: false,
        invincible_until: None,
    }
}

// ── Status transitions ───────────────────────────────────────────────────────

/// Begin play at `level` with a fresh player.
pub fn start_game(state: &mut GameState, level: u32, now: u64, rng: &mut impl Rng) {
    let level = level.clamp(1, level::MAX_LEVEL);
    state.player = spawn_player(&state.tunables);
    level::start_level(state, level, now, rng);
    state.status = GameStatus::Playing;
    info!(level, "game started");
}

/// Soft restart after a game over (same level) or a victory (level 1).
pub fn restart(state: &mut GameState, now: u64, rng: &mut impl Rng) {
    let level = match state.status {
        GameStatus::Victory => 1,
        _ => state.level,
    };
    start_game(state, level, now, rng);
}

pub fn return_to_menu(state: &mut GameState) {
    state.status = GameStatus::Menu;
    state.enemies.clear();
    state.powerup = None;
    state.player = spawn_player(&state.tunables);
}

// ── Input-driven movement ────────────────────────────────────────────────────

/// Move the player by one step of input and clamp it to the arena. Sprint
/// speed applies while sprint is held or the player carries power.
pub fn move_player(state: &mut GameState, input: TickInput) {
    let t = &state.tunables;
    let speed = if input.sprint || state.player.has_power {
        t.player_sprint_speed
    } else {
        t.player_speed
    };
    let delta = Vec2::new(
        f32::from(input.dx.signum()) * speed,
        f32::from(input.dy.signum()) * speed,
    );
    state.player.rect.translate(delta);
    state.player.rect.clamp_within(&t.arena());
}

// ── Per-tick update ──────────────────────────────────────────────────────────

/// Advance the game by one tick. Outside of `Playing` this is a no-op that
/// only reports the current counts.
pub fn tick(
    state: &mut GameState,
    input: TickInput,
    now: u64,
    rng: &mut impl Rng,
) -> TickReport {
    let mut report = TickReport::default();
    if state.status != GameStatus::Playing {
        report.enemy_count = state.enemies.len();
        report.level = state.level;
        return report;
    }

    // ── 1. Input ─────────────────────────────────────────────────────────────
    move_player(state, input);

    // ── 2. Power-up ──────────────────────────────────────────────────────────
    powerup::update(state, now, rng, &mut report.cues);

    // ── 3. Enemies and their bullets ─────────────────────────────────────────
    behavior::update_all(state, now, rng);

    // ── 4. Encounter resolution ──────────────────────────────────────────────
    match collision::resolve_encounters(state, now, &mut report.cues) {
        Encounter::GameOver => {
            state.status = GameStatus::GameOver;
            report.cues.push(SoundCue::Hit);
            report.game_over = true;
            info!(level = state.level, "game over");
        }
        Encounter::PoweredHit | Encounter::Clear => {
            // ── 5. Level-advance check ───────────────────────────────────────
            match level::advance_if_cleared(state, now, rng, &mut report.cues) {
                LevelProgress::Ongoing => {}
                LevelProgress::Advanced(_) | LevelProgress::Victory => {
                    report.level_cleared = true;
                }
            }
        }
    }

    report.enemy_count = state.enemies.len();
    report.level = state.level;
    trace!(now, enemies = report.enemy_count, "tick");
    report
}
