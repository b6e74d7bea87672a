//! All game entity types: pure data, no behavior.

use crate::config::Tunables;
use crate::geometry::{Rect, Vec2};

// ── Top-level status ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    GameOver,
    Victory,
}

/// Fire-and-forget audio requests. The host decides whether anything plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Power-up collected.
    Get,
    /// Powered hit on an enemy or bullet.
    Nice,
    /// Player struck without power.
    Hit,
    /// Last level cleared.
    Victory,
}

impl SoundCue {
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Get => "get",
            SoundCue::Nice => "nice",
            SoundCue::Hit => "hit",
            SoundCue::Victory => "victory",
        }
    }
}

/// Symbolic colour of an entity; the renderer maps it to real colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Purple,
    DarkPurple,
    MidnightPurple,
    Red,
}

// ── Enemies ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Patrol,
    Attack,
}

/// Roster-level enemy type, without per-instance data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyClass {
    Grunt,
    Shooter,
    Strong,
}

/// Patrol/attack state machine data shared by grunts and shooters.
#[derive(Clone, Debug, PartialEq)]
pub struct Patrol {
    pub state: EnemyState,
    pub waypoints: Vec<Vec2>,
    pub target: Vec2,
    pub attack_range: f32,
    /// Always greater than `attack_range`; the gap is the hysteresis band.
    pub disengage_range: f32,
}

/// Fire control of a shooting enemy. Owns every bullet it has fired.
#[derive(Clone, Debug, PartialEq)]
pub struct Gun {
    pub cooldown_ms: u64,
    /// `None` until the first shot, so a fresh shooter fires immediately.
    pub last_shot: Option<u64>,
    pub bullets: Vec<Bullet>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EnemyKind {
    Grunt(Patrol),
    Shooter { patrol: Patrol, gun: Gun },
    Strong { hp: u8 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub speed: f32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn class(&self) -> EnemyClass {
        match self.kind {
            EnemyKind::Grunt(_) => EnemyClass::Grunt,
            EnemyKind::Shooter { .. } => EnemyClass::Shooter,
            EnemyKind::Strong { .. } => EnemyClass::Strong,
        }
    }

    pub fn bullets(&self) -> &[Bullet] {
        match &self.kind {
            EnemyKind::Shooter { gun, .. } => &gun.bullets,
            _ => &[],
        }
    }
}

// ── Projectiles & pickups ────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Unit vector.
    pub direction: Vec2,
    pub speed: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Powerup {
    pub rect: Rect,
    pub velocity: Vec2,
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub has_power: bool,
    /// Set while the invincibility flag is raised; holds the expiry time.
    pub invincible_until: Option<u64>,
}

impl Player {
    pub fn is_invincible(&self, now: u64) -> bool {
        matches!(self.invincible_until, Some(until) if now < until)
    }
}

// ── Per-tick I/O ─────────────────────────────────────────────────────────────

/// Host input for one tick. `dx`/`dy` are -1, 0 or 1.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickInput {
    pub dx: i8,
    pub dy: i8,
    pub sprint: bool,
}

/// What happened during one tick, for the host to react to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub game_over: bool,
    pub level_cleared: bool,
    pub enemy_count: usize,
    pub level: u32,
    pub cues: Vec<SoundCue>,
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire game state, owned by the host loop and mutated in place by
/// every core call. Nothing else holds game state.
#[derive(Clone, Debug)]
pub struct GameState {
    pub status: GameStatus,
    pub level: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub powerup: Option<Powerup>,
    /// Earliest time a new power-up may appear.
    pub next_powerup_at: u64,
    pub tunables: Tunables,
}
