//! Tunable gameplay constants.

use std::fmt;

use crate::geometry::Rect;

#[derive(Clone, Debug, PartialEq)]
pub struct Tunables {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Target host frame rate; the core itself is tick-count agnostic.
    pub fps: u32,

    pub player_size: f32,
    pub player_speed: f32,
    pub player_sprint_speed: f32,

    pub enemy_size: f32,
    pub enemy_speed: f32,
    pub shooting_enemy_size: f32,
    pub shooting_enemy_speed: f32,
    pub strong_enemy_size: f32,
    pub strong_enemy_speed: f32,
    pub strong_enemy_hp: u8,

    pub attack_range: f32,
    pub disengage_range: f32,
    /// Spacing of the waypoint grid enemies patrol between.
    pub patrol_grid_step: f32,
    /// Half-extents of the no-spawn zone around the arena center.
    pub safe_zone_half_width: f32,
    pub safe_zone_half_height: f32,

    pub shoot_cooldown_ms: u64,
    pub bullet_size: f32,
    pub bullet_speed: f32,

    pub powerup_size: f32,
    pub powerup_speed: f32,
    pub powerup_interval_ms: u64,

    /// Grace window armed after a powered hit.
    pub hit_grace_ms: u64,
    /// Grace window armed when a level starts.
    pub level_grace_ms: u64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,
            fps: 60,
            player_size: 40.0,
            player_speed: 5.0,
            player_sprint_speed: 8.0,
            enemy_size: 30.0,
            enemy_speed: 3.0,
            shooting_enemy_size: 30.0,
            shooting_enemy_speed: 2.5,
            strong_enemy_size: 45.0,
            strong_enemy_speed: 2.0,
            strong_enemy_hp: 3,
            attack_range: 200.0,
            disengage_range: 300.0,
            patrol_grid_step: 200.0,
            safe_zone_half_width: 100.0,
            safe_zone_half_height: 100.0,
            shoot_cooldown_ms: 1000,
            bullet_size: 10.0,
            bullet_speed: 5.0,
            powerup_size: 30.0,
            powerup_speed: 3.0,
            powerup_interval_ms: 5000,
            hit_grace_ms: 200,
            level_grace_ms: 2000,
        }
    }
}

impl Tunables {
    pub fn arena(&self) -> Rect {
        Rect::new(0.0, 0.0, self.arena_width, self.arena_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(ConfigError::EmptyArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.attack_range >= self.disengage_range {
            return Err(ConfigError::RangeInversion {
                attack: self.attack_range,
                disengage: self.disengage_range,
            });
        }
        let speeds = [
            ("player_speed", self.player_speed),
            ("player_sprint_speed", self.player_sprint_speed),
            ("enemy_speed", self.enemy_speed),
            ("shooting_enemy_speed", self.shooting_enemy_speed),
            ("strong_enemy_speed", self.strong_enemy_speed),
            ("bullet_speed", self.bullet_speed),
            ("powerup_speed", self.powerup_speed),
        ];
        for (name, value) in speeds {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveSpeed { name, value });
            }
        }
        if !(1..=3).contains(&self.strong_enemy_hp) {
            return Err(ConfigError::StrongHpOutOfRange {
                hp: self.strong_enemy_hp,
            });
        }
        if !(self.patrol_grid_step > 0.0) {
            return Err(ConfigError::NonPositiveGridStep {
                step: self.patrol_grid_step,
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    EmptyArena { width: f32, height: f32 },
    RangeInversion { attack: f32, disengage: f32 },
    NonPositiveSpeed { name: &'static str, value: f32 },
    StrongHpOutOfRange { hp: u8 },
    NonPositiveGridStep { step: f32 },
    ZeroFps,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyArena { width, height } => {
                write!(f, "arena must have a positive size, got {width}x{height}")
            }
            Self::RangeInversion { attack, disengage } => write!(
                f,
                "attack_range ({attack}) must be smaller than disengage_range ({disengage})"
            ),
            Self::NonPositiveSpeed { name, value } => {
                write!(f, "{name} must be positive, got {value}")
            }
            Self::StrongHpOutOfRange { hp } => {
                write!(f, "strong_enemy_hp must be in 1..=3, got {hp}")
            }
            Self::NonPositiveGridStep { step } => {
                write!(f, "patrol_grid_step must be positive, got {step}")
            }
            Self::ZeroFps => write!(f, "fps must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}
