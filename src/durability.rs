//! Multi-hit enemy health and the colour tiers that follow from it.

use tracing::debug;

use crate::entities::{Enemy, EnemyKind, Tint};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// The enemy must be removed from the active set.
    Destroyed,
    Damaged { hp_left: u8 },
}

/// Apply one qualifying hit. Only strong enemies survive a hit; their hit
/// points never drop below zero.
pub fn hit(enemy: &mut Enemy) -> HitOutcome {
    match &mut enemy.kind {
        EnemyKind::Strong { hp } => {
            *hp = hp.saturating_sub(1);
            debug!(hp_left = *hp, "strong enemy hit");
            if *hp == 0 {
                HitOutcome::Destroyed
            } else {
                HitOutcome::Damaged { hp_left: *hp }
            }
        }
        EnemyKind::Grunt(_) | EnemyKind::Shooter { .. } => HitOutcome::Destroyed,
    }
}

pub fn tint(enemy: &Enemy) -> Tint {
    match enemy.kind {
        EnemyKind::Grunt(_) => Tint::Purple,
        EnemyKind::Shooter { .. } => Tint::Red,
        EnemyKind::Strong { hp } => strong_tint(hp),
    }
}

fn strong_tint(hp: u8) -> Tint {
    match hp {
        0 | 1 => Tint::MidnightPurple,
        2 => Tint::DarkPurple,
        _ => Tint::Purple,
    }
}
