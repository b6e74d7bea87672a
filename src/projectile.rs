//! Straight-line bullets fired by shooting enemies.

use crate::entities::Bullet;
use crate::geometry::{Rect, Vec2};

/// Spawn a bullet centred on `origin`, flying along the unit vector `direction`.
pub fn spawn(origin: Vec2, direction: Vec2, size: f32, speed: f32) -> Bullet {
    Bullet {
        rect: Rect::from_center(origin, size, size),
        direction,
        speed,
    }
}

/// Move every bullet one step and drop the ones that left the arena entirely.
pub fn advance(bullets: &mut Vec<Bullet>, arena: &Rect) {
    for bullet in bullets.iter_mut() {
        bullet.rect.translate(bullet.direction * bullet.speed);
    }
    bullets.retain(|b| b.rect.intersects(arena));
}
