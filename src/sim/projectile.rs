//! Projectiles fired by the player and by ranged enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// A straight-flying projectile. Velocity is fixed at spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    vel: Vec2,
    pub damage: i32,
}

impl Projectile {
    /// Spawn centred on `origin`
    pub fn new(origin: Vec2, size: Vec2, vel: Vec2, damage: i32) -> Self {
        Self {
            rect: Rect::from_center(origin, size),
            vel,
            damage,
        }
    }

    /// Spawn at `origin` flying toward `target` at `speed` pixels per tick
    pub fn aimed(origin: Vec2, target: Vec2, speed: f32, size: Vec2, damage: i32) -> Self {
        Self::new(origin, size, aimed_velocity(origin, target, speed), damage)
    }

    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Advance one tick
    pub fn advance(&mut self) {
        self.rect.pos += self.vel;
    }

    pub fn hits(&self, other: &Rect) -> bool {
        self.rect.overlaps(other)
    }
}

/// Velocity of magnitude `speed` pointing from `origin` to `target`.
///
/// A target on top of the origin fires along +x.
pub fn aimed_velocity(origin: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let delta = target - origin;
    let angle = delta.y.atan2(delta.x);
    Vec2::new(angle.cos(), angle.sin()) * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_aimed_velocity_magnitude() {
        let vel = aimed_velocity(Vec2::ZERO, Vec2::new(30.0, 40.0), 15.0);
        assert!((vel.length() - 15.0).abs() < 1e-4);
        assert!((vel - Vec2::new(9.0, 12.0)).length() < 1e-4);
    }

    #[test]
    fn test_coincident_target_fires_along_x() {
        let vel = aimed_velocity(Vec2::ONE, Vec2::ONE, 2.0);
        assert_eq!(vel, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_hits() {
        let p = Projectile::new(Vec2::new(5.0, 5.0), Vec2::splat(4.0), Vec2::ZERO, 1);
        assert!(p.hits(&Rect::new(Vec2::ZERO, Vec2::splat(4.0))));
        assert!(!p.hits(&Rect::new(Vec2::new(20.0, 20.0), Vec2::splat(4.0))));
    }

    proptest! {
        #[test]
        fn prop_linear_motion(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
            frames in 0u32..200,
        ) {
            let mut p = Projectile::new(Vec2::new(x, y), Vec2::splat(8.0), Vec2::new(vx, vy), 10);
            let start = p.center();
            for _ in 0..frames {
                p.advance();
            }
            let expected = start + Vec2::new(vx, vy) * frames as f32;
            prop_assert!((p.center() - expected).length() < 0.1);
            prop_assert_eq!(p.vel(), Vec2::new(vx, vy));
        }
    }
}
