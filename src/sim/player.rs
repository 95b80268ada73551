//! The player character
//!
//! Movement comes from four independent intent flags, facing from the
//! cursor, and every fire event adds one projectile to the player's own
//! collection.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::combatant::Facing;
use super::projectile::Projectile;
use super::rect::Rect;
use crate::tuning::PlayerTuning;

/// Held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveIntent {
    /// Displacement for one tick at `speed`
    pub fn displacement(&self, speed: f32) -> Vec2 {
        let mut d = Vec2::ZERO;
        if self.left {
            d.x -= speed;
        }
        if self.right {
            d.x += speed;
        }
        if self.up {
            d.y -= speed;
        }
        if self.down {
            d.y += speed;
        }
        d
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub health: i32,
    starting_health: i32,
    pub speed: f32,
    pub facing: Facing,
    pub intent: MoveIntent,
    /// Shots in flight, owned exclusively by the player
    pub projectiles: Vec<Projectile>,
    shot_damage: i32,
    shot_speed: f32,
    shot_size: Vec2,
    splat_duration: u32,
    splat_timer: u32,
    hit_marker: Option<Vec2>,
    killed: bool,
}

impl Player {
    /// New player centred on `center`
    pub fn new(tuning: &PlayerTuning, center: Vec2) -> Self {
        Self {
            rect: Rect::from_center(center, tuning.size),
            health: tuning.health,
            starting_health: tuning.health,
            speed: tuning.speed,
            facing: Facing::Left,
            intent: MoveIntent::default(),
            projectiles: Vec::new(),
            shot_damage: tuning.shot_damage,
            shot_speed: tuning.shot_speed,
            shot_size: tuning.shot_size,
            splat_duration: tuning.splat_duration,
            splat_timer: 0,
            hit_marker: None,
            killed: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn shot_damage(&self) -> i32 {
        self.shot_damage
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.killed
    }

    pub fn hit_marker(&self) -> Option<Vec2> {
        self.hit_marker
    }

    pub fn splat_timer(&self) -> u32 {
        self.splat_timer
    }

    /// Apply held movement flags. Clamping to the scene is the driver's job.
    pub fn move_by_intent(&mut self) {
        self.rect.pos += self.intent.displacement(self.speed);
    }

    /// Face the cursor: right half-plane faces right, left half-plane left.
    /// A cursor straight above or below keeps the current facing.
    pub fn aim_at(&mut self, cursor: Vec2) {
        // Heading in (-90°, 90°) is exactly a positive horizontal component
        let dx = cursor.x - self.center().x;
        self.facing = self.facing.after_step(dx);
    }

    /// Fire one shot from the centre toward `target`
    pub fn shoot(&mut self, target: Vec2) {
        self.projectiles.push(Projectile::aimed(
            self.center(),
            target,
            self.shot_speed,
            self.shot_size,
            self.shot_damage,
        ));
    }

    pub fn advance_projectiles(&mut self) {
        for p in &mut self.projectiles {
            p.advance();
        }
    }

    /// Drop shots that have left `bounds` entirely
    pub fn discard_offscreen(&mut self, bounds: &Rect) {
        self.projectiles.retain(|p| p.rect.overlaps(bounds));
    }

    pub fn handle_damage(&mut self, amount: i32) {
        self.health -= amount;
        self.hit_marker = Some(self.center());
        self.splat_timer = self.splat_duration;
        log::debug!("Player hit for {} (health {})", amount, self.health);
        if self.health <= 0 {
            self.killed = true;
        }
    }

    pub fn tick_splat(&mut self) {
        if self.splat_timer > 0 {
            self.splat_timer -= 1;
            if self.splat_timer == 0 {
                self.hit_marker = None;
            }
        }
    }

    /// Refill health and clear the killed flag for a fresh run
    pub fn restore(&mut self) {
        self.health = self.starting_health;
        self.killed = false;
        self.splat_timer = 0;
        self.hit_marker = None;
        self.projectiles.clear();
        self.intent = MoveIntent::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player() -> Player {
        Player::new(&PlayerTuning::default(), Vec2::new(400.0, 300.0))
    }

    #[test]
    fn test_intent_movement() {
        let mut p = player();
        let start = p.rect.pos;
        p.intent.right = true;
        p.intent.up = true;
        p.move_by_intent();
        assert_eq!(p.rect.pos, start + Vec2::new(p.speed, -p.speed));

        // Opposing flags cancel
        p.intent.left = true;
        p.intent.down = true;
        p.move_by_intent();
        assert_eq!(p.rect.pos, start + Vec2::new(p.speed, -p.speed));
    }

    #[test]
    fn test_cursor_facing() {
        let mut p = player();
        p.aim_at(Vec2::new(500.0, 250.0));
        assert_eq!(p.facing, Facing::Right);
        p.aim_at(Vec2::new(100.0, 300.0));
        assert_eq!(p.facing, Facing::Left);
        // Straight below keeps left
        p.aim_at(Vec2::new(400.0, 600.0));
        assert_eq!(p.facing, Facing::Left);
        p.aim_at(Vec2::new(401.0, 0.0));
        assert_eq!(p.facing, Facing::Right);
        p.aim_at(Vec2::new(400.0, 0.0));
        assert_eq!(p.facing, Facing::Right);
    }

    #[test]
    fn test_shoot_appends_aimed_projectile() {
        let mut p = player();
        p.shoot(Vec2::new(400.0, 0.0));
        assert_eq!(p.projectiles.len(), 1);
        let shot = &p.projectiles[0];
        assert_eq!(shot.damage, 50);
        assert!((shot.vel() - Vec2::new(0.0, -15.0)).length() < 1e-4);
        assert!((shot.center() - p.center()).length() < 1e-4);
    }

    #[test]
    fn test_handle_damage_and_death() {
        let mut p = player();
        p.handle_damage(29_999);
        assert!(!p.is_destroyed());
        assert_eq!(p.hit_marker(), Some(p.center()));
        assert_eq!(p.splat_timer(), 360);
        p.handle_damage(1);
        assert!(p.is_destroyed());

        p.restore();
        assert!(!p.is_destroyed());
        assert_eq!(p.health, 30_000);
    }

    #[test]
    fn test_splat_countdown_clears_marker() {
        let mut p = player();
        p.handle_damage(5);
        for _ in 0..359 {
            p.tick_splat();
        }
        assert!(p.hit_marker().is_some());
        p.tick_splat();
        assert!(p.hit_marker().is_none());
    }

    #[test]
    fn test_discard_offscreen() {
        let mut p = player();
        p.shoot(Vec2::new(0.0, 300.0));
        p.shoot(Vec2::new(800.0, 300.0));
        for _ in 0..30 {
            p.advance_projectiles();
        }
        p.discard_offscreen(&Rect::new(Vec2::ZERO, Vec2::new(800.0, 600.0)));
        assert!(p.projectiles.is_empty());
    }

    proptest! {
        #[test]
        fn prop_cursor_facing_matches_half_plane(dx in -400.0f32..400.0, dy in -300.0f32..300.0) {
            let mut p = player();
            p.facing = Facing::Left;
            let cursor = p.center() + Vec2::new(dx, dy);
            p.aim_at(cursor);
            let actual_dx = cursor.x - p.center().x;
            let expected = if actual_dx > 0.0 { Facing::Right } else { Facing::Left };
            prop_assert_eq!(p.facing, expected);
        }
    }
}
