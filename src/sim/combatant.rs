//! Shared body of every fighting entity
//!
//! `MobileCombatant` owns the state common to all enemies: bounding box,
//! health, speed, facing, hit-marker with its splat countdown and the
//! destroyed flag. Attack behaviour is layered on top in `enemy`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::unit_toward;

/// Which way a sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    /// Facing after a horizontal step of `dx`; zero keeps the current one
    pub fn after_step(self, dx: f32) -> Facing {
        if dx > 0.0 {
            Facing::Right
        } else if dx < 0.0 {
            Facing::Left
        } else {
            self
        }
    }
}

/// Another body to steer around
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MobileCombatant {
    pub id: u32,
    /// Bounding box; its top-left corner is the entity position
    pub rect: Rect,
    pub health: i32,
    /// Pixels per tick
    pub speed: f32,
    pub facing: Facing,
    /// One-shot draw position for the hit/death splat
    hit_marker: Option<Vec2>,
    /// Ticks until a contact splat is withdrawn
    splat_timer: u32,
    destroyed: bool,
}

impl MobileCombatant {
    pub fn new(id: u32, pos: Vec2, size: Vec2, health: i32, speed: f32) -> Self {
        Self {
            id,
            rect: Rect::new(pos, size),
            health,
            speed,
            facing: Facing::Left,
            hit_marker: None,
            splat_timer: 0,
            destroyed: false,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.rect.pos
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn hit_marker(&self) -> Option<Vec2> {
        self.hit_marker
    }

    pub fn splat_timer(&self) -> u32 {
        self.splat_timer
    }

    /// Read and clear the hit-marker (the render layer calls this once per draw)
    pub fn take_hit_marker(&mut self) -> Option<Vec2> {
        self.hit_marker.take()
    }

    /// Step toward `target`, pushed out of the first obstacle the step would overlap.
    ///
    /// Returns false when already at the target (nothing changes).
    pub fn move_towards(&mut self, target: Vec2, obstacles: &[Obstacle]) -> bool {
        let Some((dir, _)) = unit_toward(self.pos(), target) else {
            return false;
        };

        let mut next = self.pos() + dir * self.speed;
        let provisional = self.rect.at(next);
        if let Some(obstacle) = obstacles
            .iter()
            .find(|o| o.id != self.id && provisional.overlaps(&o.rect))
        {
            next = avoid_overlap(next, self.rect.size, &obstacle.rect);
        }

        self.rect.pos = next;
        self.facing = self.facing.after_step(dir.x);
        true
    }

    /// Apply `amount` damage taken at `at`.
    ///
    /// Returns true only on the hit that destroys the combatant.
    pub fn receive_damage(&mut self, amount: i32, at: Vec2) -> bool {
        self.health -= amount;
        self.hit_marker = Some(at);
        if self.health <= 0 && !self.destroyed {
            self.destroyed = true;
            return true;
        }
        false
    }

    /// Record a contact splat at `at` that stays for `duration` ticks
    pub fn mark_contact(&mut self, at: Vec2, duration: u32) {
        self.hit_marker = Some(at);
        self.splat_timer = duration;
    }

    /// Count the contact splat down; the marker is withdrawn when it expires
    pub fn tick_splat(&mut self) {
        if self.splat_timer > 0 {
            self.splat_timer -= 1;
            if self.splat_timer == 0 {
                self.hit_marker = None;
            }
        }
    }
}

/// Push a box of `size` at `pos` out of `other`, independently per axis
pub fn avoid_overlap(mut pos: Vec2, size: Vec2, other: &Rect) -> Vec2 {
    if pos.x < other.left() {
        pos.x = other.left() - size.x;
    } else if pos.x > other.right() - size.x {
        pos.x = other.right();
    }

    if pos.y < other.top() {
        pos.y = other.top() - size.y;
    } else if pos.y > other.bottom() - size.y {
        pos.y = other.bottom();
    }
    pos
}
