//! Training range: stationary targets and an exit portal
//!
//! A self-contained warm-up scene. The player moves and shoots exactly as
//! in a run; any hit on a target opens the portal, and walking into the
//! open portal completes the range.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::projectile::Projectile;
use super::rect::Rect;
use super::tick::TickInput;
use crate::consts::{SCENE_HEIGHT, SCENE_WIDTH, TRAINING_SCENE_HEIGHT};
use crate::tuning::PlayerTuning;

pub const TARGET_HEALTH: i32 = 1000;
pub const TARGET_HIT_TICKS: u32 = 30;
pub const TARGET_COUNT: usize = 4;
pub const TARGET_SIZE: Vec2 = Vec2::splat(64.0);
pub const PORTAL_CENTER: Vec2 = Vec2::new(400.0, 250.0);
pub const PORTAL_SIZE: Vec2 = Vec2::splat(64.0);

const HINT_START: &str = "W A S D to move! Hit the Targets Once or More!";
const HINT_PORTAL: &str = "Target Hit! Time to face live enemies! Go through the portal.";

/// A practice target that flashes when hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub rect: Rect,
    pub health: i32,
    hit_timer: u32,
}

impl Target {
    pub fn new(center: Vec2) -> Self {
        Self {
            rect: Rect::from_center(center, TARGET_SIZE),
            health: TARGET_HEALTH,
            hit_timer: 0,
        }
    }

    /// Start the hit flash
    pub fn hit(&mut self) {
        self.hit_timer = TARGET_HIT_TICKS;
    }

    pub fn update(&mut self) {
        self.hit_timer = self.hit_timer.saturating_sub(1);
    }

    pub fn is_hit(&self) -> bool {
        self.hit_timer > 0
    }

    pub fn receive_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingRange {
    pub player: Player,
    pub targets: Vec<Target>,
    pub portal: Rect,
    pub bounds: Rect,
    portal_active: bool,
    complete: bool,
}

impl TrainingRange {
    pub fn new(player_tuning: &PlayerTuning) -> Self {
        let center = Vec2::new(SCENE_WIDTH / 2.0, SCENE_HEIGHT / 2.0);
        let targets = (0..TARGET_COUNT)
            .map(|i| Target::new(Vec2::new(50.0 + 200.0 * i as f32, 50.0)))
            .collect();
        Self {
            player: Player::new(player_tuning, center),
            targets,
            portal: Rect::from_center(PORTAL_CENTER, PORTAL_SIZE),
            bounds: Rect::new(Vec2::ZERO, Vec2::new(SCENE_WIDTH, TRAINING_SCENE_HEIGHT)),
            portal_active: false,
            complete: false,
        }
    }

    pub fn portal_active(&self) -> bool {
        self.portal_active
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Text for the hint panel under the scene
    pub fn hint(&self) -> &'static str {
        if self.portal_active {
            HINT_PORTAL
        } else {
            HINT_START
        }
    }

    pub fn tick(&mut self, input: &TickInput) {
        if self.complete {
            return;
        }

        for target in &mut self.targets {
            target.update();
        }

        let player = &mut self.player;
        player.intent = input.intent;
        for aim in &input.fire_at {
            player.shoot(*aim);
        }
        player.move_by_intent();
        player.rect.clamp_inside(&self.bounds);
        player.advance_projectiles();
        if let Some(cursor) = input.cursor {
            player.aim_at(cursor);
        }

        // A shot is spent on the first target it touches
        let shots: Vec<Projectile> = std::mem::take(&mut player.projectiles);
        let mut kept = Vec::with_capacity(shots.len());
        for shot in shots {
            match self.targets.iter_mut().find(|t| shot.hits(&t.rect)) {
                Some(target) => {
                    target.hit();
                    target.receive_damage(shot.damage);
                    if !self.portal_active {
                        log::info!("Training target hit, portal open");
                    }
                    self.portal_active = true;
                }
                None => kept.push(shot),
            }
        }
        self.player.projectiles = kept;
        self.player.discard_offscreen(&self.bounds);
        self.targets.retain(|t| !t.is_destroyed());

        if self.portal_active && self.player.rect.overlaps(&self.portal) {
            log::info!("Training range complete");
            self.complete = true;
        }
    }
}
