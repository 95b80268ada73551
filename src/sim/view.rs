//! Render-facing read model
//!
//! The render layer never touches simulation internals: it asks for a list
//! of draw requests once per frame and reads HUD values. Collecting draw
//! requests consumes one-shot enemy hit-markers and pending death splats.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::combatant::Facing;
use super::rect::Rect;
use super::state::GameState;
use super::wave::Stage;

/// Sprite key the render layer uses for the player
pub const PLAYER_SPRITE: &str = "player";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// One thing to draw this frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawRequest {
    Sprite {
        key: String,
        rect: Rect,
        facing: Facing,
    },
    Projectile {
        owner: ProjectileOwner,
        rect: Rect,
    },
    /// Blood splat at a hit or death position
    Splat { at: Vec2 },
    /// Fluid enemy's area effect, drawn on the side it faces
    AreaEffect { center: Vec2, facing: Facing },
}

/// Build this frame's draw list, back to front.
///
/// Enemy hit-markers are cleared here, so each one is drawn exactly once,
/// even while a contact splat is still counting down.
pub fn collect_draw_requests(state: &mut GameState) -> Vec<DrawRequest> {
    let mut out = Vec::with_capacity(state.enemy_count() + 8);

    for at in state.pending_splats.drain(..) {
        out.push(DrawRequest::Splat { at });
    }

    for enemy in state
        .melee_enemies
        .iter_mut()
        .chain(state.ranged_enemies.iter_mut())
        .chain(state.fluid_enemies.iter_mut())
    {
        out.push(DrawRequest::Sprite {
            key: enemy.sprite.clone(),
            rect: enemy.body.rect,
            facing: enemy.body.facing,
        });
        if enemy.area_effect_active() {
            out.push(DrawRequest::AreaEffect {
                center: enemy.body.center(),
                facing: enemy.body.facing,
            });
        }
        for shot in enemy.projectiles() {
            out.push(DrawRequest::Projectile {
                owner: ProjectileOwner::Enemy,
                rect: shot.rect,
            });
        }
        if let Some(at) = enemy.body.take_hit_marker() {
            out.push(DrawRequest::Splat { at });
        }
    }

    let player = &state.player;
    out.push(DrawRequest::Sprite {
        key: PLAYER_SPRITE.to_string(),
        rect: player.rect,
        facing: player.facing,
    });
    for shot in &player.projectiles {
        out.push(DrawRequest::Projectile {
            owner: ProjectileOwner::Player,
            rect: shot.rect,
        });
    }
    // Player splat lasts for its countdown
    if let Some(at) = player.hit_marker() {
        out.push(DrawRequest::Splat { at });
    }

    out
}

/// Values shown in the heads-up display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub health: i32,
    pub wave: u32,
    pub melee_kills: u32,
    pub ranged_kills: u32,
    pub stage: Stage,
    /// Floor texture for the current stage
    pub backdrop: &'static str,
}

pub fn hud(state: &GameState) -> Hud {
    let stage = state.stage();
    Hud {
        health: state.player.health,
        wave: state.run.wave,
        melee_kills: state.run.melee_kills,
        ranged_kills: state.run.ranged_kills,
        stage,
        backdrop: stage.backdrop(),
    }
}
