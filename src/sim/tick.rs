//! Fixed timestep simulation tick
//!
//! One call advances the run by exactly one frame of the external tick
//! source. Order within a frame: player intents and movement, player shots,
//! then melee, ranged and fluid enemies, then removal and the wave check.

use glam::Vec2;

use super::combatant::Obstacle;
use super::enemy::{Enemy, TickContext};
use super::player::MoveIntent;
use super::projectile::Projectile;
use super::state::{GamePhase, GameState};
use super::wave::RunOutcome;
use crate::error::SimResult;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub intent: MoveIntent,
    /// One entry per fire event this frame (target point in scene space)
    pub fire_at: Vec<Vec2>,
    /// Latest cursor position, drives player facing
    pub cursor: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
    /// Skip to next wave (debug/testing)
    pub skip_wave: bool,
    /// Start a new run from the game-over screen
    pub restart: bool,
    /// Abandon the current run (back to menu)
    pub quit: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> SimResult<()> {
    if input.pause {
        state.toggle_pause();
    }

    // Quit works from the breather, mid-wave and the pause menu
    if input.quit && state.phase != GamePhase::GameOver {
        state.abandon_run();
        return Ok(());
    }

    match state.phase {
        GamePhase::Paused => return Ok(()),
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
            }
            return Ok(());
        }
        GamePhase::Breather | GamePhase::Playing => {}
    }

    if input.skip_wave {
        log::info!("Skipping wave {}", state.run.wave);
        state.clear_enemies();
        if state.run.wave >= state.tuning.victory_wave {
            state.finish_run(RunOutcome::Victory);
            return Ok(());
        }
        return state.advance_wave();
    }

    state.time_ticks += 1;

    update_player(state, input);
    update_enemies(state);

    if state.player.is_destroyed() {
        state.finish_run(RunOutcome::Defeat);
        return Ok(());
    }

    match state.phase {
        GamePhase::Breather => {
            state.breather_ticks = state.breather_ticks.saturating_sub(1);
            if state.breather_ticks == 0 {
                state.advance_wave()?;
            }
        }
        GamePhase::Playing => {
            if state.wave_cleared() {
                state.complete_wave()?;
            }
        }
        GamePhase::Paused | GamePhase::GameOver => {}
    }

    Ok(())
}

fn update_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    player.intent = input.intent;
    for target in &input.fire_at {
        player.shoot(*target);
    }
    player.move_by_intent();
    player.rect.clamp_inside(&state.bounds);
    player.advance_projectiles();
    if let Some(cursor) = input.cursor {
        player.aim_at(cursor);
    }
    player.tick_splat();
}

/// Run every enemy collection against this frame's player shots.
///
/// Player shots are read-only during the pass; consumed ones are flagged in
/// a side mask and compacted once all three collections have run.
fn update_enemies(state: &mut GameState) {
    let shots: Vec<Projectile> = std::mem::take(&mut state.player.projectiles);
    let mut spent = vec![false; shots.len()];
    let mut obstacles: Vec<Obstacle> = state.enemies().map(Enemy::obstacle).collect();

    for enemies in [
        &mut state.melee_enemies,
        &mut state.ranged_enemies,
        &mut state.fluid_enemies,
    ] {
        for enemy in enemies.iter_mut() {
            let mut ctx = TickContext {
                player: &mut state.player,
                player_shots: &shots,
                spent_shots: &mut spent,
                obstacles: &obstacles,
                tuning: &state.tuning.enemies,
            };
            let died = enemy.update(&mut ctx);

            let id = enemy.id();
            if died {
                state.run.record_kill(enemy.class());
                let at = enemy
                    .body
                    .take_hit_marker()
                    .unwrap_or_else(|| enemy.body.center());
                state.pending_splats.push(at);
                obstacles.retain(|o| o.id != id);
                log::debug!("{} #{} destroyed", enemy.sprite, id);
            } else if let Some(slot) = obstacles.iter_mut().find(|o| o.id == id) {
                slot.rect = enemy.body.rect;
            }
            enemy.discard_offscreen(&state.bounds);
        }
        enemies.retain(|e| !e.is_destroyed());
    }

    state.player.projectiles = shots
        .into_iter()
        .zip(spent)
        .filter_map(|(shot, used)| (!used).then_some(shot))
        .collect();
    state.player.discard_offscreen(&state.bounds);
}
