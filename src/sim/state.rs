//! Game state and run lifecycle
//!
//! Everything the frame driver mutates lives here: the player, the three
//! enemy collections, wave/kill bookkeeping and the current phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::player::Player;
use super::rect::Rect;
use super::wave::{EnemyClass, RunOutcome, RunState, RunSummary, Stage, plan_wave};
use crate::consts::{SCENE_HEIGHT, SCENE_WIDTH};
use crate::error::SimResult;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Quiet countdown before the next wave spawns
    Breather,
    /// Active combat
    Playing,
    /// Game is paused
    Paused,
    /// Run ended (see `GameState::last_run`)
    GameOver,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub player: Player,
    pub melee_enemies: Vec<Enemy>,
    pub ranged_enemies: Vec<Enemy>,
    pub fluid_enemies: Vec<Enemy>,
    pub run: RunState,
    pub phase: GamePhase,
    /// Phase to return to when unpausing
    resume_phase: GamePhase,
    /// Ticks left in the current breather
    pub breather_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Scene bounds the player is clamped to
    pub bounds: Rect,
    /// Outcome of the most recently finished run
    pub last_run: Option<RunSummary>,
    /// Death splats waiting to be drawn once
    #[serde(skip)]
    pub(crate) pending_splats: Vec<Vec2>,
    next_id: u32,
}

impl GameState {
    /// New run on the default scene, opening breather already running
    pub fn new(tuning: Tuning) -> Self {
        let bounds = Rect::new(Vec2::ZERO, Vec2::new(SCENE_WIDTH, SCENE_HEIGHT));
        let player = Player::new(&tuning.player, bounds.center());
        let breather_ticks = tuning.breather.opening_ticks;
        Self {
            tuning,
            player,
            melee_enemies: Vec::new(),
            ranged_enemies: Vec::new(),
            fluid_enemies: Vec::new(),
            run: RunState::default(),
            phase: GamePhase::Breather,
            resume_phase: GamePhase::Breather,
            breather_ticks,
            time_ticks: 0,
            bounds,
            last_run: None,
            pending_splats: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn stage(&self) -> Stage {
        Stage::for_wave(self.run.wave)
    }

    /// All live enemies, melee then ranged then fluid
    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.melee_enemies
            .iter()
            .chain(&self.ranged_enemies)
            .chain(&self.fluid_enemies)
    }

    pub fn enemy_count(&self) -> usize {
        self.melee_enemies.len() + self.ranged_enemies.len() + self.fluid_enemies.len()
    }

    /// A wave is complete once all three collections are empty at the same time
    pub fn wave_cleared(&self) -> bool {
        self.melee_enemies.is_empty() && self.ranged_enemies.is_empty() && self.fluid_enemies.is_empty()
    }

    pub fn clear_enemies(&mut self) {
        self.melee_enemies.clear();
        self.ranged_enemies.clear();
        self.fluid_enemies.clear();
    }

    /// Instantiate the spawn plan for `wave`. Returns how many enemies spawned.
    pub fn spawn_wave(&mut self, wave: u32) -> SimResult<usize> {
        let plan = plan_wave(&self.tuning, wave)?;
        let mut next_id = self.next_id;
        for group in &plan.groups {
            let class = EnemyClass::of(&group.archetype.attack);
            for pos in group.positions() {
                let enemy = Enemy::spawn(next_id, group.archetype, pos);
                next_id += 1;
                match class {
                    EnemyClass::Melee => self.melee_enemies.push(enemy),
                    EnemyClass::Ranged => self.ranged_enemies.push(enemy),
                    EnemyClass::Fluid => self.fluid_enemies.push(enemy),
                }
            }
        }
        self.next_id = next_id;
        log::info!(
            "Wave {} ({:?}): {} enemies",
            wave,
            plan.stage,
            plan.total()
        );
        Ok(plan.total())
    }

    /// Move on from the wave just completed to the next one.
    ///
    /// Completing a stage-transition wave removes every live enemy first.
    pub fn advance_wave(&mut self) -> SimResult<()> {
        let completed = self.run.wave;
        if self.tuning.is_transition_wave(completed) {
            log::info!(
                "Stage transition after wave {}: clearing {} enemies",
                completed,
                self.enemy_count()
            );
            self.clear_enemies();
        }
        self.run.wave = completed + 1;
        self.spawn_wave(self.run.wave)?;
        self.phase = GamePhase::Playing;
        Ok(())
    }

    /// Handle a completed wave: win the run or queue the next wave
    pub fn complete_wave(&mut self) -> SimResult<()> {
        if self.run.wave >= self.tuning.victory_wave {
            self.finish_run(RunOutcome::Victory);
            return Ok(());
        }
        let pause = if self.run.wave == 0 {
            self.tuning.breather.opening_ticks
        } else {
            self.tuning.breather.between_waves_ticks
        };
        if pause == 0 {
            self.advance_wave()
        } else {
            log::info!("Wave {} complete", self.run.wave);
            self.breather_ticks = pause;
            self.phase = GamePhase::Breather;
            Ok(())
        }
    }

    /// End the run, keep its statistics and zero the counters
    pub fn finish_run(&mut self, outcome: RunOutcome) {
        let summary = self.run.finish(outcome);
        log::info!(
            "Run over: {:?} at wave {} ({} melee, {} ranged kills)",
            summary.outcome,
            summary.wave,
            summary.melee_kills,
            summary.ranged_kills
        );
        self.last_run = Some(summary);
        self.player.restore();
        self.clear_enemies();
        self.phase = GamePhase::GameOver;
    }

    /// Quit mid-run: counters reset, no summary kept
    pub fn abandon_run(&mut self) {
        log::info!("Run abandoned at wave {}", self.run.wave);
        self.run.reset();
        self.player.restore();
        self.clear_enemies();
        self.phase = GamePhase::GameOver;
    }

    /// Start a fresh run after `GameOver`
    pub fn restart(&mut self) {
        self.player = Player::new(&self.tuning.player, self.bounds.center());
        self.clear_enemies();
        self.run.reset();
        self.pending_splats.clear();
        self.breather_ticks = self.tuning.breather.opening_ticks;
        self.phase = GamePhase::Breather;
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing | GamePhase::Breather => {
                self.resume_phase = self.phase;
                self.phase = GamePhase::Paused;
            }
            GamePhase::Paused => self.phase = self.resume_phase,
            GamePhase::GameOver => {}
        }
    }
}
