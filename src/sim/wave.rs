//! Wave director: stages, spawn planning and run bookkeeping
//!
//! Spawn counts are pure functions of the wave number. Which roster
//! applies, how many of each archetype appear and where they stand is all
//! decided here; `GameState` only instantiates the plan.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::tuning::{Archetype, AttackSpec, Tuning};

/// Thematic stage of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    One,
    Two,
    Three,
}

impl Stage {
    /// Stage shown for `wave` (wave 0 is the lead-in to stage one)
    pub fn for_wave(wave: u32) -> Stage {
        match wave {
            0..=8 => Stage::One,
            9..=13 => Stage::Two,
            _ => Stage::Three,
        }
    }

    /// Floor texture key for the render layer
    pub fn backdrop(&self) -> &'static str {
        match self {
            Stage::One => "stone_brick",
            Stage::Two => "desert",
            Stage::Three => "grass",
        }
    }
}

/// Which enemy collection an archetype belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyClass {
    Melee,
    Ranged,
    Fluid,
}

impl EnemyClass {
    pub fn of(attack: &AttackSpec) -> EnemyClass {
        match attack {
            AttackSpec::Melee => EnemyClass::Melee,
            AttackSpec::Ranged { .. } => EnemyClass::Ranged,
            AttackSpec::AreaMelee { .. } => EnemyClass::Fluid,
        }
    }
}

/// How many of one archetype a wave fields
#[derive(Debug, Clone)]
pub struct SpawnGroup<'a> {
    pub archetype: &'a Archetype,
    pub count: usize,
}

impl SpawnGroup<'_> {
    /// Diagonal stagger: instance `i` stands at `offset * (i + 1)` on both axes
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        let offset = self.archetype.spawn_offset;
        (1..=self.count).map(move |n| Vec2::splat(offset * n as f32))
    }
}

/// Everything a wave will spawn, in roster order
#[derive(Debug, Clone)]
pub struct WavePlan<'a> {
    pub wave: u32,
    pub stage: Stage,
    pub groups: Vec<SpawnGroup<'a>>,
}

impl WavePlan<'_> {
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }
}

/// Resolve the spawn plan for `wave`. Fails when no roster covers it.
pub fn plan_wave(tuning: &Tuning, wave: u32) -> SimResult<WavePlan<'_>> {
    let roster = tuning.roster_for(wave)?;
    let groups = roster
        .archetypes
        .iter()
        .map(|archetype| SpawnGroup {
            archetype,
            count: archetype.count.count(wave),
        })
        .collect();
    Ok(WavePlan {
        wave,
        stage: roster.stage,
        groups,
    })
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

/// Statistics for the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub wave: u32,
    pub melee_kills: u32,
    pub ranged_kills: u32,
}

/// Wave counter and kill tallies for the current run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub wave: u32,
    pub melee_kills: u32,
    pub ranged_kills: u32,
}

impl RunState {
    pub fn record_kill(&mut self, class: EnemyClass) {
        match class {
            EnemyClass::Melee | EnemyClass::Fluid => self.melee_kills += 1,
            EnemyClass::Ranged => self.ranged_kills += 1,
        }
    }

    /// Close the run: snapshot the tallies, then zero everything
    pub fn finish(&mut self, outcome: RunOutcome) -> RunSummary {
        let summary = RunSummary {
            outcome,
            wave: self.wave,
            melee_kills: self.melee_kills,
            ranged_kills: self.ranged_kills,
        };
        self.reset();
        summary
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
