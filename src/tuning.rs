//! Data-driven game balance
//!
//! Every number the simulation uses lives here: player constants, shared
//! enemy constants, breather timings and the per-stage enemy rosters with
//! their spawn-count formulas. `Tuning::default()` is the shipped balance;
//! alternative balances can be loaded from JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;
use crate::error::{SimError, SimResult};
use crate::sim::Stage;

/// Player constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTuning {
    /// Pixels per tick per active movement flag
    pub speed: f32,
    /// Starting (and restored) health
    pub health: i32,
    pub shot_damage: i32,
    /// Pixels per tick
    pub shot_speed: f32,
    /// Ticks the splat stays visible after the player is hit
    pub splat_duration: u32,
    pub size: Vec2,
    pub shot_size: Vec2,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 4.0,
            health: 30_000,
            shot_damage: 50,
            shot_speed: 15.0,
            splat_duration: 360,
            size: Vec2::new(48.0, 48.0),
            shot_size: Vec2::new(16.0, 16.0),
        }
    }
}

/// Constants shared by every enemy archetype
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTuning {
    /// Melee enemies chase the player inside this distance
    pub melee_detection_radius: f32,
    /// Ranged enemies engage the player inside this distance
    pub ranged_detection_radius: f32,
    /// Ranged enemies stop closing once this near the player
    pub standoff_distance: f32,
    /// Ticks a contact splat stays on an enemy
    pub splat_duration: u32,
    pub projectile_size: Vec2,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            melee_detection_radius: 100_000.0,
            ranged_detection_radius: 1_000_000.0,
            standoff_distance: 100.0,
            splat_duration: 120,
            projectile_size: Vec2::new(10.0, 10.0),
        }
    }
}

/// Quiet periods between waves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreatherTuning {
    /// Delay before the first wave of a run
    pub opening_ticks: u32,
    /// Delay after each cleared wave
    pub between_waves_ticks: u32,
}

impl Default for BreatherTuning {
    fn default() -> Self {
        Self {
            opening_ticks: 3 * TICK_RATE,
            between_waves_ticks: 5 * TICK_RATE,
        }
    }
}

/// How an archetype attacks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AttackSpec {
    /// Contact damage when the attack cooldown expires
    Melee,
    /// Fires aimed projectiles on cooldown
    Ranged { projectile_speed: f32 },
    /// Melee plus a cosmetic area effect after every cooldown reset.
    ///
    /// The effect shows for `area_duration` ticks, counted down each tick.
    AreaMelee { area_duration: u32 },
}

/// Affine spawn count: `per_wave * wave + base`, never below zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnFormula {
    pub per_wave: i32,
    pub base: i32,
}

impl SpawnFormula {
    pub const fn new(per_wave: i32, base: i32) -> Self {
        Self { per_wave, base }
    }

    /// Number of instances for `wave`; negative results spawn none
    pub fn count(&self, wave: u32) -> usize {
        let raw = i64::from(self.per_wave) * i64::from(wave) + i64::from(self.base);
        raw.max(0) as usize
    }
}

/// A named enemy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Archetype {
    /// Visual variant key for the render layer
    pub sprite: String,
    pub health: i32,
    /// Pixels per tick
    pub speed: f32,
    pub damage: i32,
    /// Ticks between attacks
    pub attack_cooldown: u32,
    /// Instance `i` spawns at `spawn_offset * (i + 1)` on both axes
    pub spawn_offset: f32,
    pub size: Vec2,
    pub count: SpawnFormula,
    pub attack: AttackSpec,
}

/// Enemy roster for one stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageRoster {
    pub stage: Stage,
    pub first_wave: u32,
    pub last_wave: u32,
    pub archetypes: Vec<Archetype>,
}

impl StageRoster {
    pub fn covers(&self, wave: u32) -> bool {
        (self.first_wave..=self.last_wave).contains(&wave)
    }
}

/// Complete balance table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub enemies: EnemyTuning,
    pub breather: BreatherTuning,
    /// Clearing this wave wins the run
    pub victory_wave: u32,
    /// Completing one of these waves clears every live enemy first
    pub transition_waves: Vec<u32>,
    pub stages: Vec<StageRoster>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            enemies: EnemyTuning::default(),
            breather: BreatherTuning::default(),
            victory_wave: 17,
            transition_waves: vec![9, 13, 18],
            stages: default_rosters(),
        }
    }
}

impl Tuning {
    /// Parse and validate a balance table
    pub fn from_json(json: &str) -> SimResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: {} stages, victory at wave {}",
            tuning.stages.len(),
            tuning.victory_wave
        );
        Ok(tuning)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Roster responsible for `wave`
    pub fn roster_for(&self, wave: u32) -> SimResult<&StageRoster> {
        self.stages
            .iter()
            .find(|r| r.covers(wave))
            .ok_or(SimError::NoStageForWave { wave })
    }

    pub fn is_transition_wave(&self, wave: u32) -> bool {
        self.transition_waves.contains(&wave)
    }

    pub fn validate(&self) -> SimResult<()> {
        for (i, a) in self.stages.iter().enumerate() {
            if a.archetypes.is_empty() {
                return Err(SimError::EmptyRoster {
                    first_wave: a.first_wave,
                    last_wave: a.last_wave,
                });
            }
            for b in &self.stages[i + 1..] {
                if a.first_wave <= b.last_wave && b.first_wave <= a.last_wave {
                    return Err(SimError::OverlappingStages {
                        first: (a.first_wave, a.last_wave),
                        second: (b.first_wave, b.last_wave),
                    });
                }
            }
            for archetype in &a.archetypes {
                validate_archetype(archetype)?;
            }
        }
        // Every wave of a run must resolve to a roster
        for wave in 1..=self.victory_wave {
            self.roster_for(wave)?;
        }
        Ok(())
    }
}

fn validate_archetype(a: &Archetype) -> SimResult<()> {
    let invalid = |reason: &str| SimError::InvalidArchetype {
        sprite: a.sprite.clone(),
        reason: reason.to_string(),
    };
    if a.health <= 0 {
        return Err(invalid("health must be positive"));
    }
    if a.size.x <= 0.0 || a.size.y <= 0.0 {
        return Err(invalid("size must be positive"));
    }
    if let AttackSpec::Ranged { projectile_speed } = a.attack
        && projectile_speed <= 0.0
    {
        return Err(invalid("projectile speed must be positive"));
    }
    Ok(())
}

/// Shorthand for the shipped roster tables
#[allow(clippy::too_many_arguments)]
fn archetype(
    sprite: &str,
    health: i32,
    speed: f32,
    damage: i32,
    attack_cooldown: u32,
    spawn_offset: f32,
    count: SpawnFormula,
    attack: AttackSpec,
) -> Archetype {
    Archetype {
        sprite: sprite.to_string(),
        health,
        speed,
        damage,
        attack_cooldown,
        spawn_offset,
        size: Vec2::new(48.0, 48.0),
        count,
        attack,
    }
}

fn ranged(projectile_speed: f32) -> AttackSpec {
    AttackSpec::Ranged { projectile_speed }
}

fn default_rosters() -> Vec<StageRoster> {
    vec![
        StageRoster {
            stage: Stage::One,
            first_wave: 1,
            last_wave: 8,
            archetypes: vec![
                archetype("civil_protection", 70, 3.0, 5, 360, 100.0, SpawnFormula::new(1, 3), AttackSpec::Melee),
                archetype("regular_soldier", 100, 0.7, 8, 60, 200.0, SpawnFormula::new(1, 2), ranged(6.5)),
                archetype("heavy_grunt", 300, 0.4, 10, 45, 300.0, SpawnFormula::new(1, -3), ranged(4.0)),
                archetype("elite", 200, 1.2, 20, 30, 400.0, SpawnFormula::new(1, -5), ranged(8.0)),
            ],
        },
        StageRoster {
            stage: Stage::Two,
            first_wave: 9,
            last_wave: 13,
            archetypes: vec![
                archetype(
                    "worker",
                    25,
                    4.0,
                    10,
                    20,
                    100.0,
                    SpawnFormula::new(3, -20),
                    AttackSpec::AreaMelee { area_duration: 12 },
                ),
                archetype("hazmat", 100, 1.2, 20, 30, 400.0, SpawnFormula::new(1, 3), ranged(8.0)),
                archetype("hazmat_heavy", 400, 3.0, 50, 160, 400.0, SpawnFormula::new(1, -5), ranged(4.0)),
            ],
        },
        StageRoster {
            stage: Stage::Three,
            first_wave: 14,
            last_wave: 17,
            archetypes: vec![
                archetype("qz_soldier", 100, 0.7, 8, 40, 200.0, SpawnFormula::new(1, -5), ranged(7.5)),
                archetype("qz_commander", 100, 0.7, 10, 60, 200.0, SpawnFormula::new(1, -8), ranged(7.0)),
                archetype("qz_suppressor", 300, 0.4, 8, 45, 300.0, SpawnFormula::new(1, -7), ranged(5.0)),
                archetype("qz_charger", 200, 1.2, 3, 5, 400.0, SpawnFormula::new(1, -8), ranged(4.0)),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_tuning_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.victory_wave, 17);
        assert!(tuning.is_transition_wave(13));
        assert!(!tuning.is_transition_wave(12));
    }

    #[test]
    fn test_formula_clamps_negative_to_zero() {
        let grunt = SpawnFormula::new(1, -3);
        assert_eq!(grunt.count(1), 0);
        assert_eq!(grunt.count(3), 0);
        assert_eq!(grunt.count(4), 1);

        let worker = SpawnFormula::new(3, -20);
        assert_eq!(worker.count(9), 7);
        assert_eq!(worker.count(6), 0);
    }

    #[test]
    fn test_roster_lookup() {
        let tuning = Tuning::default();
        assert_eq!(tuning.roster_for(1).unwrap().stage, Stage::One);
        assert_eq!(tuning.roster_for(8).unwrap().stage, Stage::One);
        assert_eq!(tuning.roster_for(9).unwrap().stage, Stage::Two);
        assert_eq!(tuning.roster_for(13).unwrap().stage, Stage::Two);
        assert_eq!(tuning.roster_for(14).unwrap().stage, Stage::Three);
        assert_eq!(tuning.roster_for(17).unwrap().stage, Stage::Three);
        assert!(matches!(
            tuning.roster_for(18),
            Err(SimError::NoStageForWave { wave: 18 })
        ));
    }

    #[test]
    fn test_json_reload_of_shipped_balance() {
        let json = Tuning::default().to_json().unwrap();
        let reloaded = Tuning::from_json(&json).unwrap();
        assert_eq!(reloaded.stages.len(), 3);
        assert_eq!(reloaded.stages[1].archetypes[0].attack, AttackSpec::AreaMelee { area_duration: 12 });
    }

    #[test]
    fn test_rejects_overlapping_stages() {
        let mut tuning = Tuning::default();
        tuning.stages[1].first_wave = 8;
        assert!(matches!(
            tuning.validate(),
            Err(SimError::OverlappingStages { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_archetype() {
        let mut tuning = Tuning::default();
        tuning.stages[0].archetypes[1].attack = AttackSpec::Ranged { projectile_speed: 0.0 };
        assert!(matches!(
            tuning.validate(),
            Err(SimError::InvalidArchetype { .. })
        ));
    }

    #[test]
    fn test_rejects_uncovered_victory_wave() {
        let mut tuning = Tuning::default();
        tuning.victory_wave = 20;
        assert!(matches!(
            tuning.validate(),
            Err(SimError::NoStageForWave { wave: 18 })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(SimError::InvalidTuning(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_counts_never_negative(per_wave in -5i32..5, base in -50i32..50, wave in 0u32..64) {
            let f = SpawnFormula::new(per_wave, base);
            let expected = (per_wave as i64 * wave as i64 + base as i64).max(0) as usize;
            prop_assert_eq!(f.count(wave), expected);
        }
    }
}
