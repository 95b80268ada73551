//! Error types
//!
//! Only construction-time problems are errors. Gameplay outcomes (player
//! death, victory) are modelled as state in `sim::GamePhase`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("no stage roster covers wave {wave}")]
    NoStageForWave { wave: u32 },

    #[error("tuning JSON rejected: {0}")]
    InvalidTuning(#[from] serde_json::Error),

    #[error("stage rosters overlap: waves {first:?} and {second:?}")]
    OverlappingStages {
        first: (u32, u32),
        second: (u32, u32),
    },

    #[error("stage roster for waves {first_wave}..={last_wave} has no archetypes")]
    EmptyRoster { first_wave: u32, last_wave: u32 },

    #[error("archetype '{sprite}' is invalid: {reason}")]
    InvalidArchetype { sprite: String, reason: String },
}

/// Result alias for simulation setup
pub type SimResult<T> = Result<T, SimError>;
