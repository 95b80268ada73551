//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` per frame of the external tick source)
//! - Seeded RNG only (the autopilot)
//! - Stable iteration order (spawn order within each enemy collection)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod combatant;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;
pub mod training;
pub mod view;
pub mod wave;

pub use autopilot::Autopilot;
pub use combatant::{Facing, MobileCombatant, Obstacle, avoid_overlap};
pub use enemy::{AttackStrategy, Enemy, TickContext};
pub use player::{MoveIntent, Player};
pub use projectile::{Projectile, aimed_velocity};
pub use rect::Rect;
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use training::{Target, TrainingRange};
pub use view::{DrawRequest, Hud, ProjectileOwner, collect_draw_requests, hud};
pub use wave::{
    EnemyClass, RunOutcome, RunState, RunSummary, SpawnGroup, Stage, WavePlan, plan_wave,
};
