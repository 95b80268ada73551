//! Kunkun Arena - a top-down wave-survival shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (movement, combat, waves, run state)
//! - `tuning`: Data-driven game balance (player, enemies, stage rosters)
//! - `error`: Error types for tuning and wave construction
//!
//! Rendering, input polling and menus live outside this crate. The
//! simulation consumes `sim::TickInput` and exposes read-only views in
//! `sim::view`.

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::{SimError, SimResult};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (frames per second of the external tick source)
    pub const TICK_RATE: u32 = 60;

    /// Scene dimensions in pixels
    pub const SCENE_WIDTH: f32 = 800.0;
    pub const SCENE_HEIGHT: f32 = 600.0;

    /// Training range is shorter; the bottom strip holds the hint panel
    pub const TRAINING_SCENE_HEIGHT: f32 = 500.0;
}

/// Unit vector from `from` toward `to`, with the distance between them.
///
/// Returns `None` when the points coincide.
#[inline]
pub fn unit_toward(from: Vec2, to: Vec2) -> Option<(Vec2, f32)> {
    let delta = to - from;
    let distance = delta.length();
    if distance > 0.0 {
        Some((delta / distance, distance))
    } else {
        None
    }
}
