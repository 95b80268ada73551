//! Idle/demo mode driver
//!
//! Reads the state and produces the `TickInput` a player would: cursor on
//! the nearest enemy, a shot every few ticks, and strafing that backs away
//! from anything too close. All randomness comes from one seeded `Pcg32`,
//! so the same seed always plays the same run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::player::MoveIntent;
use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// Ticks between shots
pub const DEFAULT_FIRE_INTERVAL: u32 = 8;
/// Enemies closer than this make the autopilot back off
const PANIC_DISTANCE: f32 = 150.0;
/// How often a new random strafe may be picked
const STRAFE_PERIOD: u32 = 30;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    fire_interval: u32,
    ticks: u32,
    strafe: MoveIntent,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            fire_interval: DEFAULT_FIRE_INTERVAL,
            ticks: 0,
            strafe: MoveIntent::default(),
        }
    }

    pub fn with_fire_interval(mut self, ticks: u32) -> Self {
        self.fire_interval = ticks.max(1);
        self
    }

    /// Decide this tick's input
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();
        if state.phase == GamePhase::GameOver {
            return input;
        }
        self.ticks += 1;

        let me = state.player.center();
        let nearest = state
            .enemies()
            .map(|e| e.body.center())
            .min_by(|a, b| {
                a.distance_squared(me)
                    .partial_cmp(&b.distance_squared(me))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        if self.ticks.is_multiple_of(STRAFE_PERIOD) && self.rng.random_bool(0.5) {
            self.strafe = MoveIntent {
                left: self.rng.random_bool(0.5),
                right: self.rng.random_bool(0.5),
                up: self.rng.random_bool(0.5),
                down: self.rng.random_bool(0.5),
            };
        }
        input.intent = self.strafe;

        if let Some(threat) = nearest {
            input.cursor = Some(threat);
            if self.ticks.is_multiple_of(self.fire_interval) {
                // Small aim jitter so shots fan out over a crowd
                let jitter = Vec2::new(
                    self.rng.random_range(-8.0..=8.0),
                    self.rng.random_range(-8.0..=8.0),
                );
                input.fire_at.push(threat + jitter);
            }
            if threat.distance(me) < PANIC_DISTANCE {
                input.intent = flee(me, threat);
            }
        }

        input
    }
}

/// Movement flags pointing away from `threat`
fn flee(from: Vec2, threat: Vec2) -> MoveIntent {
    let away = from - threat;
    MoveIntent {
        left: away.x < 0.0,
        right: away.x > 0.0,
        up: away.y < 0.0,
        down: away.y > 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_flee_points_away() {
        let intent = flee(Vec2::new(100.0, 100.0), Vec2::new(150.0, 50.0));
        assert!(intent.left && intent.down);
        assert!(!intent.right && !intent.up);
    }

    #[test]
    fn test_idle_without_enemies() {
        let state = GameState::new(Tuning::default());
        let mut pilot = Autopilot::new(7);
        for _ in 0..10 {
            let input = pilot.next_input(&state);
            assert!(input.fire_at.is_empty());
            assert!(input.cursor.is_none());
        }
    }

    #[test]
    fn test_aims_at_nearest_and_fires_on_interval() {
        let mut state = GameState::new(Tuning::default());
        state.spawn_wave(1).unwrap();
        let mut pilot = Autopilot::new(1).with_fire_interval(3);
        let shots: Vec<usize> = (0..6)
            .map(|_| pilot.next_input(&state).fire_at.len())
            .collect();
        assert_eq!(shots, vec![0, 0, 1, 0, 0, 1]);

        let input = pilot.next_input(&state);
        let me = state.player.center();
        let cursor = input.cursor.unwrap();
        let closest = state
            .enemies()
            .map(|e| e.body.center().distance(me))
            .fold(f32::INFINITY, f32::min);
        assert!((cursor.distance(me) - closest).abs() < 1e-3);
    }

    #[test]
    fn test_same_seed_same_inputs() {
        let mut state = GameState::new(Tuning::default());
        state.spawn_wave(3).unwrap();
        let mut a = Autopilot::new(42);
        let mut b = Autopilot::new(42);
        for _ in 0..200 {
            let x = a.next_input(&state);
            let y = b.next_input(&state);
            assert_eq!(x.intent, y.intent);
            assert_eq!(x.fire_at, y.fire_at);
        }
    }
}
