use kunkun_arena::Tuning;
use kunkun_arena::sim::{
    Autopilot, GamePhase, GameState, RunOutcome, RunState, Stage, TickInput, tick,
};

fn quick_tuning() -> Tuning {
    let mut tuning = Tuning::default();
    tuning.breather.opening_ticks = 1;
    tuning.breather.between_waves_ticks = 1;
    tuning
}

fn skip() -> TickInput {
    TickInput {
        skip_wave: true,
        ..Default::default()
    }
}

fn stage_sprites(tuning: &Tuning, stage: Stage) -> Vec<String> {
    tuning
        .stages
        .iter()
        .filter(|r| r.stage == stage)
        .flat_map(|r| r.archetypes.iter().map(|a| a.sprite.clone()))
        .collect()
}

#[test]
fn same_seed_same_run() {
    let mut a = GameState::new(quick_tuning());
    let mut b = GameState::new(quick_tuning());
    let mut pilot_a = Autopilot::new(2024);
    let mut pilot_b = Autopilot::new(2024);

    for _ in 0..3000 {
        let input_a = pilot_a.next_input(&a);
        let input_b = pilot_b.next_input(&b);
        tick(&mut a, &input_a).unwrap();
        tick(&mut b, &input_b).unwrap();
    }

    assert_eq!(a.time_ticks, b.time_ticks);
    assert_eq!(a.run, b.run);
    assert_eq!(a.phase, b.phase);
    assert_eq!(a.player.health, b.player.health);
    assert_eq!(a.player.rect, b.player.rect);
    assert_eq!(a.enemy_count(), b.enemy_count());
    let ids_a: Vec<u32> = a.enemies().map(|e| e.id()).collect();
    let ids_b: Vec<u32> = b.enemies().map(|e| e.id()).collect();
    assert_eq!(ids_a, ids_b);
}

#[test]
fn clearing_final_wave_wins_and_resets() {
    let mut state = GameState::new(quick_tuning());
    tick(&mut state, &TickInput::default()).unwrap();
    assert_eq!(state.run.wave, 1);

    for expected in 2..=17 {
        tick(&mut state, &skip()).unwrap();
        assert_eq!(state.run.wave, expected);
        assert_eq!(state.phase, GamePhase::Playing);
    }
    state.run.melee_kills = 12;
    state.run.ranged_kills = 30;
    state.clear_enemies();
    tick(&mut state, &TickInput::default()).unwrap();

    assert_eq!(state.phase, GamePhase::GameOver);
    let summary = state.last_run.unwrap();
    assert_eq!(summary.outcome, RunOutcome::Victory);
    assert_eq!(summary.wave, 17);
    assert_eq!(summary.melee_kills, 12);
    assert_eq!(summary.ranged_kills, 30);
    assert_eq!(state.run, RunState::default());
    assert_eq!(state.player.health, 30_000);
}

#[test]
fn player_death_is_defeat() {
    let mut tuning = quick_tuning();
    for archetype in &mut tuning.stages[0].archetypes {
        archetype.damage = 100_000;
        archetype.attack_cooldown = 1;
    }
    let mut state = GameState::new(tuning);

    for _ in 0..600 {
        tick(&mut state, &TickInput::default()).unwrap();
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    assert_eq!(state.phase, GamePhase::GameOver);
    let summary = state.last_run.unwrap();
    assert_eq!(summary.outcome, RunOutcome::Defeat);
    assert_eq!(summary.wave, 1);
    assert_eq!(state.run, RunState::default());
    assert_eq!(state.player.health, 30_000);
    assert!(state.wave_cleared());
}

#[test]
fn every_death_counted_once() {
    let mut state = GameState::new(quick_tuning());
    tick(&mut state, &TickInput::default()).unwrap();
    let spawned = state.enemy_count() as u32;
    assert_eq!(spawned, 7);

    let mut pilot = Autopilot::new(9).with_fire_interval(2);
    for _ in 0..5000 {
        let input = pilot.next_input(&state);
        tick(&mut state, &input).unwrap();
        if state.run.wave != 1 || state.phase == GamePhase::GameOver {
            break;
        }
        let kills = state.run.melee_kills + state.run.ranged_kills;
        assert_eq!(kills + state.enemy_count() as u32, spawned);
    }
}

#[test]
fn wave_one_fields_no_heavies() {
    let mut state = GameState::new(quick_tuning());
    tick(&mut state, &TickInput::default()).unwrap();
    assert!(
        state
            .enemies()
            .all(|e| e.sprite != "heavy_grunt" && e.sprite != "elite")
    );
}

#[test]
fn stage_change_brings_new_roster() {
    let mut state = GameState::new(quick_tuning());
    tick(&mut state, &TickInput::default()).unwrap();
    while state.run.wave < 9 {
        tick(&mut state, &skip()).unwrap();
    }
    let stage_two = stage_sprites(&state.tuning, Stage::Two);
    assert_eq!(state.stage(), Stage::Two);
    assert!(!state.fluid_enemies.is_empty());
    assert!(state.enemies().all(|e| stage_two.contains(&e.sprite)));

    // Wave 13 is a transition wave: stage three starts from an empty field
    while state.run.wave < 13 {
        tick(&mut state, &skip()).unwrap();
    }
    state.clear_enemies();
    tick(&mut state, &TickInput::default()).unwrap();
    assert_eq!(state.phase, GamePhase::Breather);
    tick(&mut state, &TickInput::default()).unwrap();
    assert_eq!(state.run.wave, 14);
    let stage_three = stage_sprites(&state.tuning, Stage::Three);
    assert!(state.enemies().all(|e| stage_three.contains(&e.sprite)));
    assert!(state.fluid_enemies.is_empty());
}

#[test]
fn tuning_survives_json_reload() {
    let json = quick_tuning().to_json().unwrap();
    let reloaded = Tuning::from_json(&json).unwrap();
    let mut state = GameState::new(reloaded);
    tick(&mut state, &TickInput::default()).unwrap();
    assert_eq!(state.enemy_count(), 7);
}
