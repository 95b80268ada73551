//! Kunkun Arena headless runner
//!
//! Plays one autopiloted run and logs the outcome. Useful for balance
//! checks: `RUST_LOG=info kunkun-arena 42 --tuning balance.json`.
//!
//! Usage: `kunkun-arena [SEED] [--tuning PATH] [--dump-tuning]`

use std::process::ExitCode;

use kunkun_arena::consts::TICK_RATE;
use kunkun_arena::sim::{Autopilot, GamePhase, GameState, hud, tick};
use kunkun_arena::{SimResult, Tuning};

/// Give up after an hour of game time
const MAX_TICKS: u64 = TICK_RATE as u64 * 60 * 60;

struct Args {
    seed: u64,
    tuning_path: Option<String>,
    dump_tuning: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        seed: 0,
        tuning_path: None,
        dump_tuning: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--tuning" => args.tuning_path = iter.next(),
            "--dump-tuning" => args.dump_tuning = true,
            other => match other.parse() {
                Ok(seed) => args.seed = seed,
                Err(_) => log::warn!("Ignoring unknown argument {:?}", other),
            },
        }
    }
    args
}

/// Load tuning from `path`, falling back to the built-in balance
fn load_tuning(path: Option<&str>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not read {}: {}, using defaults", path, e);
            return Tuning::default();
        }
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::warn!("Rejected tuning {}: {}, using defaults", path, e);
            Tuning::default()
        }
    }
}

fn run(args: &Args) -> SimResult<()> {
    let tuning = load_tuning(args.tuning_path.as_deref());
    if args.dump_tuning {
        println!("{}", tuning.to_json()?);
        return Ok(());
    }

    log::info!("Kunkun Arena (headless) starting, seed {}", args.seed);
    let mut state = GameState::new(tuning);
    let mut pilot = Autopilot::new(args.seed);

    while state.phase != GamePhase::GameOver && state.time_ticks < MAX_TICKS {
        let input = pilot.next_input(&state);
        tick(&mut state, &input)?;
    }

    match state.last_run {
        Some(summary) => println!(
            "{:?} at wave {} after {:.1}s: {} melee kills, {} ranged kills",
            summary.outcome,
            summary.wave,
            state.time_ticks as f64 / TICK_RATE as f64,
            summary.melee_kills,
            summary.ranged_kills
        ),
        None => {
            let hud = hud(&state);
            println!(
                "Still alive at wave {} after {} ticks (health {})",
                hud.wave, state.time_ticks, hud.health
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    let args = parse_args();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
