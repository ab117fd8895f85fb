//! mission-run: headless mission runner.
//!
//! Usage:
//!   mission-run run --mission missions/demo.json --dt 0.05 --max-secs 120
//!   mission-run training --events

use std::path::PathBuf;
use std::process;

use rampart_core::config::SimConfig;
use rampart_core::constants::DEFAULT_SEED;
use rampart_core::enums::{ActorKind, MissionState};
use rampart_core::events::MissionEvent;
use rampart_sim::scenario::{load_preset, MissionPreset};

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "training" => run_preset(MissionPreset::training(), &args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "mission-run: RAMPART headless mission runner\n\
         \n\
         Commands:\n\
         \n\
         run       Load a mission file and simulate it to the end\n\
         \n\
           --mission <path>   Mission JSON file\n\
         \n\
         training  Simulate the built-in training mission\n\
         \n\
         Options (both commands):\n\
         \n\
           --dt <secs>        Tick length (default: 0.05)\n\
           --max-secs <secs>  Give up after this much mission time (default: 600)\n\
           --seed <N>         RNG seed for weapon spread (default: 42)\n\
           --events           Print every event as a JSON line\n\
         \n\
         Examples:\n\
         \n\
           mission-run run --mission tools/mission-run/missions/demo.json\n\
           RUST_LOG=debug mission-run training --dt 0.1\n"
    );
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match flag_value(args, flag) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("Error: invalid value for {flag}: {raw}");
            process::exit(1);
        }),
    }
}

fn cmd_run(args: &[String]) {
    let Some(path) = flag_value(args, "--mission").map(PathBuf::from) else {
        eprintln!("Error: --mission is required");
        process::exit(1);
    };
    let preset = match load_preset(&path) {
        Ok(preset) => preset,
        Err(e) => {
            eprintln!("Error loading {}: {e}", path.display());
            process::exit(1);
        }
    };
    run_preset(preset, args);
}

fn run_preset(preset: MissionPreset, args: &[String]) {
    let dt: f64 = parse_flag(args, "--dt", 0.05);
    let max_secs: f64 = parse_flag(args, "--max-secs", 600.0);
    let seed: u64 = parse_flag(args, "--seed", DEFAULT_SEED);
    let print_events = args.iter().any(|a| a == "--events");

    if dt <= 0.0 {
        eprintln!("Error: --dt must be positive");
        process::exit(1);
    }

    let config = SimConfig {
        seed,
        ..SimConfig::default()
    };
    let mut controller = preset.controller(config);
    if let Err(e) = preset.start(&mut controller) {
        eprintln!("Error starting '{}': {e}", preset.name);
        process::exit(1);
    }

    println!(
        "Mission '{}': {} waves, {} paths, {} towers",
        preset.name,
        preset.waves.len(),
        preset.paths.len(),
        controller.registry().count_of_kind(ActorKind::Tower)
    );

    let mut kills = 0usize;
    let mut leaks = 0usize;
    loop {
        for event in controller.take_events() {
            match &event {
                MissionEvent::ActorDied {
                    kind: ActorKind::Enemy,
                    damage,
                    ..
                } if damage.amount > 0 => kills += 1,
                MissionEvent::EnemyReachedEnd { .. } => leaks += 1,
                _ => {}
            }
            if print_events {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{line}"),
                    Err(e) => log::warn!("event not printable: {e}"),
                }
            }
        }
        if controller.state() != MissionState::Active || controller.mission_time() >= max_secs {
            break;
        }
        controller.tick(dt);
    }

    let outcome = controller
        .outcome()
        .map_or_else(|| "unfinished".to_string(), |o| format!("{o:?}"));
    println!(
        "Result: {outcome} at t={:.2}s after {} ticks | player health {} | {kills} killed, {leaks} leaked",
        controller.mission_time(),
        controller.tick_count(),
        controller.player_health(),
    );
}
