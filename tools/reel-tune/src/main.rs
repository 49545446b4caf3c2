//! reel-tune: run a scripted reel or gather headlessly and report the outcome.
//!
//! Usage:
//!   reel-tune reel --config tuning.json --distance 10 [--radius 0.25] [--trace]
//!   reel-tune gather --config tuning.json --frames 60 --fps 30

use std::fs;
use std::process;

use glam::DVec3;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use haenyeo_core::commands::PlayerCommand;
use haenyeo_core::components::ClipInfo;
use haenyeo_core::config::TuningConfig;
use haenyeo_core::constants::{CLIP_FRAME_RATE, GATHER_CLIP};
use haenyeo_core::enums::{ColliderShape, GatherPhase, RetrievalMode};
use haenyeo_core::events::GameEvent;
use haenyeo_sim::world_setup::{self, CollectibleSetup, PlayerSetup};
use haenyeo_sim::{SimConfig, SimulationEngine};

/// Tether origin of the default player rig.
const ANCHOR: DVec3 = DVec3::new(0.3, 1.2, -0.4);

#[derive(Debug, Serialize)]
struct Report {
    outcome: String,
    /// Seconds from trigger to resolution.
    elapsed: f64,
    ticks: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    delay: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    trace: Vec<DVec3>,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    init_logging(&args[2..]);

    let report = match args[1].as_str() {
        "reel" => cmd_reel(&args[2..]),
        "gather" => cmd_gather(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: failed to encode report: {e}");
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "reel-tune: HAENYEO retrieval tuning tool\n\
         \n\
         Commands:\n\
         \n\
         reel      Hook one collectible and reel it in\n\
         \n\
           --config <path>    Tuning JSON (optional, defaults otherwise)\n\
           --distance <m>     Anchor-to-target distance (default: 10)\n\
           --radius <m>       Target collider radius (default: 0.25)\n\
           --trace            Include per-tick target positions\n\
         \n\
         gather    Run one gather sequence on a collectible within reach\n\
         \n\
           --config <path>    Tuning JSON (optional)\n\
           --frames <N>       Frames of the gather segment (default: config)\n\
           --fps <N>          Clip frame rate (default: 30)\n\
         \n\
         Common:\n\
         \n\
           --log-level <lvl>  trace|debug|info|warn|error (default: warn)\n"
    );
}

fn find_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(&args[i + 1]);
        }
    }
    None
}

fn parse_f64(args: &[String], flag: &str, default: f64) -> f64 {
    match find_value(args, flag) {
        None => default,
        Some(raw) => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                eprintln!("Error: {flag} expects a number, got {raw}");
                process::exit(1);
            }
        },
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn init_logging(args: &[String]) {
    let level = match find_value(args, "--log-level").map(str::to_lowercase).as_deref() {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("error") => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: logging unavailable: {e}");
    }
}

fn load_tuning(args: &[String]) -> TuningConfig {
    let Some(path) = find_value(args, "--config") else {
        return TuningConfig::default();
    };
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read {path}: {e}");
            process::exit(1);
        }
    };
    match TuningConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {path}: {e}");
            process::exit(1);
        }
    }
}

fn engine_for(tuning: TuningConfig, player: PlayerSetup) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        tuning,
        ..Default::default()
    });
    engine.spawn_player(player);
    engine
}

/// Ticks for the camera to settle on its aiming profile.
const AIM_SETTLE_TICKS: usize = 25;

fn aim(engine: &mut SimulationEngine) {
    engine.queue_command(PlayerCommand::SetAiming { aiming: true });
    for _ in 0..AIM_SETTLE_TICKS {
        engine.tick();
    }
}

// --- Reel command ---

fn cmd_reel(args: &[String]) -> Report {
    let tuning = load_tuning(args);
    let distance = parse_f64(args, "--distance", 10.0);
    let radius = parse_f64(args, "--radius", 0.25);
    let trace = has_flag(args, "--trace");

    // The aiming view ray passes through x = 0.8, y = 1.6 at zero yaw and pitch.
    let lateral = DVec3::new(0.8, 1.6, 0.0) - DVec3::new(ANCHOR.x, ANCHOR.y, 0.0);
    let depth_sq = distance * distance - lateral.length_squared();
    if depth_sq <= 0.0 || radius <= 0.0 {
        eprintln!("Error: --distance must exceed {:.2} and --radius must be positive", lateral.length());
        process::exit(1);
    }
    let target_pos = DVec3::new(0.8, 1.6, ANCHOR.z - depth_sq.sqrt());

    let dt = tuning.tick_dt;
    let limit = (tuning.tether.max_hook_time / dt).ceil() as u64 + 10;
    let mut engine = engine_for(tuning, PlayerSetup::default());
    let mut setup = CollectibleSetup::new("specimen", target_pos);
    setup.shape = ColliderShape::Sphere { radius };
    let target = world_setup::spawn_collectible(engine.world_mut(), setup);
    info!(distance, radius, "reel scenario");

    aim(&mut engine);
    engine.queue_command(PlayerCommand::FireReel);

    let mut points = Vec::new();
    for ticks in 1..=limit {
        let snapshot = engine.tick();
        let hooked = snapshot
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Hooked { target: id, .. } if *id == target.to_bits().get()));
        if ticks == 1 && !hooked {
            return failure("NotHooked");
        }
        if trace {
            if let Some(end) = snapshot.reel.rope.last() {
                points.push(*end);
            }
        }
        let resolved = snapshot.events.iter().find_map(|e| match e {
            GameEvent::ReelResolved { outcome, .. } => Some(*outcome),
            _ => None,
        });
        if let Some(outcome) = resolved {
            return Report {
                outcome: format!("{outcome:?}"),
                elapsed: ticks as f64 * dt,
                ticks,
                delay: None,
                trace: points,
            };
        }
    }
    failure("Unresolved")
}

// --- Gather command ---

fn cmd_gather(args: &[String]) -> Report {
    let mut tuning = load_tuning(args);
    if let Some(raw) = find_value(args, "--frames") {
        match raw.parse::<u32>() {
            Ok(frames) => tuning.gather.frames = frames,
            Err(_) => {
                eprintln!("Error: --frames expects an integer, got {raw}");
                process::exit(1);
            }
        }
    }
    let fps = parse_f64(args, "--fps", CLIP_FRAME_RATE);

    let dt = tuning.tick_dt;
    let player = PlayerSetup {
        clips: vec![ClipInfo {
            name: GATHER_CLIP.to_string(),
            frame_rate: fps,
            frame_count: tuning.gather.frames,
        }],
        ..Default::default()
    };
    let mut engine = engine_for(tuning, player);
    world_setup::spawn_collectible(engine.world_mut(), CollectibleSetup::new("specimen", DVec3::new(0.8, 1.6, -2.2)));

    aim(&mut engine);
    engine.queue_command(PlayerCommand::Gather);

    let mut delay = None;
    for ticks in 1..=100_000u64 {
        let snapshot = engine.tick();
        if ticks == 1 {
            if snapshot.gather.phase == GatherPhase::Idle {
                return failure("NotStarted");
            }
            delay = Some(snapshot.gather.delay);
        }
        let collected = snapshot
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Collected { mode: RetrievalMode::Gather, .. }));
        if snapshot.gather.phase == GatherPhase::Collected || collected {
            return Report {
                outcome: "Collected".to_string(),
                elapsed: ticks as f64 * dt,
                ticks,
                delay,
                trace: Vec::new(),
            };
        }
        if snapshot.gather.phase == GatherPhase::Idle {
            return failure("Cancelled");
        }
    }
    failure("Unresolved")
}

fn failure(outcome: &str) -> Report {
    Report {
        outcome: outcome.to_string(),
        elapsed: 0.0,
        ticks: 0,
        delay: None,
        trace: Vec::new(),
    }
}
