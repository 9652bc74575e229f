//! Horde Survivor headless runner
//!
//! Drives the simulation with the autopilot and prints the final snapshot as
//! JSON. Rendering, audio and real input belong to a presentation layer that
//! is not part of this crate.
//!
//! Usage: `horde-survivor [--seed N] [--ticks N] [--config tuning.json] [--realtime]`

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

use horde_survivor::consts::TICK_DT;
use horde_survivor::sim::{GamePhase, GameState, Snapshot, TickInput, tick};
use horde_survivor::{Tuning, TuningError};

/// Ticks between progress log lines
const SUMMARY_INTERVAL: u64 = 600;

#[derive(Parser, Debug)]
#[command(name = "horde-survivor")]
#[command(about = "Headless Horde Survivor run driven by the autopilot")]
#[command(version)]
struct Cli {
    /// RNG seed for the session
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 60 * 60)]
    ticks: u64,

    /// Tuning JSON file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pace the loop to the tick rate instead of running flat out
    #[arg(long)]
    realtime: bool,
}

/// Frame loop: one tick per frame, optionally paced to the tick rate
struct Runner {
    state: GameState,
    input: TickInput,
    last_phase: GamePhase,
}

impl Runner {
    fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        Ok(Self {
            state: GameState::with_tuning(seed, tuning)?,
            input: TickInput {
                autopilot: true,
                ..Default::default()
            },
            last_phase: GamePhase::Running,
        })
    }

    fn step(&mut self, frame: u64, total: u64) {
        if frame == total {
            self.input.quit = true;
        }
        tick(&mut self.state, &self.input);

        let phase = self.state.phase;
        if phase != self.last_phase {
            log::debug!("Phase {:?} -> {:?}", self.last_phase, phase);
            self.last_phase = phase;
        }

        if frame > 0 && frame % SUMMARY_INTERVAL == 0 {
            let s = &self.state;
            log::info!(
                "tick {}: hp {}/{} lvl {} xp {} kills {} enemies {} escalation {}",
                s.time_ticks,
                s.avatar.health,
                s.avatar.max_health,
                s.avatar.level,
                s.avatar.xp,
                s.kill_count,
                s.combatants.len(),
                s.escalation_level
            );
        }
    }
}

fn main() -> Result<(), TuningError> {
    env_logger::init();
    log::info!("Horde Survivor (headless) starting...");

    let cli = Cli::parse();
    let tuning = match &cli.config {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    log::info!("Seed {}, running {} ticks", cli.seed, cli.ticks);

    let mut runner = Runner::new(cli.seed, tuning)?;
    let frame_time = Duration::from_secs_f32(TICK_DT);

    for frame in 0..=cli.ticks {
        let started = Instant::now();
        runner.step(frame, cli.ticks);
        if runner.state.quit_requested {
            break;
        }
        if cli.realtime {
            if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    let snapshot = Snapshot::capture(&runner.state);
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
    Ok(())
}
