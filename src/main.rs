//! Skyhop entry point
//!
//! Headless runner: drives the simulation with the autopilot at the fixed
//! cadence and reports how the runs went. Rendering front-ends consume
//! `GameState::snapshot()` the same way this binary does.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use skyhop::audio::AudioManager;
use skyhop::consts::{MAX_SUBSTEPS, SIM_DT};
use skyhop::sim::{GameEvent, GameState, TickInput, tick};
use skyhop::{Tuning, TuningError};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Tuning(#[from] TuningError),
    #[error("failed to serialize snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Run the jumper headless under the autopilot and report the results.
#[derive(Debug, Parser)]
#[command(name = "skyhop", version, about)]
struct Options {
    /// Number of simulation ticks to run.
    #[arg(long, value_name = "COUNT", default_value_t = 3600)]
    ticks: u64,
    /// Seed for world generation.
    #[arg(long, value_name = "SEED", default_value_t = 0x5ca1_ab1e)]
    seed: u64,
    /// Tuning JSON file; missing fields take their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Print the final snapshot as JSON instead of a summary.
    #[arg(long)]
    json: bool,
    /// Master volume for sound effects, 0.0 to 1.0.
    #[arg(long, value_name = "LEVEL", default_value_t = 0.8)]
    volume: f32,
    /// Silence sound effects.
    #[arg(long)]
    mute: bool,
}

/// Result of one finished run
#[derive(Debug, Clone, Copy)]
struct RunSummary {
    score: u64,
    coins: u32,
    ticks: u64,
}

/// Fixed-step driver around the simulation
struct Runner {
    state: GameState,
    audio: AudioManager,
    accumulator: f32,
    input: TickInput,
    runs: Vec<RunSummary>,
}

impl Runner {
    fn new(seed: u64, tuning: Tuning, audio: AudioManager) -> Result<Self, TuningError> {
        Ok(Self {
            state: GameState::new(seed, tuning)?,
            audio,
            accumulator: 0.0,
            input: TickInput::idle(),
            runs: Vec::new(),
        })
    }

    /// Run simulation ticks for one frame of `dt` seconds, at most `budget`
    fn update(&mut self, dt: f32, budget: u64) -> u32 {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let limit = u32::try_from(budget).unwrap_or(u32::MAX).min(MAX_SUBSTEPS);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < limit {
            tick(&mut self.state, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            self.audio.play_events(&self.state.events);
            for event in &self.state.events {
                if let GameEvent::GameOver { score, .. } = *event {
                    self.runs.push(RunSummary {
                        score,
                        coins: self.state.coins_collected,
                        ticks: self.state.time_ticks,
                    });
                }
            }
        }
        substeps
    }
}

fn run(options: Options) -> Result<(), CliError> {
    let tuning = match &options.config {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let mut audio = AudioManager::new();
    audio.set_master_volume(options.volume);
    audio.set_muted(options.mute);

    let mut runner = Runner::new(options.seed, tuning, audio)?;
    let mut ticks = 0;
    while ticks < options.ticks {
        ticks += u64::from(runner.update(SIM_DT, options.ticks - ticks));
    }

    let state = &runner.state;
    if options.json {
        println!("{}", state.snapshot().to_json()?);
        return Ok(());
    }

    println!("Simulated {} ticks (seed {})", ticks, options.seed);
    println!("Finished runs: {}", runner.runs.len());
    for (i, r) in runner.runs.iter().enumerate() {
        println!(
            "  run {:>3}: score {:>6}, coins {:>4}, {:>6} ticks",
            i + 1,
            r.score,
            r.coins,
            r.ticks
        );
    }
    println!(
        "Current run: score {}, coins {}, stage {}, phase {}",
        state.score,
        state.coins_collected,
        state.stage(),
        state.phase.as_str()
    );
    println!("High score: {}", state.high_score);
    log::info!("{} sound effects requested", runner.audio.played());
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Skyhop (headless) starting...");

    let options = Options::parse();

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
