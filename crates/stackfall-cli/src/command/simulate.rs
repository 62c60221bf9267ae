use std::path::PathBuf;

use anyhow::ensure;
use chrono::Utc;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use stackfall_engine::{Command, GameSession, PieceSeed, SessionConfig, SessionEvent};
use tracing::info;

use crate::{
    schema::report::SimulationReport,
    util::{Output, SessionConfigArg},
};

const DEFAULT_MAX_FRAMES: u64 = 100_000;
const DEFAULT_FRAME_MS: u64 = 16;
const DEFAULT_COMMAND_RATE: f64 = 0.1;

/// Commands drawn by the simulated player: every play command except pausing.
const SIMULATED_COMMANDS: [Command; 5] = [
    Command::MoveLeft,
    Command::MoveRight,
    Command::SoftDrop,
    Command::RotateCw,
    Command::RotateCcw,
];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    config: SessionConfigArg,
    /// Seed for piece generation and the command stream (32 hex characters)
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Stop after this many frames if the game is still running
    #[arg(long, default_value_t = DEFAULT_MAX_FRAMES)]
    max_frames: u64,
    /// Simulated milliseconds per frame
    #[arg(long, default_value_t = DEFAULT_FRAME_MS)]
    frame_ms: u64,
    /// Probability of issuing a command on each frame (0.0 to 1.0)
    #[arg(long, default_value_t = DEFAULT_COMMAND_RATE)]
    command_rate: f64,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Default for SimulateArg {
    fn default() -> Self {
        Self {
            config: SessionConfigArg::default(),
            seed: None,
            max_frames: DEFAULT_MAX_FRAMES,
            frame_ms: DEFAULT_FRAME_MS,
            command_rate: DEFAULT_COMMAND_RATE,
            output: None,
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let config = arg.config.resolve()?;
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let report = simulate(arg, config, seed)?;
    Output::save_json(&report, arg.output.clone())
}

fn simulate(
    arg: &SimulateArg,
    config: SessionConfig,
    seed: PieceSeed,
) -> anyhow::Result<SimulationReport> {
    let SimulateArg {
        max_frames,
        frame_ms,
        command_rate,
        ..
    } = *arg;
    ensure!(
        (0.0..=1.0).contains(&command_rate),
        "--command-rate must be between 0.0 and 1.0, got {command_rate}"
    );

    info!(%seed, ?config, max_frames, "starting simulation");
    let mut session = GameSession::with_seed(config, seed)?;
    let mut rng = command_rng(seed);
    session.reset();

    let mut frames = 0;
    let mut timestamp_ms = 0;
    let mut commands = 0;
    while frames < max_frames && !session.is_terminal() {
        session.tick(timestamp_ms);
        if rng.random_bool(command_rate) {
            let command = SIMULATED_COMMANDS[rng.random_range(0..SIMULATED_COMMANDS.len())];
            session.apply(command);
            commands += 1;
        }
        for event in session.take_events() {
            if let SessionEvent::PieceLocked {
                cleared_rows: cleared_rows @ 1..,
                ..
            } = event
            {
                info!(frame = frames, cleared_rows, score = session.score(), "rows cleared");
            }
        }
        frames += 1;
        timestamp_ms += frame_ms;
    }

    info!(
        frames,
        score = session.score(),
        game_over = session.is_terminal(),
        "simulation finished"
    );
    Ok(SimulationReport {
        generated_at: Utc::now(),
        seed,
        config,
        frames,
        simulated_ms: timestamp_ms.saturating_sub(frame_ms),
        commands,
        game_over: session.is_terminal(),
        final_stats: session.stats().clone(),
        final_board: session.board().clone(),
    })
}

/// The command stream is seeded from the piece seed so a report can be replayed.
fn command_rng(seed: PieceSeed) -> Pcg32 {
    let bytes = seed.to_bytes();
    let mut state = [0; 8];
    for (i, byte) in bytes.iter().enumerate() {
        state[i % 8] ^= byte;
    }
    Pcg32::seed_from_u64(u64::from_le_bytes(state))
}
