use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stackfall_engine::{Board, GameStats, PieceSeed, SessionConfig};

/// Summary of a headless simulation run.
///
/// The seed and configuration are enough to replay the run: the command
/// stream is derived from the same seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Timestamp when the report was created (ISO 8601 format)
    pub generated_at: DateTime<Utc>,
    /// Random seed used for piece generation and the command stream
    pub seed: PieceSeed,
    pub config: SessionConfig,
    /// Number of simulated frames
    pub frames: u64,
    /// Simulated clock at the last frame, in milliseconds
    pub simulated_ms: u64,
    /// Number of player commands issued
    pub commands: u64,
    /// Whether the run ended by game over rather than the frame limit
    pub game_over: bool,
    pub final_stats: GameStats,
    pub final_board: Board,
}
