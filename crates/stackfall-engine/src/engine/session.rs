use std::mem;

use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    ConfigError,
    core::{
        board::Board,
        collision::collide,
        piece::Piece,
        rotation::{RotationDirection, rotate_with_kick},
    },
};

use super::{
    command::Command, config::SessionConfig, event::SessionEvent, game_stats::GameStats,
    piece_generator::{PieceGenerator, PieceSeed},
    scoring::sweep_score,
    snapshot::SessionSnapshot,
};

/// Lifecycle state of a [`GameSession`].
///
/// `Idle → Running ⇄ Paused`, `Running → Terminal`, and back to `Running`
/// only through [`GameSession::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    Terminal,
}

impl SessionState {
    /// Whether move, rotate and drop commands act on the piece.
    #[must_use]
    pub const fn accepts_piece_commands(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

/// One game: the board, the active piece, gravity timing and score.
///
/// The session is driven from outside. The caller feeds frame timestamps to
/// [`tick`](Self::tick) and player commands to the command methods; the
/// session performs no I/O and reads no clock. Piece commands are accepted
/// while `Running` or `Paused` and ignored otherwise; ticks only advance a
/// `Running` session. Collisions are silently rejected.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    active: Option<Piece>,
    generator: PieceGenerator,
    stats: GameStats,
    state: SessionState,
    drop_counter_ms: u64,
    last_tick_ms: Option<u64>,
    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Creates an idle session with a randomly seeded piece generator.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        Self::with_generator(config, PieceGenerator::new())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    pub fn with_seed(config: SessionConfig, seed: PieceSeed) -> Result<Self, ConfigError> {
        Self::with_generator(config, PieceGenerator::with_seed(seed))
    }

    pub fn with_generator(
        config: SessionConfig,
        generator: PieceGenerator,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            board: Board::new(config.width, config.height),
            active: None,
            generator,
            stats: GameStats::new(),
            state: SessionState::Idle,
            drop_counter_ms: 0,
            last_tick_ms: None,
            events: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece.
    ///
    /// `None` only before the first reset. In the `Terminal` state this is
    /// the spawned piece that did not fit; it is not part of the board.
    #[must_use]
    pub fn active_piece(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.stats.score()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn drop_interval_ms(&self) -> u64 {
        self.config.drop_interval_ms
    }

    /// Seed of the piece generator, when it is a seeded random one.
    #[must_use]
    pub fn seed(&self) -> Option<PieceSeed> {
        self.generator.seed()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            score: self.score(),
            drop_interval_ms: self.drop_interval_ms(),
            board: self.board.clone(),
            active_piece: self.active.clone(),
            stats: self.stats.clone(),
        }
    }

    /// Drains the queued notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        mem::take(&mut self.events)
    }

    /// Starts a new game from any state.
    ///
    /// Clears the board, score and statistics, restarts the gravity clock and
    /// spawns the first piece. The piece generator keeps its sequence.
    pub fn reset(&mut self) {
        self.board.clear();
        self.stats = GameStats::new();
        self.drop_counter_ms = 0;
        self.last_tick_ms = None;
        self.state = SessionState::Running;
        debug!(
            width = self.board.width(),
            height = self.board.height(),
            drop_interval_ms = self.config.drop_interval_ms,
            "session reset"
        );
        self.events.push(SessionEvent::ScoreChanged { score: 0 });
        self.spawn_next();
    }

    /// Advances the gravity clock to `timestamp_ms`.
    ///
    /// The time elapsed since the previous tick is added to the drop counter;
    /// once the counter exceeds the drop interval the piece drops exactly as
    /// with [`soft_drop`](Self::soft_drop). The first tick after a reset or a
    /// resume only anchors the clock, and a timestamp earlier than the
    /// previous one contributes nothing.
    pub fn tick(&mut self, timestamp_ms: u64) {
        if !self.state.is_running() {
            return;
        }
        let elapsed = self
            .last_tick_ms
            .map_or(0, |last| timestamp_ms.saturating_sub(last));
        self.last_tick_ms = Some(timestamp_ms);
        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed);
        if self.drop_counter_ms > self.config.drop_interval_ms {
            self.drop_piece();
        }
    }

    /// Moves the piece down one row, locking it if it cannot move.
    ///
    /// Returns `true` if the piece moved. Resets the drop counter either way.
    /// Works while paused too; only gravity stops.
    pub fn soft_drop(&mut self) -> bool {
        if !self.state.accepts_piece_commands() {
            return false;
        }
        self.drop_piece()
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(Piece::left)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(Piece::right)
    }

    /// Rotates the piece clockwise, kicking it sideways if needed.
    ///
    /// Returns `false` and keeps the piece unchanged when no tested position
    /// fits.
    pub fn rotate_cw(&mut self) -> bool {
        self.try_rotate(RotationDirection::Clockwise)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(RotationDirection::CounterClockwise)
    }

    /// Flips between `Running` and `Paused`; does nothing in other states.
    pub fn toggle_pause(&mut self) {
        let paused = match self.state {
            SessionState::Running => {
                self.state = SessionState::Paused;
                true
            }
            SessionState::Paused => {
                self.state = SessionState::Running;
                // Re-anchor so the paused time is not credited.
                self.last_tick_ms = None;
                false
            }
            SessionState::Idle | SessionState::Terminal => return,
        };
        debug!(paused, "pause toggled");
        self.events.push(SessionEvent::PauseChanged { paused });
    }

    /// Dispatches a [`Command`] to the matching method.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => {
                self.move_left();
            }
            Command::MoveRight => {
                self.move_right();
            }
            Command::SoftDrop => {
                self.soft_drop();
            }
            Command::RotateCw => {
                self.rotate_cw();
            }
            Command::RotateCcw => {
                self.rotate_ccw();
            }
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset(),
        }
    }

    fn try_move(&mut self, step: impl FnOnce(&Piece) -> Piece) -> bool {
        if !self.state.accepts_piece_commands() {
            return false;
        }
        let Some(piece) = &self.active else {
            return false;
        };
        let candidate = step(piece);
        if collide(&self.board, &candidate) {
            trace!(position = ?candidate.position(), "move rejected");
            return false;
        }
        self.active = Some(candidate);
        true
    }

    fn try_rotate(&mut self, direction: RotationDirection) -> bool {
        if !self.state.accepts_piece_commands() {
            return false;
        }
        let Some(piece) = &self.active else {
            return false;
        };
        let Some(rotated) = rotate_with_kick(&self.board, piece, direction) else {
            trace!(?direction, "rotation rejected");
            return false;
        };
        self.active = Some(rotated);
        true
    }

    fn drop_piece(&mut self) -> bool {
        self.drop_counter_ms = 0;
        let Some(piece) = &self.active else {
            return false;
        };
        let candidate = piece.down();
        if !collide(&self.board, &candidate) {
            self.active = Some(candidate);
            return true;
        }
        self.lock_piece();
        false
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        self.board.merge(&piece);
        let cleared_rows = self.board.sweep();
        let points = sweep_score(cleared_rows, self.config.score_base);
        self.stats.record_lock(cleared_rows, points);
        debug!(
            kind = ?piece.kind(),
            position = ?piece.position(),
            cleared_rows,
            score = self.stats.score(),
            "piece locked"
        );
        self.events.push(SessionEvent::PieceLocked {
            kind: piece.kind(),
            cleared_rows,
        });
        if points > 0 {
            self.events.push(SessionEvent::ScoreChanged {
                score: self.stats.score(),
            });
        }
        self.spawn_next();
    }

    fn spawn_next(&mut self) {
        let kind = self.generator.next_kind();
        let piece = Piece::spawn(kind, self.board.width());
        let blocked = collide(&self.board, &piece);
        self.active = Some(piece);
        if blocked {
            self.state = SessionState::Terminal;
            debug!(?kind, score = self.stats.score(), "game over");
            self.events.push(SessionEvent::GameOver {
                final_score: self.stats.score(),
            });
            return;
        }
        debug!(?kind, "piece spawned");
        self.events.push(SessionEvent::PieceSpawned { kind });
    }
}
